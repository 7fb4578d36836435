// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Cursor to typed table

use super::{AdapterError, AdapterResult};
use crate::driver::ResultCursor;
use crate::types::{sql_type_to_value_type, Column, Dataframe};

/// Materialize a cursor into a [`Dataframe`]
///
/// Column definitions are read once before any row. Rows are read in cursor
/// order until the cursor is exhausted or `row_cap` rows have been read;
/// the cap is a safety bound, not a paging mechanism. Values are not coerced.
/// A read failure discards everything read so far.
pub fn materialize(cursor: &mut dyn ResultCursor, row_cap: usize) -> AdapterResult<Dataframe> {
    let columns: Vec<Column> = cursor
        .columns()
        .iter()
        .map(|meta| Column::new(meta.name.clone(), sql_type_to_value_type(&meta.type_name)))
        .collect();

    let mut rows = Vec::new();
    while rows.len() < row_cap {
        let next = cursor.next_row().map_err(|e| match e {
            AdapterError::Materialization(_) => e,
            other => AdapterError::Materialization(other.to_string()),
        })?;
        match next {
            Some(row) => rows.push(row),
            None => break,
        }
    }

    Dataframe::new(columns, rows)
}
