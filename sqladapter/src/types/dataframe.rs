// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Typed tabular results

use super::{Column, PageInfo, Value};
use crate::exec::{AdapterError, AdapterResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row, positionally aligned with the owning table's columns
pub type Row = Vec<Value>;

/// A typed, dialect-independent table
///
/// Every row has exactly `columns.len()` values. Once materialized the
/// table only changes through [`Dataframe::set_page_info`],
/// [`Dataframe::set_script`] and [`Dataframe::set_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataframe {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    columns: Vec<Column>,
    rows: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl Dataframe {
    /// Build a table, rejecting rows whose width differs from the column count
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> AdapterResult<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(AdapterError::Materialization(format!(
                "row {} has {} values but the table has {} columns",
                idx,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: None,
            columns,
            rows,
            script: None,
            page_info: None,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Cell lookup by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    pub fn set_page_info(&mut self, page_info: PageInfo) {
        self.page_info = Some(page_info);
    }

    pub fn set_script(&mut self, script: impl Into<String>) {
        self.script = Some(script.into());
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Replace column types, used after local execution to apply a declared schema
    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }
}
