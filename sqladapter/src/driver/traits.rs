// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Generic relational driver interface
//!
//! The adapter only depends on this shape: open a connection, run text SQL
//! and walk a forward-only cursor, and read catalog metadata. Cursors are
//! only reachable inside the consumer passed to [`Connection::query`], so a
//! cursor can never outlive its statement and is released on every exit path.

use crate::exec::{AdapterError, AdapterResult};
use crate::types::Value;

/// Name and native type of a result or catalog column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    /// Type name as reported by the driver; empty when unknown
    pub type_name: String,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// An imported-key (foreign-key) relationship of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedKey {
    /// Child column in the inspected table
    pub fk_column: String,
    pub pk_catalog: Option<String>,
    pub pk_table: Option<String>,
    pub pk_column: Option<String>,
}

/// Per-query hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    /// Rows the driver should buffer per round trip
    pub fetch_size: Option<usize>,
}

/// Static driver capabilities, checked once per adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Cursors support [`ResultCursor::position_at`]
    pub absolute_positioning: bool,
}

/// Forward-only handle over a query's rows
pub trait ResultCursor {
    /// Column definitions, available before the first row is read
    fn columns(&self) -> &[ColumnMeta];

    /// Read the next row, `None` once the cursor is exhausted
    fn next_row(&mut self) -> AdapterResult<Option<Vec<Value>>>;

    /// Advance past one row without decoding it
    fn skip_row(&mut self) -> AdapterResult<bool> {
        Ok(self.next_row()?.is_some())
    }

    /// Position the cursor so that the next read returns the row at `offset` (0-based)
    ///
    /// Only called when [`Capabilities::absolute_positioning`] is set. Errors
    /// from this call are genuine failures, never a "not supported" signal.
    fn position_at(&mut self, offset: u64) -> AdapterResult<()> {
        Err(AdapterError::Materialization(format!(
            "cursor cannot be positioned at row {}",
            offset
        )))
    }
}

/// Consumer invoked with the cursor of an executed query
pub type CursorConsumer<'a> = dyn FnMut(&mut dyn ResultCursor) -> AdapterResult<()> + 'a;

/// An open connection; dropping it releases the underlying resources
pub trait Connection {
    /// Execute `sql` and hand its cursor to `consumer`
    fn query(
        &mut self,
        sql: &str,
        options: &QueryOptions,
        consumer: &mut CursorConsumer<'_>,
    ) -> AdapterResult<()>;

    /// The catalog the connection is bound to, if the driver has that notion
    fn current_catalog(&mut self) -> AdapterResult<Option<String>>;

    fn catalogs(&mut self) -> AdapterResult<Vec<String>>;

    /// Tables and views of a catalog
    fn tables(&mut self, catalog: &str) -> AdapterResult<Vec<String>>;

    /// Columns of a table, in driver order
    fn columns(&mut self, catalog: &str, table: &str) -> AdapterResult<Vec<ColumnMeta>>;

    fn imported_keys(&mut self, catalog: &str, table: &str) -> AdapterResult<Vec<ImportedKey>>;
}

/// Connection factory; pooling and credentials live behind it
pub trait DataSource: Send + Sync {
    fn connect(&self) -> AdapterResult<Box<dyn Connection>>;

    fn capabilities(&self) -> Capabilities;
}

/// Run a query and compute a value from its cursor
pub fn with_cursor<R, F>(
    conn: &mut dyn Connection,
    sql: &str,
    options: &QueryOptions,
    f: F,
) -> AdapterResult<R>
where
    F: FnOnce(&mut dyn ResultCursor) -> AdapterResult<R>,
{
    let mut f = Some(f);
    let mut out = None;
    conn.query(sql, options, &mut |cursor: &mut dyn ResultCursor| {
        if let Some(f) = f.take() {
            out = Some(f(cursor)?);
        }
        Ok(())
    })?;
    out.ok_or_else(|| AdapterError::execution(sql, "driver did not produce a result cursor"))
}
