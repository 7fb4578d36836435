// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! SQLite driver implementation

use super::traits::{
    Capabilities, ColumnMeta, Connection, CursorConsumer, DataSource, ImportedKey, QueryOptions,
    ResultCursor,
};
use crate::exec::{AdapterError, AdapterResult};
use crate::types::Value;
use log::trace;
use rusqlite::types::ValueRef;

/// SQLite data source over a database file or a `file:` URI
///
/// Every [`DataSource::connect`] opens a fresh connection. In-memory
/// databases therefore need a shared-cache URI such as
/// `file:fixture?mode=memory&cache=shared` to be visible across calls.
#[derive(Debug, Clone)]
pub struct SqliteDataSource {
    url: String,
}

impl SqliteDataSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DataSource for SqliteDataSource {
    fn connect(&self) -> AdapterResult<Box<dyn Connection>> {
        let conn = rusqlite::Connection::open(&self.url)
            .map_err(|e| AdapterError::Connection(format!("{}: {}", self.url, e)))?;
        Ok(Box::new(SqliteConnection { conn }))
    }

    fn capabilities(&self) -> Capabilities {
        // SQLite statements only step forward
        Capabilities {
            absolute_positioning: false,
        }
    }
}

/// Open SQLite connection
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    fn string_column(&self, sql: &str, params: &[&str]) -> AdapterResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| AdapterError::execution(sql, e))?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                row.get::<_, String>(0)
            })
            .map_err(|e| AdapterError::execution(sql, e))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| AdapterError::execution(sql, e))
    }
}

impl Connection for SqliteConnection {
    fn query(
        &mut self,
        sql: &str,
        options: &QueryOptions,
        consumer: &mut CursorConsumer<'_>,
    ) -> AdapterResult<()> {
        if let Some(fetch_size) = options.fetch_size {
            trace!("SQLite ignores fetch size hint {}", fetch_size);
        }
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| AdapterError::execution(sql, e))?;
        let columns: Vec<ColumnMeta> = stmt
            .columns()
            .iter()
            .map(|c| ColumnMeta::new(c.name(), c.decl_type().unwrap_or_default()))
            .collect();
        let rows = stmt
            .query([])
            .map_err(|e| AdapterError::execution(sql, e))?;

        let mut cursor = SqliteCursor { rows, columns };
        consumer(&mut cursor)
    }

    fn current_catalog(&mut self) -> AdapterResult<Option<String>> {
        // Attached databases are all reachable from one connection
        Ok(None)
    }

    fn catalogs(&mut self) -> AdapterResult<Vec<String>> {
        self.string_column("SELECT name FROM pragma_database_list ORDER BY seq", &[])
    }

    fn tables(&mut self, catalog: &str) -> AdapterResult<Vec<String>> {
        let sql = format!(
            "SELECT name FROM \"{}\".sqlite_master \
             WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
             ORDER BY name",
            catalog.replace('"', "\"\"")
        );
        self.string_column(&sql, &[])
    }

    fn columns(&mut self, catalog: &str, table: &str) -> AdapterResult<Vec<ColumnMeta>> {
        let sql = "SELECT name, type FROM pragma_table_info(?1, ?2) ORDER BY cid";
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| AdapterError::execution(sql, e))?;
        let rows = stmt
            .query_map([table, catalog], |row| {
                Ok(ColumnMeta::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                ))
            })
            .map_err(|e| AdapterError::execution(sql, e))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| AdapterError::execution(sql, e))
    }

    fn imported_keys(&mut self, catalog: &str, table: &str) -> AdapterResult<Vec<ImportedKey>> {
        let sql = "SELECT \"from\", \"table\", \"to\" FROM pragma_foreign_key_list(?1, ?2) \
                   ORDER BY id, seq";
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| AdapterError::execution(sql, e))?;
        let rows = stmt
            .query_map([table, catalog], |row| {
                Ok(ImportedKey {
                    fk_column: row.get(0)?,
                    pk_catalog: Some(catalog.to_string()),
                    pk_table: row.get(1)?,
                    pk_column: row.get(2)?,
                })
            })
            .map_err(|e| AdapterError::execution(sql, e))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| AdapterError::execution(sql, e))
    }
}

/// Cursor over a running SQLite statement
struct SqliteCursor<'stmt> {
    rows: rusqlite::Rows<'stmt>,
    columns: Vec<ColumnMeta>,
}

fn value_from_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    }
}

impl ResultCursor for SqliteCursor<'_> {
    fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    fn next_row(&mut self) -> AdapterResult<Option<Vec<Value>>> {
        let width = self.columns.len();
        let row = match self.rows.next() {
            Ok(Some(row)) => row,
            Ok(None) => return Ok(None),
            Err(e) => return Err(AdapterError::Materialization(e.to_string())),
        };
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            let value = row
                .get_ref(idx)
                .map_err(|e| AdapterError::Materialization(e.to_string()))?;
            values.push(value_from_ref(value));
        }
        Ok(Some(values))
    }

    fn skip_row(&mut self) -> AdapterResult<bool> {
        self.rows
            .next()
            .map(|row| row.is_some())
            .map_err(|e| AdapterError::Materialization(e.to_string()))
    }
}
