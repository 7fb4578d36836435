// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory driver answering every query from one fixed table
//!
//! Count-only queries (`SELECT COUNT(*) ...`) are answered with the row
//! count. The driver records what it was asked to do and can be told to
//! fail at chosen points.

use parking_lot::Mutex;
use sqladapter::{
    AdapterError, AdapterResult, Capabilities, ColumnMeta, Connection, DataSource, ImportedKey,
    QueryOptions, ResultCursor, Value,
};
use sqladapter::driver::CursorConsumer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
pub struct ScriptedState {
    pub queries: Mutex<Vec<String>>,
    pub fetch_sizes: Mutex<Vec<Option<usize>>>,
    pub positions: Mutex<Vec<u64>>,
    pub connections: AtomicUsize,
    pub capability_checks: AtomicUsize,
}

#[derive(Clone)]
pub struct ScriptedDataSource {
    columns: Vec<ColumnMeta>,
    rows: Vec<Vec<Value>>,
    positioning: bool,
    fail_connect: bool,
    fail_positioning: bool,
    fail_query_containing: Option<String>,
    count_value: Option<Value>,
    current_catalog: Option<String>,
    catalogs: Vec<String>,
    imported_keys: Vec<ImportedKey>,
    pub state: Arc<ScriptedState>,
}

impl ScriptedDataSource {
    /// `id INTEGER, name VARCHAR` with ids `1..=n`
    pub fn numbered(n: i64) -> Self {
        let rows = (1..=n)
            .map(|id| vec![Value::Integer(id), Value::Text(format!("name_{}", id))])
            .collect();
        Self {
            columns: vec![
                ColumnMeta::new("id", "INTEGER"),
                ColumnMeta::new("name", "VARCHAR(64)"),
            ],
            rows,
            positioning: false,
            fail_connect: false,
            fail_positioning: false,
            fail_query_containing: None,
            count_value: None,
            current_catalog: None,
            catalogs: vec!["main".to_string()],
            imported_keys: Vec::new(),
            state: Arc::new(ScriptedState::default()),
        }
    }

    pub fn with_positioning(mut self) -> Self {
        self.positioning = true;
        self
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub fn failing_positioning(mut self) -> Self {
        self.fail_positioning = true;
        self
    }

    pub fn failing_query_containing(mut self, needle: &str) -> Self {
        self.fail_query_containing = Some(needle.to_string());
        self
    }

    pub fn with_count_value(mut self, value: Value) -> Self {
        self.count_value = Some(value);
        self
    }

    pub fn with_current_catalog(mut self, catalog: &str) -> Self {
        self.current_catalog = Some(catalog.to_string());
        self
    }

    pub fn with_catalogs(mut self, catalogs: &[&str]) -> Self {
        self.catalogs = catalogs.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_imported_key(mut self, fk_column: &str, pk_table: &str, pk_column: &str) -> Self {
        self.imported_keys.push(ImportedKey {
            fk_column: fk_column.to_string(),
            pk_catalog: Some("main".to_string()),
            pk_table: Some(pk_table.to_string()),
            pk_column: Some(pk_column.to_string()),
        });
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().clone()
    }

    pub fn positions(&self) -> Vec<u64> {
        self.state.positions.lock().clone()
    }

    pub fn fetch_sizes(&self) -> Vec<Option<usize>> {
        self.state.fetch_sizes.lock().clone()
    }

    pub fn connection_count(&self) -> usize {
        self.state.connections.load(Ordering::SeqCst)
    }

    pub fn capability_checks(&self) -> usize {
        self.state.capability_checks.load(Ordering::SeqCst)
    }
}

impl DataSource for ScriptedDataSource {
    fn connect(&self) -> AdapterResult<Box<dyn Connection>> {
        if self.fail_connect {
            return Err(AdapterError::Connection("scripted connection refused".into()));
        }
        self.state.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedConnection {
            source: self.clone(),
        }))
    }

    fn capabilities(&self) -> Capabilities {
        self.state.capability_checks.fetch_add(1, Ordering::SeqCst);
        Capabilities {
            absolute_positioning: self.positioning,
        }
    }
}

struct ScriptedConnection {
    source: ScriptedDataSource,
}

impl Connection for ScriptedConnection {
    fn query(
        &mut self,
        sql: &str,
        options: &QueryOptions,
        consumer: &mut CursorConsumer<'_>,
    ) -> AdapterResult<()> {
        let state = &self.source.state;
        state.queries.lock().push(sql.to_string());
        state.fetch_sizes.lock().push(options.fetch_size);

        if let Some(needle) = &self.source.fail_query_containing {
            if sql.contains(needle.as_str()) {
                return Err(AdapterError::execution(sql, "scripted query failure"));
            }
        }

        let mut cursor = if sql.trim_start().starts_with("SELECT COUNT(*)") {
            let count = self
                .source
                .count_value
                .clone()
                .unwrap_or(Value::Integer(self.source.rows.len() as i64));
            ScriptedCursor {
                columns: vec![ColumnMeta::new("COUNT(*)", "BIGINT")],
                rows: vec![vec![count]],
                next: 0,
                fail_positioning: false,
                state: state.clone(),
            }
        } else {
            ScriptedCursor {
                columns: self.source.columns.clone(),
                rows: self.source.rows.clone(),
                next: 0,
                fail_positioning: self.source.fail_positioning,
                state: state.clone(),
            }
        };
        consumer(&mut cursor)
    }

    fn current_catalog(&mut self) -> AdapterResult<Option<String>> {
        Ok(self.source.current_catalog.clone())
    }

    fn catalogs(&mut self) -> AdapterResult<Vec<String>> {
        Ok(self.source.catalogs.clone())
    }

    fn tables(&mut self, _catalog: &str) -> AdapterResult<Vec<String>> {
        Ok(vec!["numbers".to_string(), "letters".to_string()])
    }

    fn columns(&mut self, _catalog: &str, _table: &str) -> AdapterResult<Vec<ColumnMeta>> {
        Ok(self.source.columns.clone())
    }

    fn imported_keys(&mut self, _catalog: &str, _table: &str) -> AdapterResult<Vec<ImportedKey>> {
        Ok(self.source.imported_keys.clone())
    }
}

struct ScriptedCursor {
    columns: Vec<ColumnMeta>,
    rows: Vec<Vec<Value>>,
    next: usize,
    fail_positioning: bool,
    state: Arc<ScriptedState>,
}

impl ResultCursor for ScriptedCursor {
    fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    fn next_row(&mut self) -> AdapterResult<Option<Vec<Value>>> {
        let row = self.rows.get(self.next).cloned();
        if row.is_some() {
            self.next += 1;
        }
        Ok(row)
    }

    fn position_at(&mut self, offset: u64) -> AdapterResult<()> {
        self.state.positions.lock().push(offset);
        if self.fail_positioning {
            return Err(AdapterError::Materialization("scripted positioning failure".into()));
        }
        self.next = usize::try_from(offset).unwrap_or(usize::MAX).min(self.rows.len());
        Ok(())
    }
}
