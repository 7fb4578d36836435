// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog, table and column discovery

use crate::driver::{DataSource, ImportedKey};
use crate::exec::AdapterResult;
use crate::types::{sql_type_to_value_type, Column};
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Reads source metadata; every call opens and releases its own connection
pub struct MetadataIntrospector<'a> {
    source: &'a dyn DataSource,
}

impl<'a> MetadataIntrospector<'a> {
    pub fn new(source: &'a dyn DataSource) -> Self {
        Self { source }
    }

    /// The connection's current catalog when it has one, otherwise every catalog
    pub fn list_catalogs(&self) -> AdapterResult<BTreeSet<String>> {
        let mut conn = self.source.connect()?;
        if let Some(current) = conn.current_catalog()? {
            if !current.trim().is_empty() {
                return Ok(BTreeSet::from([current]));
            }
        }
        Ok(conn.catalogs()?.into_iter().collect())
    }

    pub fn list_tables(&self, catalog: &str) -> AdapterResult<BTreeSet<String>> {
        let mut conn = self.source.connect()?;
        Ok(conn.tables(catalog)?.into_iter().collect())
    }

    /// Columns in driver order, enriched with foreign-key references
    ///
    /// A column gets the imported key whose child column name matches it
    /// exactly. When several keys share a child column the last one wins.
    pub fn list_columns(&self, catalog: &str, table: &str) -> AdapterResult<Vec<Column>> {
        let mut conn = self.source.connect()?;
        let keys: HashMap<String, ImportedKey> = conn
            .imported_keys(catalog, table)?
            .into_iter()
            .map(|key| (key.fk_column.clone(), key))
            .collect();
        debug!(
            "{}.{}: {} imported key(s)",
            catalog,
            table,
            keys.len()
        );

        let columns = conn
            .columns(catalog, table)?
            .into_iter()
            .map(|meta| {
                let column = Column::new(meta.name.clone(), sql_type_to_value_type(&meta.type_name));
                match keys.get(&meta.name) {
                    Some(key) => column.with_foreign_key(
                        key.pk_catalog.clone(),
                        key.pk_table.clone(),
                        key.pk_column.clone(),
                    ),
                    None => column,
                }
            })
            .collect();
        Ok(columns)
    }
}
