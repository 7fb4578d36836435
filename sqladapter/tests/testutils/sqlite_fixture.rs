// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! SQLite database files in a temporary directory

use sqladapter::{AdapterConfig, DriverInfo, SourceAdapter, SqliteDataSource};
use std::path::PathBuf;
use tempfile::TempDir;

pub const PEOPLE_ROWS: i64 = 25;

/// A SQLite database file living as long as the fixture
pub struct SqliteFixture {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl SqliteFixture {
    pub fn empty() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("fixture.db");
        rusqlite::Connection::open(&path)?;
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// `people(id, name)` with ids 1..=25 and names `person_01`..`person_25`,
    /// plus `departments` and `employees` linked by a foreign key
    pub fn standard() -> Result<Self, Box<dyn std::error::Error>> {
        let fixture = Self::empty()?;
        fixture.execute_batch(
            "CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
             CREATE TABLE departments (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
             CREATE TABLE employees (
                 id INTEGER PRIMARY KEY,
                 name TEXT NOT NULL,
                 dept_id INTEGER REFERENCES departments(id),
                 salary REAL,
                 hired DATE
             );
             INSERT INTO departments VALUES (1, 'Engineering'), (2, 'Sales'), (3, 'Support');
             INSERT INTO employees VALUES
                 (1, 'Alice', 1, 100.0, '2020-03-01'),
                 (2, 'Bob', 1, 80.0, '2021-06-15'),
                 (3, 'O''Brien', 2, 120.0, '2019-11-30'),
                 (4, 'Dana', 2, 90.0, '2022-01-10'),
                 (5, 'Eve', 3, 70.0, '2023-05-05'),
                 (6, 'Frank', NULL, 60.0, '2021-02-02');",
        )?;

        let conn = rusqlite::Connection::open(&fixture.path)?;
        let mut insert = conn.prepare("INSERT INTO people (id, name) VALUES (?1, ?2)")?;
        for id in 1..=PEOPLE_ROWS {
            insert.execute(rusqlite::params![id, format!("person_{:02}", id)])?;
        }
        Ok(fixture)
    }

    pub fn execute_batch(&self, sql: &str) -> Result<(), Box<dyn std::error::Error>> {
        let conn = rusqlite::Connection::open(&self.path)?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    pub fn url(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn data_source(&self) -> SqliteDataSource {
        SqliteDataSource::new(self.url())
    }

    pub fn config(&self, db_type: &str) -> AdapterConfig {
        let mut config = AdapterConfig::new(DriverInfo::new(db_type));
        config.properties.url = self.url();
        config
    }

    /// Adapter over this file that resolves its dialect from `db_type`
    pub fn adapter(&self, db_type: &str) -> SourceAdapter {
        SourceAdapter::sqlite(self.config(db_type)).expect("valid fixture config")
    }
}
