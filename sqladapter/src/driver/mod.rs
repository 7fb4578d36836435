// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Relational driver abstraction
//!
//! This module provides:
//! - The generic connection/cursor/metadata contract the adapter consumes
//! - A SQLite implementation (feature `sqlite`)

pub mod traits;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use traits::{
    with_cursor, Capabilities, ColumnMeta, Connection, CursorConsumer, DataSource, ImportedKey,
    QueryOptions, ResultCursor,
};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteConnection, SqliteDataSource};
