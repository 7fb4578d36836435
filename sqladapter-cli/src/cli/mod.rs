// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for SqlAdapter
//!
//! Provides one-off query execution with paging, metadata browsing and
//! dialect inspection.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_catalogs, handle_columns, handle_dialect, handle_query, handle_tables, handle_version,
};
