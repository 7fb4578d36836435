// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! SqlAdapter - dialect-neutral query execution over relational sources
//!
//! The crate takes a logical query script plus runtime parameters, renders
//! dialect-correct SQL for the target backend, chooses a pagination strategy
//! the backend can honour, and materializes the native cursor into a typed
//! [`Dataframe`].
//!
//! ```text
//! SourceAdapter::execute
//!     ├── DialectResolver      (driver identity -> DialectDescriptor)
//!     ├── SqlScriptRender      (script + params -> SQL text)
//!     ├── PaginationExecutor   (native LIMIT/OFFSET or emulated skipping)
//!     └── materialize          (cursor -> Dataframe)
//! ```
//!
//! When the caller disables server-side aggregation the full script result is
//! fetched and handed to a [`LocalAggregator`] instead.

pub mod config;
pub mod dialect;
pub mod driver;
pub mod exec;
pub mod metadata;
pub mod render;
pub mod types;

pub use config::{AdapterConfig, DriverInfo, SourceProperties};
pub use dialect::{
    global_resolver, Casing, DatabaseProduct, DialectDescriptor, DialectResolution,
    DialectResolutionWarning, DialectResolver, PaginationStyle, TimestampLiteral,
};
pub use driver::{
    Capabilities, ColumnMeta, Connection, DataSource, ImportedKey, QueryOptions, ResultCursor,
};
#[cfg(feature = "sqlite")]
pub use driver::SqliteDataSource;
pub use exec::{
    materialize, AdapterError, AdapterResult, LocalAggregator, PaginationExecutor, PagingStrategy,
    SourceAdapter,
};
pub use metadata::MetadataIntrospector;
pub use render::{
    render, AggregateFunction, AggregateOperator, ExecuteParams, FilterOperator, GroupByOperator,
    OrderOperator, QueryScript, RenderMode, ScriptVariable, SelectColumn, SingleTypedValue,
    SortDirection, SqlOperator, SqlScriptRender,
};
pub use types::{Column, Dataframe, PageInfo, Value, ValueType};
