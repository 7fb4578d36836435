// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for query rendering and execution

use thiserror::Error;

/// Result type alias for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Errors surfaced to callers of the adapter
///
/// Dialect resolution problems are not represented here: they degrade to the
/// generic dialect and are reported as
/// [`DialectResolutionWarning`](crate::dialect::DialectResolutionWarning).
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The driver could not open a connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// Unsupported variable type or malformed script; raised before any driver round trip
    #[error("Render error: {0}")]
    Render(String),

    /// The driver rejected or failed the query
    #[error("Execution error: {message} (sql: {sql})")]
    Execution { sql: String, message: String },

    /// Cursor read failure while building a table
    #[error("Materialization error: {0}")]
    Materialization(String),

    /// Invalid page info or execute parameters
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    /// Local aggregation was requested but no aggregator is configured
    #[error("Local aggregation requested but no local aggregator is configured")]
    LocalAggregationUnavailable,

    /// The local aggregator failed
    #[error("Local aggregation error: {0}")]
    LocalAggregation(String),

    /// Invalid adapter configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdapterError {
    /// Build an execution error carrying the failing SQL text
    pub fn execution(sql: impl Into<String>, message: impl ToString) -> Self {
        AdapterError::Execution {
            sql: sql.into(),
            message: message.to_string(),
        }
    }

    /// The SQL text attached to an execution error, if any
    pub fn sql(&self) -> Option<&str> {
        match self {
            AdapterError::Execution { sql, .. } => Some(sql),
            _ => None,
        }
    }
}
