// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Adapter configuration
//!
//! Configuration is plain serde data so it can be embedded in a larger
//! application config or loaded on its own from a JSON file.

use crate::exec::{AdapterError, AdapterResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on the fetch-size hint given to drivers
pub const DEFAULT_MAX_FETCH_SIZE: usize = 10_000;

/// Identity of the driver behind a source, used for dialect resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DriverInfo {
    /// Product identifier, e.g. `mysql`, `postgresql`, `sqlite`
    pub db_type: String,
    /// Explicit dialect tag overriding the lookup by `db_type`
    #[serde(default)]
    pub sql_dialect: Option<String>,
    /// Identifier quote for the generic dialect; one char or an open/close pair
    #[serde(default)]
    pub identifier_quote: Option<String>,
    /// Whether the generic dialect may emit LIMIT/OFFSET
    #[serde(default)]
    pub supports_paging: bool,
}

impl DriverInfo {
    pub fn new(db_type: impl Into<String>) -> Self {
        Self {
            db_type: db_type.into(),
            ..Default::default()
        }
    }

    pub fn with_sql_dialect(mut self, tag: impl Into<String>) -> Self {
        self.sql_dialect = Some(tag.into());
        self
    }

    pub fn with_identifier_quote(mut self, quote: impl Into<String>) -> Self {
        self.identifier_quote = Some(quote.into());
        self
    }

    pub fn with_paging(mut self, supports_paging: bool) -> Self {
        self.supports_paging = supports_paging;
        self
    }
}

/// Connection properties handed to the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceProperties {
    /// Driver-specific location, e.g. a SQLite file path
    pub url: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

/// Top-level adapter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterConfig {
    pub driver: DriverInfo,
    #[serde(default)]
    pub properties: SourceProperties,
    /// Cap on the fetch-size hint for emulated paging
    #[serde(default = "default_max_fetch_size")]
    pub max_fetch_size: usize,
    /// Safety cap on rows materialized by non-paged executions
    #[serde(default)]
    pub row_cap: Option<usize>,
}

fn default_max_fetch_size() -> usize {
    DEFAULT_MAX_FETCH_SIZE
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            driver: DriverInfo::default(),
            properties: SourceProperties::default(),
            max_fetch_size: DEFAULT_MAX_FETCH_SIZE,
            row_cap: None,
        }
    }
}

impl AdapterConfig {
    pub fn new(driver: DriverInfo) -> Self {
        Self {
            driver,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> AdapterResult<Self> {
        let config: AdapterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> AdapterResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> AdapterResult<()> {
        if self.driver.db_type.trim().is_empty() && self.driver.sql_dialect.is_none() {
            return Err(AdapterError::Config(
                "driver.dbType or driver.sqlDialect must be set".to_string(),
            ));
        }
        if self.max_fetch_size == 0 {
            return Err(AdapterError::Config(
                "maxFetchSize must be greater than zero".to_string(),
            ));
        }
        if let Some(quote) = &self.driver.identifier_quote {
            let len = quote.chars().count();
            if len != 1 && len != 2 {
                return Err(AdapterError::Config(format!(
                    "identifierQuote must be one character or an open/close pair, got '{}'",
                    quote
                )));
            }
        }
        Ok(())
    }

    /// Row cap with the unbounded default applied
    pub fn effective_row_cap(&self) -> usize {
        self.row_cap.unwrap_or(usize::MAX)
    }
}
