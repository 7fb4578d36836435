// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Static dialect registry and cached resolver
//!
//! Resolution order for a [`DriverInfo`]:
//! 1. the explicit `sql_dialect` override, looked up by registry tag
//! 2. the driver identity (`db_type`) looked up by registry tag
//! 3. the product alias table ([`DatabaseProduct::from_identifier`])
//! 4. the generic dialect configured from the driver info
//!
//! Resolution never fails. Misses on steps 1 and 3 are recorded as
//! [`DialectResolutionWarning`]s on the result and logged.

use super::product::normalize_identifier;
use super::{Casing, DatabaseProduct, DialectDescriptor, PaginationStyle};
use crate::config::DriverInfo;
use log::{debug, warn};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a descriptor for a registered tag
type DialectConstructor = fn(&DriverInfo) -> DialectDescriptor;

static DIALECT_REGISTRY: Lazy<HashMap<&'static str, DialectConstructor>> = Lazy::new(|| {
    let mut registry: HashMap<&'static str, DialectConstructor> = HashMap::new();
    registry.insert("sqlite", |_| DatabaseProduct::Sqlite.dialect());
    registry.insert("mysql", |_| DatabaseProduct::MySql.dialect());
    registry.insert("mariadb", |_| {
        let mut dialect = DatabaseProduct::MySql.dialect();
        dialect.name = "mariadb".to_string();
        dialect
    });
    registry.insert("postgresql", |_| DatabaseProduct::PostgreSql.dialect());
    registry.insert("h2", |_| DatabaseProduct::H2.dialect());
    registry.insert("clickhouse", |_| DatabaseProduct::ClickHouse.dialect());
    registry.insert("presto", |_| DatabaseProduct::Presto.dialect());
    registry.insert("trino", |_| DatabaseProduct::Trino.dialect());
    registry.insert("hive", |_| DatabaseProduct::Hive.dialect());
    registry.insert("oracle", |_| DatabaseProduct::Oracle.dialect());
    registry.insert("mssql", |_| DatabaseProduct::MsSql.dialect());
    registry.insert("db2", |_| DatabaseProduct::Db2.dialect());
    registry.insert("generic", generic_dialect);
    registry
});

/// The custom descriptor used when nothing more specific matches
pub fn generic_dialect(driver: &DriverInfo) -> DialectDescriptor {
    let mut dialect = DatabaseProduct::Generic.dialect();
    if let Some(quote) = &driver.identifier_quote {
        let mut chars = quote.chars();
        match (chars.next(), chars.next()) {
            (Some(start), Some(end)) => dialect = dialect.with_quotes(start, end),
            (Some(both), None) => dialect = dialect.with_quotes(both, both),
            _ => {}
        }
    }
    if driver.supports_paging {
        dialect = dialect.with_pagination(PaginationStyle::LimitOffset);
    }
    dialect
}

/// Look up a registry tag
pub fn lookup_dialect(tag: &str, driver: &DriverInfo) -> Option<DialectDescriptor> {
    DIALECT_REGISTRY
        .get(normalize_identifier(tag).as_str())
        .map(|constructor| constructor(driver))
}

/// Registered dialect tags, sorted
pub fn registered_dialects() -> Vec<&'static str> {
    let mut tags: Vec<_> = DIALECT_REGISTRY.keys().copied().collect();
    tags.sort_unstable();
    tags
}

/// Which resolution step produced the descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Override,
    Registry,
    Product,
    Fallback,
}

/// Non-fatal problem encountered while resolving a dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectResolutionWarning {
    pub requested: String,
    pub message: String,
}

impl fmt::Display for DialectResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.requested, self.message)
    }
}

/// Outcome of resolving a driver identity
#[derive(Debug, Clone, PartialEq)]
pub struct DialectResolution {
    pub descriptor: DialectDescriptor,
    pub source: ResolutionSource,
    pub warnings: Vec<DialectResolutionWarning>,
}

impl DialectResolution {
    pub fn supports_paging(&self) -> bool {
        self.descriptor.supports_paging()
    }
}

/// Resolves driver identities to dialects and caches the results
///
/// The cache is the only shared mutable state of the crate. Two threads
/// racing on the same identity may both compute a resolution; the first
/// insert wins and both results are equivalent.
#[derive(Default)]
pub struct DialectResolver {
    cache: RwLock<HashMap<DriverInfo, Arc<DialectResolution>>>,
}

impl DialectResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, driver: &DriverInfo) -> Arc<DialectResolution> {
        if let Some(resolution) = self.cache.read().get(driver) {
            return resolution.clone();
        }

        let resolution = Arc::new(resolve_uncached(driver));
        self.cache
            .write()
            .entry(driver.clone())
            .or_insert(resolution)
            .clone()
    }

    pub fn cached_count(&self) -> usize {
        self.cache.read().len()
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

static GLOBAL_RESOLVER: Lazy<DialectResolver> = Lazy::new(DialectResolver::new);

/// Process-wide resolver shared by adapters
pub fn global_resolver() -> &'static DialectResolver {
    &GLOBAL_RESOLVER
}

fn resolve_uncached(driver: &DriverInfo) -> DialectResolution {
    let mut warnings = Vec::new();

    let (mut descriptor, source) = match resolve_steps(driver, &mut warnings) {
        Some(found) => found,
        None => {
            let warning = DialectResolutionWarning {
                requested: driver.db_type.clone(),
                message: "DBType mismatched, use generic sql dialect".to_string(),
            };
            warn!("{}", warning);
            warnings.push(warning);
            (generic_dialect(driver), ResolutionSource::Fallback)
        }
    };

    // Caller casing must survive rendering regardless of the dialect default
    descriptor.casing = Casing::Unchanged;

    debug!(
        "Resolved dialect '{}' for db type '{}' via {:?}",
        descriptor.name, driver.db_type, source
    );
    DialectResolution {
        descriptor,
        source,
        warnings,
    }
}

fn resolve_steps(
    driver: &DriverInfo,
    warnings: &mut Vec<DialectResolutionWarning>,
) -> Option<(DialectDescriptor, ResolutionSource)> {
    if let Some(tag) = driver.sql_dialect.as_deref().filter(|t| !t.trim().is_empty()) {
        match lookup_dialect(tag, driver) {
            Some(descriptor) => return Some((descriptor, ResolutionSource::Override)),
            None => {
                let warning = DialectResolutionWarning {
                    requested: tag.to_string(),
                    message: "sql dialect not found, use default sql dialect".to_string(),
                };
                warn!("{}", warning);
                warnings.push(warning);
            }
        }
    }

    if let Some(descriptor) = lookup_dialect(&driver.db_type, driver) {
        return Some((descriptor, ResolutionSource::Registry));
    }

    DatabaseProduct::from_identifier(&driver.db_type)
        .map(|product| (product.dialect(), ResolutionSource::Product))
}
