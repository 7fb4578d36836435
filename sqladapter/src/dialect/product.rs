// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Known database products and their built-in dialects

use super::{Casing, DialectDescriptor, PaginationStyle, TimestampLiteral};
use serde::{Deserialize, Serialize};

/// Database products with a built-in dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseProduct {
    Sqlite,
    MySql,
    PostgreSql,
    H2,
    ClickHouse,
    Presto,
    Trino,
    Hive,
    Oracle,
    MsSql,
    Db2,
    /// Anything else; configured from the driver info
    Generic,
}

/// Lower-case a driver identity and drop separators: `SQL Server` -> `sqlserver`
pub(crate) fn normalize_identifier(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl DatabaseProduct {
    /// Map a product identifier, including common aliases, to a product
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let product = match normalize_identifier(identifier).as_str() {
            "sqlite" | "sqlite3" => DatabaseProduct::Sqlite,
            "mysql" | "mariadb" | "tidb" | "doris" | "starrocks" => DatabaseProduct::MySql,
            "postgresql" | "postgres" | "pg" | "pgsql" | "greenplum" | "redshift" => {
                DatabaseProduct::PostgreSql
            }
            "h2" => DatabaseProduct::H2,
            "clickhouse" => DatabaseProduct::ClickHouse,
            "presto" => DatabaseProduct::Presto,
            "trino" => DatabaseProduct::Trino,
            "hive" | "hive2" | "sparksql" | "spark" => DatabaseProduct::Hive,
            "oracle" | "oraclethin" => DatabaseProduct::Oracle,
            "mssql" | "sqlserver" | "microsoftsqlserver" | "jtds" => DatabaseProduct::MsSql,
            "db2" | "ibmdb2" => DatabaseProduct::Db2,
            _ => return None,
        };
        Some(product)
    }

    /// Registry tag of the product's dialect
    pub fn tag(self) -> &'static str {
        match self {
            DatabaseProduct::Sqlite => "sqlite",
            DatabaseProduct::MySql => "mysql",
            DatabaseProduct::PostgreSql => "postgresql",
            DatabaseProduct::H2 => "h2",
            DatabaseProduct::ClickHouse => "clickhouse",
            DatabaseProduct::Presto => "presto",
            DatabaseProduct::Trino => "trino",
            DatabaseProduct::Hive => "hive",
            DatabaseProduct::Oracle => "oracle",
            DatabaseProduct::MsSql => "mssql",
            DatabaseProduct::Db2 => "db2",
            DatabaseProduct::Generic => "generic",
        }
    }

    /// The product's built-in dialect, with its native casing defaults
    pub fn dialect(self) -> DialectDescriptor {
        let base = DialectDescriptor::new(self.tag(), self);
        match self {
            DatabaseProduct::Sqlite => base.with_timestamp_literal(TimestampLiteral::Plain),
            DatabaseProduct::MySql => base.with_quotes('`', '`').with_backslash_escapes(true),
            DatabaseProduct::PostgreSql => base.with_casing(Casing::ToLower),
            DatabaseProduct::H2 => base.with_casing(Casing::ToUpper),
            DatabaseProduct::ClickHouse => {
                base.with_quotes('`', '`').with_backslash_escapes(true)
            }
            DatabaseProduct::Presto | DatabaseProduct::Trino => base,
            DatabaseProduct::Hive => base
                .with_quotes('`', '`')
                .with_backslash_escapes(true)
                .with_pagination(PaginationStyle::None)
                .with_timestamp_literal(TimestampLiteral::Plain),
            DatabaseProduct::Oracle => base
                .with_casing(Casing::ToUpper)
                .with_pagination(PaginationStyle::None)
                .with_table_alias_as(false),
            DatabaseProduct::MsSql => base
                .with_quotes('[', ']')
                .with_pagination(PaginationStyle::None)
                .with_timestamp_literal(TimestampLiteral::Plain),
            DatabaseProduct::Db2 => base
                .with_casing(Casing::ToUpper)
                .with_pagination(PaginationStyle::OffsetFetch),
            DatabaseProduct::Generic => base.with_pagination(PaginationStyle::None),
        }
    }
}

impl std::fmt::Display for DatabaseProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(
            DatabaseProduct::from_identifier("Postgres"),
            Some(DatabaseProduct::PostgreSql)
        );
        assert_eq!(
            DatabaseProduct::from_identifier("SQL Server"),
            Some(DatabaseProduct::MsSql)
        );
        assert_eq!(
            DatabaseProduct::from_identifier("maria_db"),
            Some(DatabaseProduct::MySql)
        );
        assert_eq!(DatabaseProduct::from_identifier("snowflake-ish"), None);
    }

    #[test]
    fn test_paging_capabilities() {
        assert!(DatabaseProduct::Sqlite.dialect().supports_paging());
        assert!(DatabaseProduct::Db2.dialect().supports_paging());
        assert!(!DatabaseProduct::Oracle.dialect().supports_paging());
        assert!(!DatabaseProduct::MsSql.dialect().supports_paging());
        assert!(!DatabaseProduct::Generic.dialect().supports_paging());
    }
}
