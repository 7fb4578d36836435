// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Native column type name to logical value type mapping
//!
//! Drivers report type names such as `VARCHAR(255)`, `int unsigned` or
//! `TIMESTAMP WITH TIME ZONE`. Names are normalized (upper-cased, length and
//! precision arguments dropped, `UNSIGNED`/`SIGNED` modifiers removed) and
//! looked up in a fixed table. Anything unknown maps to [`DEFAULT_VALUE_TYPE`].

use super::ValueType;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Logical type for native names that are not in the table
pub const DEFAULT_VALUE_TYPE: ValueType = ValueType::String;

static NATIVE_TYPES: Lazy<HashMap<&'static str, ValueType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for name in [
        "TINYINT", "SMALLINT", "MEDIUMINT", "INT", "INTEGER", "BIGINT", "INT2", "INT4", "INT8",
        "SERIAL", "BIGSERIAL", "SMALLSERIAL", "FLOAT", "FLOAT4", "FLOAT8", "REAL", "DOUBLE",
        "DOUBLE PRECISION", "NUMERIC", "DECIMAL", "NUMBER", "DEC", "MONEY", "SMALLMONEY",
        "INT32", "INT64", "UINT8", "UINT16", "UINT32", "UINT64", "FLOAT32", "FLOAT64",
        "LONG", "BINARY_FLOAT", "BINARY_DOUBLE",
    ] {
        m.insert(name, ValueType::Numeric);
    }
    for name in [
        "DATE", "TIME", "DATETIME", "DATETIME2", "SMALLDATETIME", "DATETIMEOFFSET", "TIMESTAMP",
        "TIMESTAMPTZ", "TIMETZ", "TIMESTAMP WITH TIME ZONE", "TIMESTAMP WITHOUT TIME ZONE",
        "TIMESTAMP WITH LOCAL TIME ZONE", "TIME WITH TIME ZONE", "TIME WITHOUT TIME ZONE",
        "YEAR", "DATE32", "DATETIME64",
    ] {
        m.insert(name, ValueType::Date);
    }
    for name in ["BOOL", "BOOLEAN", "BIT"] {
        m.insert(name, ValueType::Boolean);
    }
    for name in [
        "CHAR", "VARCHAR", "NCHAR", "NVARCHAR", "VARCHAR2", "NVARCHAR2", "TEXT", "TINYTEXT",
        "MEDIUMTEXT", "LONGTEXT", "NTEXT", "CLOB", "NCLOB", "STRING", "UUID", "JSON", "JSONB",
        "CHARACTER", "CHARACTER VARYING", "ENUM", "SET", "XML",
    ] {
        m.insert(name, ValueType::String);
    }
    m
});

/// Normalize a native type name for lookup
fn normalize(native: &str) -> String {
    let mut name = native.trim().to_uppercase();
    if let Some(open) = name.find('(') {
        let close = name[open..].find(')').map(|c| open + c + 1).unwrap_or(name.len());
        name.replace_range(open..close, "");
    }
    name.split_whitespace()
        .filter(|part| *part != "UNSIGNED" && *part != "SIGNED" && *part != "ZEROFILL")
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a driver-reported type name to a logical value type
///
/// Never fails: new and vendor-specific names are expected over time.
pub fn sql_type_to_value_type(native: &str) -> ValueType {
    let name = normalize(native);
    if let Some(value_type) = NATIVE_TYPES.get(name.as_str()) {
        return *value_type;
    }
    // Nullable(Int32), LowCardinality(String) and similar wrappers
    if let (Some(open), true) = (native.find('('), native.trim_end().ends_with(')')) {
        let inner = &native[open + 1..native.trim_end().len() - 1];
        if !inner.contains(',') && !inner.trim().chars().all(|c| c.is_ascii_digit()) {
            return sql_type_to_value_type(inner);
        }
    }
    DEFAULT_VALUE_TYPE
}
