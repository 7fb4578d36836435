// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Query scripts and script variables

use crate::types::ValueType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A variable referenced from a script as `$name$`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptVariable {
    pub name: String,
    pub value_type: ValueType,
    /// Zero or more values; empty renders as `NULL`
    #[serde(default)]
    pub values: Vec<String>,
}

impl ScriptVariable {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }
}

/// Dialect-neutral query description
///
/// `script` is SQL text with `$name$` placeholders. `schema`, when present,
/// declares the logical type of result columns and overrides inferred types
/// after local execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryScript {
    #[serde(default)]
    pub source_id: String,
    pub script: String,
    #[serde(default)]
    pub variables: Vec<ScriptVariable>,
    #[serde(default)]
    pub schema: Option<HashMap<String, ValueType>>,
}

impl QueryScript {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Default::default()
        }
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = source_id.into();
        self
    }

    pub fn with_variable(mut self, variable: ScriptVariable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn with_schema_type(mut self, column: impl Into<String>, value_type: ValueType) -> Self {
        self.schema
            .get_or_insert_with(HashMap::new)
            .insert(column.into(), value_type);
        self
    }

    pub fn variable(&self, name: &str) -> Option<&ScriptVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Declared type of a result column, if the script has a schema entry for it
    pub fn declared_type(&self, column: &str) -> Option<ValueType> {
        self.schema.as_ref().and_then(|s| s.get(column).copied())
    }

    /// Stable key identifying this script and its variable values
    pub fn to_query_key(&self) -> String {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(self.source_id.as_bytes());
        hasher.update(&[0x1f]);
        hasher.update(self.script.as_bytes());
        for variable in &self.variables {
            hasher.update(&[0x1e]);
            hasher.update(variable.name.as_bytes());
            hasher.update(variable.value_type.to_string().as_bytes());
            for value in &variable.values {
                hasher.update(&[0x1f]);
                hasher.update(value.as_bytes());
            }
        }
        format!("Q{:08x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_is_stable_and_value_sensitive() {
        let script = QueryScript::new("SELECT * FROM t WHERE a = $a$")
            .with_source_id("src")
            .with_variable(ScriptVariable::new("a", ValueType::Numeric).with_value("1"));
        assert_eq!(script.to_query_key(), script.clone().to_query_key());
        assert!(script.to_query_key().starts_with('Q'));

        let other = QueryScript::new("SELECT * FROM t WHERE a = $a$")
            .with_source_id("src")
            .with_variable(ScriptVariable::new("a", ValueType::Numeric).with_value("2"));
        assert_ne!(script.to_query_key(), other.to_query_key());
    }

    #[test]
    fn test_declared_type() {
        let script = QueryScript::new("SELECT 1 AS n").with_schema_type("n", ValueType::Numeric);
        assert_eq!(script.declared_type("n"), Some(ValueType::Numeric));
        assert_eq!(script.declared_type("m"), None);
    }
}
