// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Logical value types and column definitions

use serde::{Deserialize, Serialize};

/// Logical value type shared by result columns and script variables
///
/// Result columns only ever carry `String`, `Numeric`, `Boolean`, `Date` or
/// `Fragment`. `Identifier`, `Keyword` and `Snippet` describe how a script
/// value is meant to be spliced into SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    #[default]
    String,
    Numeric,
    Boolean,
    Date,
    Fragment,
    Identifier,
    Keyword,
    Snippet,
}

impl std::str::FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(ValueType::String),
            "numeric" => Ok(ValueType::Numeric),
            "boolean" => Ok(ValueType::Boolean),
            "date" => Ok(ValueType::Date),
            "fragment" => Ok(ValueType::Fragment),
            "identifier" => Ok(ValueType::Identifier),
            "keyword" => Ok(ValueType::Keyword),
            "snippet" => Ok(ValueType::Snippet),
            _ => Err(format!(
                "Unknown value type: {}. Valid options: string, numeric, boolean, date, fragment, identifier, keyword, snippet",
                s
            )),
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::String => "STRING",
            ValueType::Numeric => "NUMERIC",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Date => "DATE",
            ValueType::Fragment => "FRAGMENT",
            ValueType::Identifier => "IDENTIFIER",
            ValueType::Keyword => "KEYWORD",
            ValueType::Snippet => "SNIPPET",
        };
        write!(f, "{}", name)
    }
}

/// A column of a table projection or of a catalog table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Catalog of the referenced primary key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fk_catalog: Option<String>,
    /// Table of the referenced primary key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fk_table: Option<String>,
    /// Referenced primary key column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fk_column: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            fk_catalog: None,
            fk_table: None,
            fk_column: None,
        }
    }

    /// Attach a foreign-key reference
    pub fn with_foreign_key(
        mut self,
        catalog: Option<String>,
        table: Option<String>,
        column: Option<String>,
    ) -> Self {
        self.fk_catalog = catalog;
        self.fk_table = table;
        self.fk_column = column;
        self
    }

    pub fn has_foreign_key(&self) -> bool {
        self.fk_table.is_some()
    }
}
