// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Dialect descriptor: quoting, casing and pagination capability of a backend

use super::DatabaseProduct;
use serde::{Deserialize, Serialize};

/// How unquoted identifiers are cased before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Casing {
    /// Keep identifiers exactly as the caller wrote them
    #[default]
    Unchanged,
    ToUpper,
    ToLower,
}

impl Casing {
    pub fn apply(self, identifier: &str) -> String {
        match self {
            Casing::Unchanged => identifier.to_string(),
            Casing::ToUpper => identifier.to_uppercase(),
            Casing::ToLower => identifier.to_lowercase(),
        }
    }
}

/// Native pagination clause supported by a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaginationStyle {
    /// `LIMIT n OFFSET m`
    LimitOffset,
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`
    OffsetFetch,
    /// No usable clause; paging is emulated on the cursor
    None,
}

/// How timestamp literals are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimestampLiteral {
    /// `TIMESTAMP '2024-01-31 00:00:00'`
    Typed,
    /// `'2024-01-31 00:00:00'`
    Plain,
}

/// Everything the renderer needs to know about a target dialect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialectDescriptor {
    /// Registry tag the descriptor was built from
    pub name: String,
    pub product: DatabaseProduct,
    pub quote_start: char,
    pub quote_end: char,
    pub casing: Casing,
    pub pagination: PaginationStyle,
    pub timestamp_literal: TimestampLiteral,
    /// Whether derived tables take `AS` before their alias
    pub table_alias_as: bool,
    /// Backslash is an escape character inside string literals
    pub backslash_escapes: bool,
}

impl DialectDescriptor {
    pub fn new(name: impl Into<String>, product: DatabaseProduct) -> Self {
        Self {
            name: name.into(),
            product,
            quote_start: '"',
            quote_end: '"',
            casing: Casing::Unchanged,
            pagination: PaginationStyle::LimitOffset,
            timestamp_literal: TimestampLiteral::Typed,
            table_alias_as: true,
            backslash_escapes: false,
        }
    }

    pub fn with_quotes(mut self, start: char, end: char) -> Self {
        self.quote_start = start;
        self.quote_end = end;
        self
    }

    pub fn with_casing(mut self, casing: Casing) -> Self {
        self.casing = casing;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationStyle) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_timestamp_literal(mut self, style: TimestampLiteral) -> Self {
        self.timestamp_literal = style;
        self
    }

    pub fn with_table_alias_as(mut self, table_alias_as: bool) -> Self {
        self.table_alias_as = table_alias_as;
        self
    }

    pub fn with_backslash_escapes(mut self, backslash_escapes: bool) -> Self {
        self.backslash_escapes = backslash_escapes;
        self
    }

    /// Whether native pagination clauses may be emitted
    pub fn supports_paging(&self) -> bool {
        self.pagination != PaginationStyle::None
    }

    /// Case and quote an identifier, doubling embedded closing quotes
    pub fn quote_identifier(&self, identifier: &str) -> String {
        let cased = self.casing.apply(identifier);
        let mut out = String::with_capacity(cased.len() + 2);
        out.push(self.quote_start);
        for ch in cased.chars() {
            if ch == self.quote_end {
                out.push(ch);
            }
            out.push(ch);
        }
        out.push(self.quote_end);
        out
    }

    /// Single-quote a string literal
    pub fn quote_string(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for ch in value.chars() {
            match ch {
                '\'' => out.push_str("''"),
                '\\' if self.backslash_escapes => out.push_str("\\\\"),
                _ => out.push(ch),
            }
        }
        out.push('\'');
        out
    }
}
