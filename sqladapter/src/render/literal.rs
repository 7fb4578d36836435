// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Typed values to SQL literal text

use super::ScriptVariable;
use crate::dialect::{DialectDescriptor, TimestampLiteral};
use crate::exec::{AdapterError, AdapterResult};
use crate::types::ValueType;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid numeric regex")
});

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Render one value of the given logical type as SQL text
pub fn render_literal(
    value: &str,
    value_type: ValueType,
    dialect: &DialectDescriptor,
) -> AdapterResult<String> {
    match value_type {
        ValueType::String => Ok(dialect.quote_string(value)),
        ValueType::Numeric => {
            let trimmed = value.trim();
            if NUMERIC_LITERAL.is_match(trimmed) {
                Ok(trimmed.to_string())
            } else {
                Err(AdapterError::Render(format!(
                    "'{}' is not a numeric literal",
                    value
                )))
            }
        }
        ValueType::Boolean => Ok(if value.trim().eq_ignore_ascii_case("true") {
            "TRUE".to_string()
        } else {
            "FALSE".to_string()
        }),
        ValueType::Date => {
            let ts = parse_timestamp(value).ok_or_else(|| {
                AdapterError::Render(format!("'{}' is not a valid timestamp", value))
            })?;
            let text = ts.format("%Y-%m-%d %H:%M:%S").to_string();
            Ok(match dialect.timestamp_literal {
                TimestampLiteral::Typed => format!("TIMESTAMP '{}'", text),
                TimestampLiteral::Plain => format!("'{}'", text),
            })
        }
        // Caller-trusted raw SQL, spliced without quoting
        ValueType::Fragment => Ok(value.to_string()),
        ValueType::Identifier => Ok(dialect.quote_identifier(value)),
        ValueType::Keyword | ValueType::Snippet => Err(AdapterError::Render(format!(
            "unsupported value type {}",
            value_type
        ))),
    }
}

/// Render a script variable: `NULL` when empty, a comma-separated list when multi-valued
pub fn render_variable(
    variable: &ScriptVariable,
    dialect: &DialectDescriptor,
) -> AdapterResult<String> {
    if matches!(variable.value_type, ValueType::Keyword | ValueType::Snippet) {
        return Err(AdapterError::Render(format!(
            "unsupported type {} for variable '{}'",
            variable.value_type, variable.name
        )));
    }
    if variable.values.is_empty() {
        return Ok("NULL".to_string());
    }
    let rendered = variable
        .values
        .iter()
        .map(|v| render_literal(v, variable.value_type, dialect))
        .collect::<AdapterResult<Vec<_>>>()
        .map_err(|e| match e {
            AdapterError::Render(msg) => {
                AdapterError::Render(format!("variable '{}': {}", variable.name, msg))
            }
            other => other,
        })?;
    Ok(rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DatabaseProduct;

    fn sqlite() -> DialectDescriptor {
        DatabaseProduct::Sqlite.dialect()
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(
            render_literal("O'Brien", ValueType::String, &sqlite()).unwrap(),
            "'O''Brien'"
        );
    }

    #[test]
    fn test_numeric_literal() {
        assert_eq!(render_literal(" 42 ", ValueType::Numeric, &sqlite()).unwrap(), "42");
        assert_eq!(render_literal("-1.5e3", ValueType::Numeric, &sqlite()).unwrap(), "-1.5e3");
        let err = render_literal("1; DROP TABLE t", ValueType::Numeric, &sqlite()).unwrap_err();
        assert!(matches!(err, AdapterError::Render(_)));
    }

    #[test]
    fn test_boolean_literal() {
        assert_eq!(render_literal("True", ValueType::Boolean, &sqlite()).unwrap(), "TRUE");
        assert_eq!(render_literal("no", ValueType::Boolean, &sqlite()).unwrap(), "FALSE");
    }

    #[test]
    fn test_date_literal_per_dialect() {
        assert_eq!(
            render_literal("2024-01-31", ValueType::Date, &sqlite()).unwrap(),
            "'2024-01-31 00:00:00'"
        );
        assert_eq!(
            render_literal(
                "2024-01-31T08:30:00",
                ValueType::Date,
                &DatabaseProduct::PostgreSql.dialect()
            )
            .unwrap(),
            "TIMESTAMP '2024-01-31 08:30:00'"
        );
        assert!(render_literal("31/01/2024", ValueType::Date, &sqlite()).is_err());
    }

    #[test]
    fn test_fragment_and_identifier() {
        assert_eq!(
            render_literal("a + 1", ValueType::Fragment, &sqlite()).unwrap(),
            "a + 1"
        );
        assert_eq!(
            render_literal("Total", ValueType::Identifier, &DatabaseProduct::MySql.dialect())
                .unwrap(),
            "`Total`"
        );
    }

    #[test]
    fn test_variable_lists() {
        let empty = ScriptVariable::new("x", ValueType::String);
        assert_eq!(render_variable(&empty, &sqlite()).unwrap(), "NULL");

        let many = ScriptVariable::new("ids", ValueType::Numeric).with_values(["1", "2", "3"]);
        assert_eq!(render_variable(&many, &sqlite()).unwrap(), "1, 2, 3");

        let names = ScriptVariable::new("n", ValueType::String).with_values(["a", "b'c"]);
        assert_eq!(render_variable(&names, &sqlite()).unwrap(), "'a', 'b''c'");
    }

    #[test]
    fn test_unsupported_variable_type() {
        let keyword = ScriptVariable::new("k", ValueType::Keyword);
        assert!(matches!(
            render_variable(&keyword, &sqlite()),
            Err(AdapterError::Render(_))
        ));
        let bad_number = ScriptVariable::new("n", ValueType::Numeric).with_value("abc");
        let err = render_variable(&bad_number, &sqlite()).unwrap_err();
        assert!(err.to_string().contains("variable 'n'"));
    }
}
