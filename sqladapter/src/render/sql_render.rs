// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Script + execute params to dialect-correct SQL text
//!
//! The script is substituted and wrapped as a derived table; projection,
//! filters, grouping, ordering and pagination are rendered around it:
//!
//! ```text
//! SELECT <items> FROM (<script>) AS V_SRC WHERE .. GROUP BY .. HAVING .. ORDER BY .. LIMIT ..
//! ```
//!
//! Rendering is a pure function of script, params, dialect and mode.

use super::literal::{render_literal, render_variable};
use super::params::{AggregateFunction, AggregateOperator, FilterOperator, SortDirection, SqlOperator};
use super::{ExecuteParams, QueryScript};
use crate::dialect::{DialectDescriptor, PaginationStyle};
use crate::exec::{AdapterError, AdapterResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Alias of the script when wrapped as a derived table
pub const SOURCE_ALIAS: &str = "V_SRC";

/// Alias of the inner query of a count query
pub const COUNT_ALIAS: &str = "V_T";

static VARIABLE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$([A-Za-z_][A-Za-z0-9_]*)\$").expect("valid placeholder regex")
});

/// One lexical piece of a script
#[derive(Debug, PartialEq)]
enum Token<'s> {
    /// `-- ..` up to the line break, or `/* .. */`
    Comment,
    /// `$name$` outside quotes and comments
    Placeholder(&'s str),
    /// Quoted string or identifier, copied verbatim
    Quoted,
    /// A single character of plain SQL
    Char(char),
}

/// Length of the quoted run at the start of `text`, closing quote included
///
/// A doubled quote character is an escaped quote. Unterminated runs extend to
/// the end of the text.
fn quoted_len(text: &str, quote: char, backslash_escapes: bool) -> usize {
    let mut chars = text.char_indices().skip(1).peekable();
    while let Some((idx, ch)) = chars.next() {
        if backslash_escapes && ch == '\\' {
            chars.next();
        } else if ch == quote {
            match chars.peek() {
                Some(&(_, next)) if next == quote => {
                    chars.next();
                }
                _ => return idx + ch.len_utf8(),
            }
        }
    }
    text.len()
}

/// Split the next token off the start of a non-empty `text`
fn next_token<'a>(text: &'a str, dialect: &DialectDescriptor) -> (Token<'a>, usize) {
    if text.starts_with("--") {
        let len = text.find('\n').unwrap_or(text.len());
        return (Token::Comment, len);
    }
    if let Some(body) = text.strip_prefix("/*") {
        let len = body.find("*/").map(|i| i + 4).unwrap_or(text.len());
        return (Token::Comment, len);
    }
    let Some(ch) = text.chars().next() else {
        return (Token::Comment, 0);
    };
    match ch {
        '\'' => (Token::Quoted, quoted_len(text, ch, dialect.backslash_escapes)),
        '"' | '`' => (Token::Quoted, quoted_len(text, ch, false)),
        '$' => match VARIABLE_PLACEHOLDER.captures(text) {
            Some(caps) => match (caps.get(0), caps.get(1)) {
                (Some(whole), Some(name)) => (Token::Placeholder(name.as_str()), whole.end()),
                _ => (Token::Char(ch), 1),
            },
            None => (Token::Char(ch), 1),
        },
        _ => (Token::Char(ch), ch.len_utf8()),
    }
}

/// Which SQL variant to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// The substituted script alone, for local aggregation
    ScriptOnly,
    /// The full query without pagination
    Plain,
    /// The full query with native pagination when the dialect allows it
    Paginated,
    /// One row, one column: the number of rows `Plain` would return
    CountOnly,
}

/// Renders one script with one set of params against one dialect
pub struct SqlScriptRender<'a> {
    script: &'a QueryScript,
    params: &'a ExecuteParams,
    dialect: &'a DialectDescriptor,
}

/// Render `script` with `params` for `dialect` in the given mode
pub fn render(
    script: &QueryScript,
    params: &ExecuteParams,
    dialect: &DialectDescriptor,
    mode: RenderMode,
) -> AdapterResult<String> {
    SqlScriptRender::new(script, params, dialect).render(mode)
}

impl<'a> SqlScriptRender<'a> {
    pub fn new(
        script: &'a QueryScript,
        params: &'a ExecuteParams,
        dialect: &'a DialectDescriptor,
    ) -> Self {
        Self {
            script,
            params,
            dialect,
        }
    }

    pub fn render(&self, mode: RenderMode) -> AdapterResult<String> {
        let source = self.render_script()?;
        match mode {
            RenderMode::ScriptOnly => Ok(source),
            RenderMode::Plain => self.render_select(source, false),
            RenderMode::Paginated => self.render_select(source, self.dialect.supports_paging()),
            RenderMode::CountOnly => {
                let inner = self.render_select(source, false)?;
                Ok(format!("SELECT COUNT(*) FROM ({}) {}", inner, COUNT_ALIAS))
            }
        }
    }

    /// Substitute `$name$` placeholders outside literals and comments
    ///
    /// Trailing terminators and comments are dropped so the result can be
    /// wrapped as a derived table.
    fn render_script(&self) -> AdapterResult<String> {
        let mut sql = String::with_capacity(self.script.script.len());
        let mut significant = 0;
        let mut rest = self.script.script.as_str();

        while !rest.is_empty() {
            let (token, len) = next_token(rest, self.dialect);
            match token {
                Token::Comment => sql.push_str(&rest[..len]),
                Token::Placeholder(name) => {
                    let variable = self.script.variable(name).ok_or_else(|| {
                        AdapterError::Render(format!(
                            "script references undefined variable '{}'",
                            name
                        ))
                    })?;
                    sql.push_str(&render_variable(variable, self.dialect)?);
                    significant = sql.len();
                }
                Token::Quoted => {
                    sql.push_str(&rest[..len]);
                    significant = sql.len();
                }
                Token::Char(ch) => {
                    sql.push(ch);
                    if ch != ';' && !ch.is_whitespace() {
                        significant = sql.len();
                    }
                }
            }
            rest = &rest[len..];
        }

        sql.truncate(significant);
        let trimmed = sql.trim_start();
        if trimmed.is_empty() {
            return Err(AdapterError::Render("script is empty".to_string()));
        }
        Ok(trimmed.to_string())
    }

    fn render_select(&self, source: String, paginate: bool) -> AdapterResult<String> {
        if !self.params.has_operations() && !paginate {
            return Ok(source);
        }

        let mut sql = format!("SELECT {} FROM ({})", self.select_items()?.join(", "), source);
        if self.dialect.table_alias_as {
            sql.push_str(" AS ");
        } else {
            sql.push(' ');
        }
        sql.push_str(SOURCE_ALIAS);

        let (having, filters): (Vec<&FilterOperator>, Vec<&FilterOperator>) = self
            .params
            .filters
            .iter()
            .partition(|f| f.aggregate.is_some());

        if !filters.is_empty() {
            let conditions = filters
                .iter()
                .map(|f| self.render_condition(f))
                .collect::<AdapterResult<Vec<_>>>()?;
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        if !self.params.groups.is_empty() {
            let groups: Vec<String> = self
                .params
                .groups
                .iter()
                .map(|g| self.dialect.quote_identifier(&g.column))
                .collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&groups.join(", "));
        }

        if !having.is_empty() {
            let conditions = having
                .iter()
                .map(|f| self.render_condition(f))
                .collect::<AdapterResult<Vec<_>>>()?;
            sql.push_str(" HAVING ");
            sql.push_str(&conditions.join(" AND "));
        }

        if !self.params.orders.is_empty() {
            let orders: Vec<String> = self
                .params
                .orders
                .iter()
                .map(|o| {
                    let expr = match o.aggregate {
                        Some(f) => self.aggregate_expr(f, &o.column),
                        None => self.dialect.quote_identifier(&o.column),
                    };
                    match o.direction {
                        SortDirection::Asc => format!("{} ASC", expr),
                        SortDirection::Desc => format!("{} DESC", expr),
                    }
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&orders.join(", "));
        }

        if paginate {
            self.params.page_info.validate()?;
            let size = self.params.page_info.page_size;
            let offset = self.params.page_info.offset();
            match self.dialect.pagination {
                PaginationStyle::LimitOffset => {
                    sql.push_str(&format!(" LIMIT {} OFFSET {}", size, offset));
                }
                PaginationStyle::OffsetFetch => {
                    sql.push_str(&format!(
                        " OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
                        offset, size
                    ));
                }
                PaginationStyle::None => {}
            }
        }

        Ok(sql)
    }

    /// Selectors, then group columns not already selected, then aggregates
    fn select_items(&self) -> AdapterResult<Vec<String>> {
        let mut items = Vec::new();
        for selector in &self.params.selectors {
            if selector.column == "*" {
                if selector.alias.is_some() {
                    return Err(AdapterError::Render(
                        "selector '*' cannot take an alias".to_string(),
                    ));
                }
                items.push("*".to_string());
                continue;
            }
            let column = self.dialect.quote_identifier(&selector.column);
            match &selector.alias {
                Some(alias) => items.push(format!(
                    "{} AS {}",
                    column,
                    self.dialect.quote_identifier(alias)
                )),
                None => items.push(column),
            }
        }
        for group in &self.params.groups {
            if !self.params.selectors.iter().any(|s| s.column == group.column) {
                items.push(self.dialect.quote_identifier(&group.column));
            }
        }
        for aggregator in &self.params.aggregators {
            items.push(self.render_aggregator(aggregator));
        }
        if items.is_empty() {
            items.push("*".to_string());
        }
        Ok(items)
    }

    fn aggregate_expr(&self, function: AggregateFunction, column: &str) -> String {
        let operand = if column == "*" {
            "*".to_string()
        } else {
            self.dialect.quote_identifier(column)
        };
        match function {
            AggregateFunction::CountDistinct => format!("COUNT(DISTINCT {})", operand),
            f => format!("{}({})", f.name(), operand),
        }
    }

    fn render_aggregator(&self, aggregator: &AggregateOperator) -> String {
        format!(
            "{} AS {}",
            self.aggregate_expr(aggregator.function, &aggregator.column),
            self.dialect.quote_identifier(&aggregator.output_name())
        )
    }

    fn render_condition(&self, filter: &FilterOperator) -> AdapterResult<String> {
        let column = match filter.aggregate {
            Some(f) => self.aggregate_expr(f, &filter.column),
            None => self.dialect.quote_identifier(&filter.column),
        };
        let values = filter
            .values
            .iter()
            .map(|v| render_literal(&v.value, v.value_type, self.dialect))
            .collect::<AdapterResult<Vec<_>>>()?;

        let expect = |n: usize| -> AdapterResult<()> {
            if values.len() == n {
                Ok(())
            } else {
                Err(AdapterError::Render(format!(
                    "filter {:?} on '{}' expects {} value(s), got {}",
                    filter.operator,
                    filter.column,
                    n,
                    values.len()
                )))
            }
        };

        let binary = |op: &str| -> AdapterResult<String> {
            expect(1)?;
            Ok(format!("{} {} {}", column, op, values[0]))
        };

        match filter.operator {
            SqlOperator::Equals => binary("="),
            SqlOperator::NotEquals => binary("<>"),
            SqlOperator::GreaterThan => binary(">"),
            SqlOperator::GreaterThanOrEqual => binary(">="),
            SqlOperator::LessThan => binary("<"),
            SqlOperator::LessThanOrEqual => binary("<="),
            SqlOperator::Like => binary("LIKE"),
            SqlOperator::NotLike => binary("NOT LIKE"),
            SqlOperator::In | SqlOperator::NotIn => {
                if values.is_empty() {
                    return Err(AdapterError::Render(format!(
                        "filter {:?} on '{}' needs at least one value",
                        filter.operator, filter.column
                    )));
                }
                let op = if filter.operator == SqlOperator::In {
                    "IN"
                } else {
                    "NOT IN"
                };
                Ok(format!("{} {} ({})", column, op, values.join(", ")))
            }
            SqlOperator::IsNull => {
                expect(0)?;
                Ok(format!("{} IS NULL", column))
            }
            SqlOperator::IsNotNull => {
                expect(0)?;
                Ok(format!("{} IS NOT NULL", column))
            }
            SqlOperator::Between => {
                expect(2)?;
                Ok(format!("{} BETWEEN {} AND {}", column, values[0], values[1]))
            }
        }
    }
}
