// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Pagination strategies
//!
//! Native: the rendered SQL already carries LIMIT/OFFSET (or OFFSET/FETCH)
//! and every returned row belongs to the page.
//!
//! Emulated: the un-paginated SQL runs and the cursor is moved to the first
//! row of the page, either with absolute positioning when the driver
//! advertises it or by skipping rows one at a time, then at most `page_size`
//! rows are read.
//!
//! The total is fetched by a separate count query on its own connection, so
//! concurrent writes between the two round trips can make it disagree with
//! the page content.

use super::materializer::materialize;
use super::{AdapterError, AdapterResult};
use crate::config::DEFAULT_MAX_FETCH_SIZE;
use crate::driver::{with_cursor, Capabilities, DataSource, QueryOptions};
use crate::types::{Dataframe, PageInfo, Value};
use log::debug;

/// How a page is cut out of the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingStrategy {
    Native,
    Emulated,
}

/// Runs page, full and count queries against a data source
///
/// Every query opens its own connection and releases it before returning.
pub struct PaginationExecutor<'a> {
    source: &'a dyn DataSource,
    capabilities: Capabilities,
    max_fetch_size: usize,
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

impl<'a> PaginationExecutor<'a> {
    pub fn new(source: &'a dyn DataSource, capabilities: Capabilities) -> Self {
        Self {
            source,
            capabilities,
            max_fetch_size: DEFAULT_MAX_FETCH_SIZE,
        }
    }

    pub fn with_max_fetch_size(mut self, max_fetch_size: usize) -> Self {
        self.max_fetch_size = max_fetch_size.max(1);
        self
    }

    /// Run `sql` and materialize every row, up to `row_cap`
    pub fn execute(&self, sql: &str, row_cap: usize) -> AdapterResult<Dataframe> {
        debug!("Executing: {}", sql);
        let mut conn = self.source.connect()?;
        with_cursor(conn.as_mut(), sql, &QueryOptions::default(), |cursor| {
            materialize(cursor, row_cap)
        })
    }

    /// Run un-paginated `sql` and cut the requested page out of its cursor
    pub fn execute_page(&self, sql: &str, page_info: &PageInfo) -> AdapterResult<Dataframe> {
        page_info.validate()?;
        let page_size = to_usize(page_info.page_size);
        let offset = page_info.offset();
        let options = QueryOptions {
            fetch_size: Some(page_size.min(self.max_fetch_size)),
        };
        debug!(
            "Executing with emulated paging (offset {}, size {}): {}",
            offset, page_size, sql
        );

        let mut conn = self.source.connect()?;
        with_cursor(conn.as_mut(), sql, &options, |cursor| {
            if offset > 0 {
                if self.capabilities.absolute_positioning {
                    cursor.position_at(offset).map_err(|e| {
                        AdapterError::execution(sql, format!("cursor positioning failed: {}", e))
                    })?;
                } else {
                    let mut skipped = 0u64;
                    while skipped < offset && cursor.skip_row()? {
                        skipped += 1;
                    }
                }
            }
            materialize(cursor, page_size)
        })
    }

    /// Run a count-only query and read its single cell
    pub fn count(&self, count_sql: &str) -> AdapterResult<u64> {
        debug!("Counting: {}", count_sql);
        let mut conn = self.source.connect()?;
        with_cursor(conn.as_mut(), count_sql, &QueryOptions::default(), |cursor| {
            let row = cursor
                .next_row()?
                .ok_or_else(|| AdapterError::execution(count_sql, "count query returned no rows"))?;
            row.first().and_then(Value::as_count).ok_or_else(|| {
                AdapterError::execution(
                    count_sql,
                    format!("count query returned a non-count value {:?}", row.first()),
                )
            })
        })
    }

    /// Fetch one page with the given strategy, filling `page_info.total` when requested
    ///
    /// `count_sql` must be given when `page_info.count_total` is set.
    pub fn fetch_page(
        &self,
        strategy: PagingStrategy,
        sql: &str,
        count_sql: Option<&str>,
        page_info: &mut PageInfo,
    ) -> AdapterResult<Dataframe> {
        let mut dataframe = match strategy {
            PagingStrategy::Native => self.execute(sql, to_usize(page_info.page_size))?,
            PagingStrategy::Emulated => self.execute_page(sql, page_info)?,
        };

        if page_info.count_total {
            let count_sql = count_sql.ok_or_else(|| {
                AdapterError::InvalidParam("total requested without a count query".to_string())
            })?;
            page_info.total = Some(self.count(count_sql)?);
        }
        dataframe.set_page_info(*page_info);
        Ok(dataframe)
    }
}
