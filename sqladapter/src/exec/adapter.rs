// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Execution orchestrator
//!
//! A [`SourceAdapter`] binds one data source to its configuration and decides,
//! per call, whether the query is rendered and paged on the source or fetched
//! in full and handed to the local aggregator.

use super::local::LocalAggregator;
use super::pagination::{PaginationExecutor, PagingStrategy};
use super::{AdapterError, AdapterResult};
use crate::config::AdapterConfig;
use crate::dialect::{global_resolver, DialectResolution};
use crate::driver::{Capabilities, DataSource};
use crate::metadata::MetadataIntrospector;
use crate::render::{ExecuteParams, QueryScript, RenderMode, SqlScriptRender};
use crate::types::{Column, Dataframe};
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Entry point for running query scripts against one source
pub struct SourceAdapter {
    config: AdapterConfig,
    source: Arc<dyn DataSource>,
    local: Option<Arc<dyn LocalAggregator>>,
    dialect: OnceCell<Arc<DialectResolution>>,
    capabilities: OnceCell<Capabilities>,
}

impl SourceAdapter {
    pub fn new(config: AdapterConfig, source: Arc<dyn DataSource>) -> AdapterResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            local: None,
            dialect: OnceCell::new(),
            capabilities: OnceCell::new(),
        })
    }

    /// Adapter over the bundled SQLite driver, reading the path from `properties.url`
    #[cfg(feature = "sqlite")]
    pub fn sqlite(config: AdapterConfig) -> AdapterResult<Self> {
        if config.properties.url.trim().is_empty() {
            return Err(AdapterError::Config(
                "properties.url must name a SQLite database".to_string(),
            ));
        }
        let source = crate::driver::SqliteDataSource::new(config.properties.url.clone());
        Self::new(config, Arc::new(source))
    }

    pub fn with_local_aggregator(mut self, aggregator: Arc<dyn LocalAggregator>) -> Self {
        self.local = Some(aggregator);
        self
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Resolved dialect of this source, computed once
    pub fn dialect(&self) -> Arc<DialectResolution> {
        self.dialect
            .get_or_init(|| {
                let resolution = global_resolver().resolve(&self.config.driver);
                for warning in &resolution.warnings {
                    warn!("Dialect resolution: {}", warning);
                }
                debug!(
                    "Source '{}' uses dialect '{}'",
                    self.config.driver.db_type, resolution.descriptor.name
                );
                resolution
            })
            .clone()
    }

    /// Driver capabilities, queried once
    pub fn capabilities(&self) -> Capabilities {
        *self.capabilities.get_or_init(|| self.source.capabilities())
    }

    fn executor(&self) -> PaginationExecutor<'_> {
        PaginationExecutor::new(self.source.as_ref(), self.capabilities())
            .with_max_fetch_size(self.config.max_fetch_size)
    }

    fn introspector(&self) -> MetadataIntrospector<'_> {
        MetadataIntrospector::new(self.source.as_ref())
    }

    /// Open and immediately release a connection
    pub fn test_connection(&self) -> AdapterResult<()> {
        let conn = self.source.connect()?;
        drop(conn);
        info!("Connection to '{}' succeeded", self.config.driver.db_type);
        Ok(())
    }

    /// Run a script with the given operations
    ///
    /// On the source path `params.page_info.total` is filled when a total was
    /// requested, and the returned table carries the executed SQL and the
    /// page info. On the local path the aggregator's output is returned as is.
    pub fn execute(
        &self,
        script: &QueryScript,
        params: &mut ExecuteParams,
    ) -> AdapterResult<Dataframe> {
        if params.local_aggregate {
            self.execute_in_local(script, params)
        } else {
            self.execute_on_source(script, params)
        }
    }

    fn execute_on_source(
        &self,
        script: &QueryScript,
        params: &mut ExecuteParams,
    ) -> AdapterResult<Dataframe> {
        let resolution = self.dialect();
        let dialect = &resolution.descriptor;
        params.page_info.validate()?;

        let mut page_info = params.page_info;
        let render = SqlScriptRender::new(script, params, dialect);
        let (sql, strategy) = if dialect.supports_paging() {
            (render.render(RenderMode::Paginated)?, PagingStrategy::Native)
        } else {
            (render.render(RenderMode::Plain)?, PagingStrategy::Emulated)
        };
        let count_sql = if page_info.count_total {
            Some(render.render(RenderMode::CountOnly)?)
        } else {
            None
        };
        debug!("Strategy {:?} for source '{}'", strategy, script.source_id);

        let mut dataframe =
            self.executor()
                .fetch_page(strategy, &sql, count_sql.as_deref(), &mut page_info)?;
        dataframe.set_script(sql);
        params.page_info = page_info;
        Ok(dataframe)
    }

    fn execute_in_local(
        &self,
        script: &QueryScript,
        params: &ExecuteParams,
    ) -> AdapterResult<Dataframe> {
        let aggregator = self
            .local
            .as_ref()
            .ok_or(AdapterError::LocalAggregationUnavailable)?;

        let resolution = self.dialect();
        let sql = SqlScriptRender::new(script, params, &resolution.descriptor)
            .render(RenderMode::ScriptOnly)?;
        debug!("Fetching full result for local aggregation: {}", sql);

        let mut dataframe = self
            .executor()
            .execute(&sql, self.config.effective_row_cap())?;
        for column in dataframe.columns_mut() {
            if let Some(declared) = script.declared_type(&column.name) {
                column.value_type = declared;
            }
        }
        dataframe.set_name(script.to_query_key());
        dataframe.set_script(sql);

        aggregator.execute_local_aggregation(None, params, vec![dataframe])
    }

    /// Run raw SQL without rendering, bounded by the configured row cap
    pub fn execute_sql(&self, sql: &str) -> AdapterResult<Dataframe> {
        let mut dataframe = self.executor().execute(sql, self.config.effective_row_cap())?;
        dataframe.set_script(sql);
        Ok(dataframe)
    }

    pub fn list_catalogs(&self) -> AdapterResult<BTreeSet<String>> {
        self.introspector().list_catalogs()
    }

    pub fn list_tables(&self, catalog: &str) -> AdapterResult<BTreeSet<String>> {
        self.introspector().list_tables(catalog)
    }

    pub fn list_columns(&self, catalog: &str, table: &str) -> AdapterResult<Vec<Column>> {
        self.introspector().list_columns(catalog, table)
    }
}
