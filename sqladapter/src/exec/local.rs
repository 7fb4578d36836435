// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Local aggregation collaborator

use super::AdapterResult;
use crate::render::ExecuteParams;
use crate::types::Dataframe;

/// In-process engine that aggregates and pages full source data
///
/// The adapter hands over one named table holding the complete script
/// result and returns the aggregator's output unchanged.
pub trait LocalAggregator: Send + Sync {
    fn execute_local_aggregation(
        &self,
        name: Option<&str>,
        params: &ExecuteParams,
        tables: Vec<Dataframe>,
    ) -> AdapterResult<Dataframe>;
}
