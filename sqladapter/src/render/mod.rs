// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! SQL rendering
//!
//! This module provides:
//! - Query scripts with `$name$` variables and an optional declared schema
//! - Execute params: projection, aggregation, filters, grouping, ordering, paging
//! - Typed literal rendering
//! - The renderer producing script-only, plain, paginated and count-only SQL

pub mod literal;
pub mod params;
pub mod script;
pub mod sql_render;

pub use literal::{render_literal, render_variable};
pub use params::{
    AggregateFunction, AggregateOperator, ExecuteParams, FilterOperator, GroupByOperator,
    OrderOperator, SelectColumn, SingleTypedValue, SortDirection, SqlOperator,
};
pub use script::{QueryScript, ScriptVariable};
pub use sql_render::{render, RenderMode, SqlScriptRender};
