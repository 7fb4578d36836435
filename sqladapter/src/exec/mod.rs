// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Query execution
//!
//! This module provides:
//! - The error type shared by the whole crate
//! - Cursor materialization into dataframes
//! - Native and emulated pagination with optional total counts
//! - The source adapter choosing between source and local execution

pub mod adapter;
pub mod error;
pub mod local;
pub mod materializer;
pub mod pagination;

pub use adapter::SourceAdapter;
pub use error::{AdapterError, AdapterResult};
pub use local::LocalAggregator;
pub use materializer::materialize;
pub use pagination::{PaginationExecutor, PagingStrategy};
