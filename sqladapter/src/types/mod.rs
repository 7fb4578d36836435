// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Dialect-independent data model
//!
//! This module provides:
//! - Raw cell values as reported by drivers
//! - Logical value types and column definitions
//! - Typed tabular results with optional page info
//! - Native type name mapping

pub mod column;
pub mod dataframe;
pub mod page;
pub mod type_mapping;
pub mod value;

pub use column::{Column, ValueType};
pub use dataframe::{Dataframe, Row};
pub use page::PageInfo;
pub use type_mapping::sql_type_to_value_type;
pub use value::Value;
