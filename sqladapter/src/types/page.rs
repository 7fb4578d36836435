// Copyright (c) 2024-2025 SqlAdapter Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Pagination request/response state

use crate::exec::{AdapterError, AdapterResult};
use serde::{Deserialize, Serialize};

/// Page request plus the total row count once it is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based page number
    pub page_no: u64,
    pub page_size: u64,
    /// Whether the caller wants `total` filled by a count query
    pub count_total: bool,
    /// Total row count; `None` until the count query has run
    #[serde(default)]
    pub total: Option<u64>,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            page_no: 1,
            page_size: 100,
            count_total: false,
            total: None,
        }
    }
}

impl PageInfo {
    pub fn new(page_no: u64, page_size: u64, count_total: bool) -> Self {
        Self {
            page_no,
            page_size,
            count_total,
            total: None,
        }
    }

    /// Number of rows preceding the requested page
    pub fn offset(&self) -> u64 {
        self.page_no.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn validate(&self) -> AdapterResult<()> {
        if self.page_no < 1 {
            return Err(AdapterError::InvalidParam(format!(
                "page number must be >= 1, got {}",
                self.page_no
            )));
        }
        if self.page_size == 0 {
            return Err(AdapterError::InvalidParam(
                "page size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
