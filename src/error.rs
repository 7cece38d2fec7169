// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Category, Subcategory};

/// Errors raised by the aggregation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpendError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Budget for {subcategory} must be positive, got {amount}")]
    NonPositiveBudget {
        subcategory: Subcategory,
        amount: Decimal,
    },

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Amount overflow: totals exceed the supported range")]
    AmountOverflow,
}

/// Why a raw transaction row could not be turned into a typed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowIssue {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("invalid split flag '{0}'")]
    InvalidSplit(String),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("unknown subcategory '{0}'")]
    UnknownSubcategory(String),

    #[error("subcategory {subcategory} does not belong to category {category}")]
    Mismatch {
        category: Category,
        subcategory: Subcategory,
    },
}

impl RowIssue {
    /// Short machine-friendly label, used by `doctor`.
    pub fn code(&self) -> &'static str {
        match self {
            RowIssue::InvalidDate(_) => "invalid_date",
            RowIssue::InvalidAmount(_) => "invalid_amount",
            RowIssue::InvalidSplit(_) => "invalid_split",
            RowIssue::UnknownCategory(_) => "unknown_category",
            RowIssue::UnknownSubcategory(_) => "unknown_subcategory",
            RowIssue::Mismatch { .. } => "subcategory_mismatch",
        }
    }
}
