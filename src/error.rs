// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::HoldingId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Unsupported period unit '{0}', expected week or month")]
    UnsupportedPeriodUnit(String),

    #[error("Invalid resolution '{0}'")]
    InvalidResolution(String),

    #[error("Unsupported line mode '{0}', expected absolute, roi or price")]
    UnsupportedLineMode(String),

    #[error("Unsupported ledger scope '{0}', expected all, exclude-pensions or pensions-only")]
    UnsupportedScope(String),

    #[error("Holding {0} not found")]
    UnknownHolding(HoldingId),
}
