// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fund valuation and performance analytics.
//!
//! Every function here is a pure computation over a ledger, a price cache
//! and a point in time. [`report::FundReport`] ties them together for one
//! request and memoizes the aligned series its consumers share.

pub mod align;
pub mod color;
pub mod gain;
pub mod ledger;
pub mod lines;
pub mod ohlc;
pub mod report;
pub mod split;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A `[time, value]` pair on a chart series.
pub type SeriesPoint = (DateTime<Utc>, Decimal);

/// `numerator / denominator` to 4 dp, or zero when the denominator is zero.
pub(crate) fn safe_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .map(|r| r.round_dp(4))
        .unwrap_or(Decimal::ZERO)
}

pub use align::{AlignedPoint, AlignedSeries, align, align_scoped};
pub use gain::{GainColorScale, GainSummary, PortfolioTotals, apply_colors, summarize};
pub use ledger::{LedgerScope, buy_cost, is_sold, realized_value, units_as_of, units_held};
pub use lines::{Line, LineMode, LineRequest, compose_lines, overall_value_series, simplify};
pub use ohlc::{Candlestick, PeriodUnit, Resolution, candlesticks};
pub use report::FundReport;
pub use split::rebase_multiplier;
