// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Point-in-time projections of a holding's transaction ledger.
//!
//! Unit counts are rebased through stock splits; cost figures are not, since
//! the cash paid for a lot does not change when the lot is split.

use super::split::rebase_multiplier;
use crate::error::AnalyticsError;
use crate::models::{FundTransaction, StockSplit};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

const UNIT_DP: u32 = 4;

/// Which transactions of a holding take part in a computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedgerScope {
    #[default]
    All,
    ExcludePensions,
    PensionsOnly,
}

impl LedgerScope {
    pub fn includes(self, t: &FundTransaction) -> bool {
        match self {
            LedgerScope::All => true,
            LedgerScope::ExcludePensions => !t.is_pension,
            LedgerScope::PensionsOnly => t.is_pension,
        }
    }

    pub fn apply(self, transactions: &[FundTransaction]) -> Cow<'_, [FundTransaction]> {
        match self {
            LedgerScope::All => Cow::Borrowed(transactions),
            _ => Cow::Owned(
                transactions
                    .iter()
                    .filter(|t| self.includes(t))
                    .cloned()
                    .collect(),
            ),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LedgerScope::All => "all",
            LedgerScope::ExcludePensions => "exclude-pensions",
            LedgerScope::PensionsOnly => "pensions-only",
        }
    }
}

impl FromStr for LedgerScope {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LedgerScope::All),
            "exclude-pensions" | "no-pensions" => Ok(LedgerScope::ExcludePensions),
            "pensions-only" | "pensions" => Ok(LedgerScope::PensionsOnly),
            other => Err(AnalyticsError::UnsupportedScope(other.to_string())),
        }
    }
}

/// Units held on `date`, with earlier lots rebased through any splits in
/// between. Rounded to 4 dp to absorb split-ratio drift.
pub fn units_as_of(
    date: NaiveDate,
    transactions: &[FundTransaction],
    splits: &[StockSplit],
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.date <= date)
        .map(|t| t.units * rebase_multiplier(t.date, date, splits))
        .sum::<Decimal>()
        .round_dp(UNIT_DP)
}

/// Units held after every transaction and split on record.
pub fn units_held(transactions: &[FundTransaction], splits: &[StockSplit]) -> Decimal {
    units_as_of(NaiveDate::MAX, transactions, splits)
}

/// Net cash put into the holding over its whole history (sells reduce it).
pub fn net_cost(transactions: &[FundTransaction]) -> Decimal {
    transactions.iter().map(FundTransaction::cost).sum()
}

fn buy_leg_cost(t: &FundTransaction) -> Decimal {
    if t.is_drip {
        // reinvested dividends: the units are free, charges are not
        t.fees + t.taxes
    } else {
        t.cost()
    }
}

/// Cost basis: cash spent on buys only.
pub fn buy_cost(transactions: &[FundTransaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_buy())
        .map(buy_leg_cost)
        .sum()
}

/// Cost basis attributable to buys dated on or before `date`.
pub fn buy_cost_as_of(date: NaiveDate, transactions: &[FundTransaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_buy() && t.date <= date)
        .map(buy_leg_cost)
        .sum()
}

/// Cash returned to the investor by sells.
pub fn realized_value(transactions: &[FundTransaction]) -> Decimal {
    -transactions
        .iter()
        .filter(|t| t.is_sell())
        .map(FundTransaction::cost)
        .sum::<Decimal>()
}

/// A holding is sold once every unit has gone; an empty ledger is simply
/// not a position yet.
pub fn is_sold(transactions: &[FundTransaction], splits: &[StockSplit]) -> bool {
    !transactions.is_empty() && units_held(transactions, splits).is_zero()
}
