// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type HoldingId = i64;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: HoldingId,
    pub name: String,
    #[serde(default)]
    pub allocation_target: Option<Decimal>, // fraction of portfolio, 0..=1
    #[serde(default)]
    pub transactions: Vec<FundTransaction>, // ascending by date
    #[serde(default)]
    pub stock_splits: Vec<StockSplit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTransaction {
    pub date: NaiveDate,
    pub units: Decimal, // >0 buy, <0 sell
    pub price: Decimal,
    #[serde(default)]
    pub fees: Decimal,
    #[serde(default)]
    pub taxes: Decimal,
    #[serde(default)]
    pub is_drip: bool,
    #[serde(default)]
    pub is_pension: bool,
}

impl FundTransaction {
    /// Cash cost of the transaction; negative for sells.
    pub fn cost(&self) -> Decimal {
        self.units * self.price + self.fees + self.taxes
    }

    pub fn is_buy(&self) -> bool {
        self.units > Decimal::ZERO
    }

    pub fn is_sell(&self) -> bool {
        self.units < Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSplit {
    pub date: NaiveDate,
    pub ratio: Decimal,
}

/// Scraped prices shared across holdings: one cadence of offsets from
/// `start_time`, with each holding's values starting at its own index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCache {
    pub start_time: i64,
    pub cache_times: Vec<i64>,
    #[serde(default)]
    pub prices: HashMap<HoldingId, PriceHistory>,
}

impl PriceCache {
    /// Absolute time of cadence tick `index`.
    pub fn time_at(&self, index: usize) -> Option<DateTime<Utc>> {
        let offset = *self.cache_times.get(index)?;
        DateTime::from_timestamp(self.start_time + offset, 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistory {
    pub start_index: usize,
    pub values: Vec<Decimal>,
}

/// Everything the engine needs for one "fund data as of now" request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSnapshot {
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub price_cache: PriceCache,
}

impl FundSnapshot {
    pub fn holding(&self, id: HoldingId) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id == id)
    }
}
