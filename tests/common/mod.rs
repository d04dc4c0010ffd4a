// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use fundclip::models::{
    FundSnapshot, FundTransaction, Holding, HoldingId, PriceCache, PriceHistory, StockSplit,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

pub const DAY: i64 = 86_400;
// 2024-01-01T00:00:00Z
pub const JAN_1: i64 = 1_704_067_200;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

pub fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

pub fn txn(date: NaiveDate, units: i64, price: i64) -> FundTransaction {
    FundTransaction {
        date,
        units: dec(units),
        price: dec(price),
        fees: Decimal::ZERO,
        taxes: Decimal::ZERO,
        is_drip: false,
        is_pension: false,
    }
}

pub fn split(date: NaiveDate, ratio: i64) -> StockSplit {
    StockSplit {
        date,
        ratio: dec(ratio),
    }
}

pub fn holding(id: HoldingId, transactions: Vec<FundTransaction>) -> Holding {
    Holding {
        id,
        name: format!("Fund {}", id),
        allocation_target: None,
        transactions,
        stock_splits: vec![],
    }
}

/// Daily cadence from 2024-01-01 with `ticks` entries.
pub fn daily_cache(ticks: i64, prices: Vec<(HoldingId, usize, Vec<i64>)>) -> PriceCache {
    let mut map = HashMap::new();
    for (id, start_index, values) in prices {
        map.insert(
            id,
            PriceHistory {
                start_index,
                values: values.into_iter().map(dec).collect(),
            },
        );
    }
    PriceCache {
        start_time: JAN_1,
        cache_times: (0..ticks).map(|i| i * DAY).collect(),
        prices: map,
    }
}

pub fn snapshot(holdings: Vec<Holding>, price_cache: PriceCache) -> FundSnapshot {
    FundSnapshot {
        holdings,
        price_cache,
    }
}
