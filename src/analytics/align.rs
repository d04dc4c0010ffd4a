// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ledger::{LedgerScope, units_as_of};
use crate::models::{Holding, PriceCache};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One cadence tick of a holding: the scraped price and the position held
/// at that moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPoint {
    pub time: DateTime<Utc>,
    pub price: Decimal,
    pub units: Decimal,
    pub value: Decimal, // price * units
}

/// Ticks a holding has prices for, ascending. Series of different holdings
/// start at different ticks and have different lengths; merge them on
/// `time`, never by index.
pub type AlignedSeries = Vec<AlignedPoint>;

pub fn align(holding: &Holding, cache: &PriceCache) -> AlignedSeries {
    align_scoped(holding, cache, LedgerScope::All)
}

/// Align a holding's scraped prices against the shared cadence, projecting
/// only the transactions `scope` admits.
pub fn align_scoped(holding: &Holding, cache: &PriceCache, scope: LedgerScope) -> AlignedSeries {
    let Some(history) = cache.prices.get(&holding.id) else {
        trace!(holding_id = holding.id, "no scraped prices yet");
        return Vec::new();
    };
    let transactions = scope.apply(&holding.transactions);

    history
        .values
        .iter()
        .enumerate()
        .filter_map(|(i, price)| {
            let time = cache.time_at(history.start_index + i)?;
            let units = units_as_of(time.date_naive(), &transactions, &holding.stock_splits);
            Some(AlignedPoint {
                time,
                price: *price,
                units,
                value: *price * units,
            })
        })
        .collect()
}
