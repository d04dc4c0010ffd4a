// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-holding gain summaries and the portfolio-wide totals built from them.
//!
//! Amounts are in minor currency units, so absolute gains round to a whole
//! unit while fractional gains keep four places.

use super::align::AlignedSeries;
use super::color::Rgb;
use super::ledger::{LedgerScope, buy_cost, is_sold, realized_value, units_as_of};
use super::safe_ratio;
use crate::models::Holding;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

pub const DEFAULT_UP_COLOR: Rgb = Rgb(0, 153, 51);
pub const DEFAULT_DOWN_COLOR: Rgb = Rgb(204, 0, 0);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GainSummary {
    pub value: Decimal,
    pub units: Decimal,
    pub cost: Decimal,
    pub realized: Decimal,
    pub gain: Decimal,
    pub gain_abs: Decimal,
    pub day_gain: Decimal,
    pub day_gain_abs: Decimal,
    pub color: Rgb,
}

/// Summarise a holding as of `today`. `None` until the holding has a price.
pub fn summarize(
    holding: &Holding,
    aligned: &AlignedSeries,
    today: NaiveDate,
) -> Option<GainSummary> {
    summarize_scoped(holding, aligned, today, LedgerScope::All)
}

pub fn summarize_scoped(
    holding: &Holding,
    aligned: &AlignedSeries,
    today: NaiveDate,
    scope: LedgerScope,
) -> Option<GainSummary> {
    let latest_price = aligned.last()?.price;
    let yesterday_price = aligned
        .len()
        .checked_sub(2)
        .and_then(|i| aligned.get(i))
        .map_or(latest_price, |p| p.price);

    let transactions = scope.apply(&holding.transactions);
    let units = units_as_of(today, &transactions, &holding.stock_splits);

    // same units both days, so the day gain isolates the price move
    let paper_value = latest_price * units;
    let yesterday_paper_value = yesterday_price * units;

    let cost = buy_cost(&transactions);
    let realized = realized_value(&transactions);
    let value = if is_sold(&transactions, &holding.stock_splits) {
        paper_value + realized
    } else {
        paper_value
    };

    let gain_abs = (realized + paper_value - cost).round();
    let day_gain_abs = (paper_value - yesterday_paper_value).round();

    Some(GainSummary {
        value,
        units,
        cost,
        realized,
        gain: safe_ratio(gain_abs, cost),
        gain_abs,
        day_gain: safe_ratio(day_gain_abs, cost),
        day_gain_abs,
        color: Rgb::WHITE,
    })
}

/// Diverging colour scale normalised to the most extreme gain and loss in
/// the current portfolio, so those two are always fully saturated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainColorScale {
    pub min_gain: Decimal,
    pub max_gain: Decimal,
    pub up: Rgb,
    pub down: Rgb,
}

impl GainColorScale {
    pub fn from_gains<I>(gains: I, up: Rgb, down: Rgb) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        let (min_gain, max_gain) = gains
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(lo, hi), g| {
                (lo.min(g), hi.max(g))
            });
        Self {
            min_gain,
            max_gain,
            up,
            down,
        }
    }

    pub fn color_for(&self, gain: Decimal) -> Rgb {
        let (target, extreme) = if gain > Decimal::ZERO {
            (self.up, self.max_gain)
        } else if gain < Decimal::ZERO {
            (self.down, self.min_gain)
        } else {
            return Rgb::WHITE;
        };
        let t = safe_ratio(gain, extreme).to_f64().unwrap_or(0.0);
        Rgb::WHITE.mix(target, t)
    }
}

/// Colour every summary against the spread of gains among them.
pub fn apply_colors<'a, I>(summaries: I, up: Rgb, down: Rgb)
where
    I: IntoIterator<Item = &'a mut GainSummary>,
{
    let mut summaries: Vec<&mut GainSummary> = summaries.into_iter().collect();
    let scale = GainColorScale::from_gains(summaries.iter().map(|s| s.gain), up, down);
    for s in summaries.iter_mut() {
        s.color = scale.color_for(s.gain);
    }
}

/// Top-line figures: what the portfolio is worth and how it moved today.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub value: Decimal,
    pub cost: Decimal,
    pub realized: Decimal,
    pub gain: Decimal,
    pub gain_abs: Decimal,
    pub day_gain: Decimal,
    pub day_gain_abs: Decimal,
}

impl PortfolioTotals {
    pub fn from_summaries<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a GainSummary>,
    {
        let mut totals = summaries
            .into_iter()
            .fold(PortfolioTotals::default(), |mut acc, s| {
                acc.value += s.value;
                acc.cost += s.cost;
                acc.realized += s.realized;
                acc.gain_abs += s.gain_abs;
                acc.day_gain_abs += s.day_gain_abs;
                acc
            });
        totals.gain = safe_ratio(totals.gain_abs, totals.cost);
        totals.day_gain = safe_ratio(totals.day_gain_abs, totals.cost);
        totals
    }
}
