// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart lines for each holding plus a synthetic "overall" line.
//!
//! Holdings are merged on the union of their observed timestamps: a holding
//! contributes nothing at times it has no point for, whatever its offset or
//! length in the price cadence.

use super::align::AlignedSeries;
use super::color::Rgb;
use super::ledger::{buy_cost_as_of, is_sold};
use super::SeriesPoint;
use crate::error::AnalyticsError;
use crate::models::{Holding, HoldingId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use tracing::debug;

pub const OVERALL_LINE_ID: &str = "overall";

const PALETTE: [Rgb; 10] = [
    Rgb(31, 119, 180),
    Rgb(255, 127, 14),
    Rgb(44, 160, 44),
    Rgb(214, 39, 40),
    Rgb(148, 103, 189),
    Rgb(140, 86, 75),
    Rgb(227, 119, 194),
    Rgb(127, 127, 127),
    Rgb(188, 189, 34),
    Rgb(23, 190, 207),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    #[default]
    Absolute,
    Roi,
    Price,
}

impl LineMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LineMode::Absolute => "absolute",
            LineMode::Roi => "roi",
            LineMode::Price => "price",
        }
    }
}

impl FromStr for LineMode {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" | "value" => Ok(LineMode::Absolute),
            "roi" => Ok(LineMode::Roi),
            "price" => Ok(LineMode::Price),
            other => Err(AnalyticsError::UnsupportedLineMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineRequest {
    pub mode: LineMode,
    pub view_sold: bool,
    /// Simplify each line down to at most this many points.
    pub max_points: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub id: String,
    pub color: Rgb,
    pub data: Vec<SeriesPoint>,
}

fn roi(value: Decimal, cost: Decimal) -> Decimal {
    if cost.is_zero() || value.is_zero() {
        return Decimal::ZERO;
    }
    (value - cost)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|n| n.checked_div(cost))
        .unwrap_or(Decimal::ZERO)
}

fn visible(holdings: &[Holding], view_sold: bool) -> impl Iterator<Item = (usize, &Holding)> {
    holdings
        .iter()
        .enumerate()
        .filter(move |(_, h)| view_sold || !is_sold(&h.transactions, &h.stock_splits))
}

/// Portfolio value over the union of observed times.
pub fn overall_value_series(
    holdings: &[Holding],
    aligned: &HashMap<HoldingId, AlignedSeries>,
    view_sold: bool,
) -> Vec<SeriesPoint> {
    let mut totals: BTreeMap<DateTime<Utc>, Decimal> = BTreeMap::new();
    for (_, h) in visible(holdings, view_sold) {
        for p in aligned.get(&h.id).into_iter().flatten() {
            *totals.entry(p.time).or_insert(Decimal::ZERO) += p.value;
        }
    }
    totals.into_iter().collect()
}

fn overall_roi_series(
    holdings: &[Holding],
    aligned: &HashMap<HoldingId, AlignedSeries>,
    view_sold: bool,
) -> Vec<SeriesPoint> {
    let mut totals: BTreeMap<DateTime<Utc>, (Decimal, Decimal)> = BTreeMap::new();
    for (_, h) in visible(holdings, view_sold) {
        for p in aligned.get(&h.id).into_iter().flatten() {
            let entry = totals
                .entry(p.time)
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            let cost = buy_cost_as_of(p.time.date_naive(), &h.transactions);
            if cost.is_zero() || p.value.is_zero() {
                continue;
            }
            entry.0 += p.value;
            entry.1 += cost;
        }
    }
    totals
        .into_iter()
        .map(|(t, (value, cost))| (t, roi(value, cost)))
        .collect()
}

fn holding_series(
    holding: &Holding,
    aligned: &AlignedSeries,
    mode: LineMode,
) -> Vec<SeriesPoint> {
    aligned
        .iter()
        .map(|p| {
            let y = match mode {
                LineMode::Absolute => p.value,
                LineMode::Price => p.price,
                LineMode::Roi => roi(
                    p.value,
                    buy_cost_as_of(p.time.date_naive(), &holding.transactions),
                ),
            };
            (p.time, y)
        })
        .collect()
}

/// One line per visible holding, then the overall line (absent in price
/// mode, where a per-unit price has no portfolio meaning).
pub fn compose_lines(
    holdings: &[Holding],
    aligned: &HashMap<HoldingId, AlignedSeries>,
    request: LineRequest,
) -> Vec<Line> {
    let empty = AlignedSeries::new();
    let mut lines: Vec<Line> = visible(holdings, request.view_sold)
        .map(|(i, h)| Line {
            id: h.id.to_string(),
            color: PALETTE[i % PALETTE.len()],
            data: holding_series(h, aligned.get(&h.id).unwrap_or(&empty), request.mode),
        })
        .collect();

    let overall = match request.mode {
        LineMode::Absolute => Some(overall_value_series(holdings, aligned, request.view_sold)),
        LineMode::Roi => Some(overall_roi_series(holdings, aligned, request.view_sold)),
        LineMode::Price => None,
    };
    if let Some(data) = overall {
        lines.push(Line {
            id: OVERALL_LINE_ID.to_string(),
            color: Rgb::BLACK,
            data,
        });
    }

    if let Some(max_points) = request.max_points {
        for line in lines.iter_mut() {
            line.data = simplify(&line.data, max_points);
        }
    }

    debug!(
        lines = lines.len(),
        mode = request.mode.as_str(),
        view_sold = request.view_sold,
        "composed chart lines"
    );
    lines
}

/// Drop the point closest in time to its predecessor until at most
/// `target` points remain. The first and last points always survive, so
/// targets below 2 behave as 2.
pub fn simplify(data: &[SeriesPoint], target: usize) -> Vec<SeriesPoint> {
    let target = target.max(2);
    let mut out = data.to_vec();
    while out.len() > target {
        let closest = (1..out.len() - 1)
            .map(|i| (i, out[i].0 - out[i - 1].0))
            .min_by_key(|(_, gap)| *gap);
        let Some((i, _)) = closest else {
            break;
        };
        out.remove(i);
    }
    out
}
