// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::align::{AlignedSeries, align_scoped};
use super::color::Rgb;
use super::gain::{
    DEFAULT_DOWN_COLOR, DEFAULT_UP_COLOR, GainSummary, PortfolioTotals, apply_colors,
    summarize_scoped,
};
use super::ledger::{LedgerScope, is_sold};
use super::lines::{Line, LineRequest, compose_lines, overall_value_series};
use super::ohlc::{Candlestick, Resolution, candlesticks};
use super::{SeriesPoint, safe_ratio};
use crate::error::{AnalyticsError, Result};
use crate::models::{FundSnapshot, HoldingId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

pub type AlignedMap = HashMap<HoldingId, AlignedSeries>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingReport {
    pub id: HoldingId,
    pub name: String,
    pub sold: bool,
    pub gain: Option<GainSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRow {
    pub id: HoldingId,
    pub name: String,
    pub value: Decimal,
    pub target: Option<Decimal>,
    pub actual: Decimal,
    pub drift: Option<Decimal>,
}

/// Analytics for one snapshot at one instant. Nothing scraped after `now`
/// is visible to any consumer.
///
/// Aligned series are computed at most once per ledger scope and shared by
/// every consumer; they live exactly as long as the report.
pub struct FundReport<'a> {
    snapshot: &'a FundSnapshot,
    now: DateTime<Utc>,
    up: Rgb,
    down: Rgb,
    aligned: RefCell<HashMap<LedgerScope, Rc<AlignedMap>>>,
}

impl<'a> FundReport<'a> {
    pub fn new(snapshot: &'a FundSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            snapshot,
            now,
            up: DEFAULT_UP_COLOR,
            down: DEFAULT_DOWN_COLOR,
            aligned: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_colors(mut self, up: Rgb, down: Rgb) -> Self {
        self.up = up;
        self.down = down;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn aligned(&self, scope: LedgerScope) -> Rc<AlignedMap> {
        if let Some(hit) = self.aligned.borrow().get(&scope) {
            trace!(scope = scope.as_str(), "aligned series cache hit");
            return Rc::clone(hit);
        }
        let cache = &self.snapshot.price_cache;
        let map: AlignedMap = self
            .snapshot
            .holdings
            .iter()
            .map(|h| {
                let mut series = align_scoped(h, cache, scope);
                // ticks scraped after `now` are not yet known at `now`
                series.retain(|p| p.time <= self.now);
                (h.id, series)
            })
            .collect();
        debug!(
            scope = scope.as_str(),
            holdings = map.len(),
            ticks = cache.cache_times.len(),
            "aligned price series"
        );
        let map = Rc::new(map);
        self.aligned.borrow_mut().insert(scope, Rc::clone(&map));
        map
    }

    pub fn aligned_for(&self, id: HoldingId) -> Result<AlignedSeries> {
        self.snapshot
            .holding(id)
            .ok_or(AnalyticsError::UnknownHolding(id))?;
        Ok(self
            .aligned(LedgerScope::All)
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    /// Gain summaries for every holding, coloured against each other.
    pub fn holdings(&self, scope: LedgerScope) -> Vec<HoldingReport> {
        let aligned = self.aligned(scope);
        let today = self.now.date_naive();
        let empty = AlignedSeries::new();
        let mut reports: Vec<HoldingReport> = self
            .snapshot
            .holdings
            .iter()
            .map(|h| HoldingReport {
                id: h.id,
                name: h.name.clone(),
                sold: is_sold(&scope.apply(&h.transactions), &h.stock_splits),
                gain: summarize_scoped(h, aligned.get(&h.id).unwrap_or(&empty), today, scope),
            })
            .collect();
        apply_colors(
            reports.iter_mut().filter_map(|r| r.gain.as_mut()),
            self.up,
            self.down,
        );
        reports
    }

    pub fn totals(&self, scope: LedgerScope) -> PortfolioTotals {
        let reports = self.holdings(scope);
        PortfolioTotals::from_summaries(reports.iter().filter_map(|r| r.gain.as_ref()))
    }

    pub fn lines(&self, request: LineRequest) -> Vec<Line> {
        compose_lines(
            &self.snapshot.holdings,
            &self.aligned(LedgerScope::All),
            request,
        )
    }

    pub fn value_series(&self, view_sold: bool) -> Vec<SeriesPoint> {
        overall_value_series(
            &self.snapshot.holdings,
            &self.aligned(LedgerScope::All),
            view_sold,
        )
    }

    /// Candlesticks over the combined portfolio value, merged the same way
    /// as the overall chart line. Ticks scraped before anything was held are
    /// skipped, so the first bucket opens on the first held tick.
    pub fn candlesticks(&self, resolution: Resolution) -> Result<Vec<Candlestick>> {
        let series: Vec<SeriesPoint> = self
            .value_series(true)
            .into_iter()
            .skip_while(|(_, value)| value.is_zero())
            .collect();
        candlesticks(&series, resolution, self.now)
    }

    /// Current share of each unsold, priced holding against its target.
    pub fn allocation(&self) -> Vec<AllocationRow> {
        let reports = self.holdings(LedgerScope::All);
        let priced: Vec<(&HoldingReport, Decimal)> = reports
            .iter()
            .filter(|r| !r.sold)
            .filter_map(|r| r.gain.as_ref().map(|g| (r, g.value)))
            .collect();
        let total: Decimal = priced.iter().map(|(_, v)| *v).sum();

        priced
            .into_iter()
            .map(|(r, value)| {
                let target = self
                    .snapshot
                    .holding(r.id)
                    .and_then(|h| h.allocation_target);
                let actual = safe_ratio(value, total);
                AllocationRow {
                    id: r.id,
                    name: r.name.clone(),
                    value,
                    target,
                    actual,
                    drift: target.map(|t| (actual - t).round_dp(4)),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FundTransaction, Holding, PriceCache, PriceHistory};
    use chrono::NaiveDate;
    use std::str::FromStr;

    const DAY: i64 = 86_400;
    const JAN_1: i64 = 1_704_067_200;

    fn buy(units: i64, price: i64) -> FundTransaction {
        FundTransaction {
            date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            units: Decimal::from(units),
            price: Decimal::from(price),
            fees: Decimal::ZERO,
            taxes: Decimal::ZERO,
            is_drip: false,
            is_pension: false,
        }
    }

    fn snapshot() -> FundSnapshot {
        let mut prices = HashMap::new();
        prices.insert(
            1,
            PriceHistory {
                start_index: 0,
                values: vec![Decimal::from(100), Decimal::from(110)],
            },
        );
        prices.insert(
            2,
            PriceHistory {
                start_index: 1,
                values: vec![Decimal::from(50)],
            },
        );
        FundSnapshot {
            holdings: vec![
                Holding {
                    id: 1,
                    name: "Equity".into(),
                    allocation_target: Some(Decimal::from_str("0.6").unwrap()),
                    transactions: vec![buy(10, 100)],
                    stock_splits: vec![],
                },
                Holding {
                    id: 2,
                    name: "Bonds".into(),
                    allocation_target: Some(Decimal::from_str("0.4").unwrap()),
                    transactions: vec![buy(10, 60)],
                    stock_splits: vec![],
                },
                Holding {
                    id: 3,
                    name: "New".into(),
                    allocation_target: None,
                    transactions: vec![],
                    stock_splits: vec![],
                },
            ],
            price_cache: PriceCache {
                start_time: JAN_1,
                cache_times: vec![0, DAY],
                prices,
            },
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(JAN_1 + 2 * DAY, 0).unwrap()
    }

    #[test]
    fn aligned_series_are_memoized_per_scope() {
        let snap = snapshot();
        let report = FundReport::new(&snap, now());
        let a = report.aligned(LedgerScope::All);
        let b = report.aligned(LedgerScope::All);
        assert!(Rc::ptr_eq(&a, &b));
        let c = report.aligned(LedgerScope::ExcludePensions);
        assert!(!Rc::ptr_eq(&a, &c));
    }

    #[test]
    fn holdings_without_prices_have_no_gain() {
        let snap = snapshot();
        let report = FundReport::new(&snap, now());
        let rows = report.holdings(LedgerScope::All);
        assert_eq!(rows.len(), 3);
        assert!(rows[2].gain.is_none());
        let equity = rows[0].gain.as_ref().unwrap();
        assert_eq!(equity.value, Decimal::from(1100));
        assert_eq!(equity.color, DEFAULT_UP_COLOR);
        let bonds = rows[1].gain.as_ref().unwrap();
        assert_eq!(bonds.color, DEFAULT_DOWN_COLOR);
    }

    #[test]
    fn totals_cover_priced_holdings() {
        let snap = snapshot();
        let totals = FundReport::new(&snap, now()).totals(LedgerScope::All);
        assert_eq!(totals.value, Decimal::from(1600));
        assert_eq!(totals.cost, Decimal::from(1600));
        assert_eq!(totals.gain_abs, Decimal::ZERO);
        assert_eq!(totals.day_gain_abs, Decimal::from(100));
    }

    #[test]
    fn allocation_reports_drift_from_target() {
        let snap = snapshot();
        let rows = FundReport::new(&snap, now()).allocation();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].actual, Decimal::from_str("0.6875").unwrap());
        assert_eq!(rows[0].drift, Some(Decimal::from_str("0.0875").unwrap()));
        assert_eq!(rows[1].drift, Some(Decimal::from_str("-0.0875").unwrap()));
    }

    #[test]
    fn unknown_holding_is_an_error() {
        let snap = snapshot();
        let report = FundReport::new(&snap, now());
        assert_eq!(
            report.aligned_for(42),
            Err(AnalyticsError::UnknownHolding(42))
        );
        assert!(report.aligned_for(3).unwrap().is_empty());
    }
}
