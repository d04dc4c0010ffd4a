// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::SeriesPoint;
use crate::error::{AnalyticsError, Result};
use chrono::{DateTime, Months, NaiveTime, TimeDelta, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

static RESOLUTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)?\s*([A-Za-z]+)\s*$").expect("valid resolution regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Week,
    Month,
}

impl FromStr for PeriodUnit {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "wk" | "week" | "weeks" => Ok(PeriodUnit::Week),
            "m" | "mo" | "month" | "months" => Ok(PeriodUnit::Month),
            other => Err(AnalyticsError::UnsupportedPeriodUnit(other.to_string())),
        }
    }
}

/// Width of one candlestick bucket: `count` weeks or calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub count: u32,
    pub unit: PeriodUnit,
}

impl Resolution {
    pub fn new(count: u32, unit: PeriodUnit) -> Result<Self> {
        let r = Self { count, unit };
        r.validate()?;
        Ok(r)
    }

    fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(AnalyticsError::InvalidResolution(self.to_string()));
        }
        Ok(())
    }

    /// Start of bucket `k` counted from `origin`. Always measured from the
    /// origin, so a month-end clamp in one bucket never shifts the next.
    pub fn boundary(&self, origin: DateTime<Utc>, k: u32) -> Option<DateTime<Utc>> {
        let steps = self.count.checked_mul(k)?;
        match self.unit {
            PeriodUnit::Week => origin.checked_add_signed(TimeDelta::try_weeks(steps.into())?),
            PeriodUnit::Month => origin.checked_add_months(Months::new(steps)),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            PeriodUnit::Week => "week",
            PeriodUnit::Month => "month",
        };
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.count, unit, plural)
    }
}

impl FromStr for Resolution {
    type Err = AnalyticsError;

    /// Accepts `"1w"`, `"2 weeks"`, `"month"`, `"3 months"` and similar.
    fn from_str(s: &str) -> Result<Self> {
        let caps = RESOLUTION_RE
            .captures(s)
            .ok_or_else(|| AnalyticsError::InvalidResolution(s.to_string()))?;
        let count = match caps.get(1) {
            Some(m) => m
                .as_str()
                .parse::<u32>()
                .map_err(|_| AnalyticsError::InvalidResolution(s.to_string()))?,
            None => 1,
        };
        let unit = caps[2].parse::<PeriodUnit>()?;
        Resolution::new(count, unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candlestick {
    pub t0: DateTime<Utc>,
    pub t1: DateTime<Utc>,
    pub min: Decimal,
    pub max: Decimal,
    pub start: Decimal,
    pub end: Decimal,
}

impl Candlestick {
    /// `points` must be in time order; `None` for an empty bucket.
    fn from_points(
        t0: DateTime<Utc>,
        t1: DateTime<Utc>,
        points: &[&SeriesPoint],
    ) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;
        let (min, max) = points
            .iter()
            .fold((first.1, first.1), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
        Some(Self {
            t0,
            t1,
            min,
            max,
            start: first.1,
            end: last.1,
        })
    }
}

/// Bucket a combined value series into `[t0, t1)` candlesticks.
///
/// Buckets start at UTC midnight of the earliest point and keep coming while
/// `t0 <= now`; points after `now` are ignored. Empty buckets are left out
/// rather than interpolated.
pub fn candlesticks(
    series: &[SeriesPoint],
    resolution: Resolution,
    now: DateTime<Utc>,
) -> Result<Vec<Candlestick>> {
    resolution.validate()?;

    let mut points: Vec<&SeriesPoint> = series.iter().filter(|p| p.0 <= now).collect();
    points.sort_by_key(|p| p.0);

    let Some(first) = points.first() else {
        return Ok(Vec::new());
    };
    let origin = first.0.date_naive().and_time(NaiveTime::MIN).and_utc();
    let mut t0 = origin;
    let mut k = 0;
    let mut idx = 0;
    let mut out = Vec::new();

    while t0 <= now && idx < points.len() {
        k += 1;
        let Some(t1) = resolution.boundary(origin, k) else {
            break;
        };
        let bucket_start = idx;
        while idx < points.len() && points[idx].0 < t1 {
            idx += 1;
        }
        if let Some(c) = Candlestick::from_points(t0, t1, &points[bucket_start..idx]) {
            out.push(c);
        }
        t0 = t1;
    }

    debug!(
        points = series.len(),
        buckets = out.len(),
        resolution = %resolution,
        "built candlesticks"
    );
    Ok(out)
}
