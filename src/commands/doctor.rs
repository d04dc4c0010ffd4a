// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::load_snapshot;
use crate::models::FundSnapshot;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// `(issue, detail)` pairs for everything that would skew the analytics.
pub fn diagnose(snapshot: &FundSnapshot) -> Vec<(String, String)> {
    let mut issues: Vec<(String, String)> = Vec::new();
    let cache = &snapshot.price_cache;

    // 1) Holding ids must be unique; lookups take the first match
    let mut seen = HashSet::new();
    for h in &snapshot.holdings {
        if !seen.insert(h.id) {
            issues.push(("duplicate_holding_id".into(), h.id.to_string()));
        }
    }

    // 2) Ledger shape per holding
    for h in &snapshot.holdings {
        if h.transactions.windows(2).any(|w| w[1].date < w[0].date) {
            issues.push(("transactions_out_of_order".into(), h.name.clone()));
        }
        for t in h.transactions.iter().filter(|t| t.units.is_zero()) {
            issues.push(("zero_unit_transaction".into(), format!("{} {}", h.name, t.date)));
        }
        for s in h.stock_splits.iter().filter(|s| s.ratio <= Decimal::ZERO) {
            issues.push((
                "non_positive_split_ratio".into(),
                format!("{} {} x{}", h.name, s.date, s.ratio),
            ));
        }
    }

    let targets: Decimal = snapshot
        .holdings
        .iter()
        .filter_map(|h| h.allocation_target)
        .sum();
    if targets > Decimal::ONE {
        issues.push(("allocation_targets_exceed_100pct".into(), targets.to_string()));
    }

    // 3) Price cache cadence and per-holding ranges
    if cache.cache_times.windows(2).any(|w| w[1] <= w[0]) {
        issues.push(("cache_times_not_ascending".into(), String::new()));
    }
    let mut ids: Vec<_> = cache.prices.keys().copied().collect();
    ids.sort_unstable();
    for id in ids {
        let history = &cache.prices[&id];
        if snapshot.holding(id).is_none() {
            issues.push(("prices_for_unknown_holding".into(), id.to_string()));
        }
        let end = history.start_index + history.values.len();
        if end > cache.cache_times.len() {
            issues.push((
                "prices_past_cache_times".into(),
                format!(
                    "{}: {} values from index {}",
                    id,
                    history.values.len(),
                    history.start_index
                ),
            ));
        }
    }

    issues
}

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let snapshot = load_snapshot(sub)?;
    let rows: Vec<Vec<String>> = diagnose(&snapshot)
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
