// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{d, daily_cache, dec, holding, snapshot, split, txn};
use fundclip::commands::doctor::diagnose;

fn issues(snap: &fundclip::models::FundSnapshot) -> Vec<String> {
    diagnose(snap).into_iter().map(|(issue, _)| issue).collect()
}

#[test]
fn clean_snapshot_has_no_issues() {
    let snap = snapshot(
        vec![holding(1, vec![txn(d(2024, 1, 1), 10, 100)])],
        daily_cache(3, vec![(1, 1, vec![100, 101])]),
    );
    assert!(diagnose(&snap).is_empty());
}

#[test]
fn ledger_problems_are_flagged() {
    let mut h = holding(
        1,
        vec![
            txn(d(2024, 2, 1), 10, 100),
            txn(d(2024, 1, 1), 0, 100),
        ],
    );
    h.stock_splits = vec![split(d(2024, 3, 1), 0)];
    h.allocation_target = Some(dec(1));
    let mut dup = holding(1, vec![]);
    dup.allocation_target = Some(dec(1));
    let snap = snapshot(vec![h, dup], daily_cache(0, vec![]));

    let found = issues(&snap);
    for expected in [
        "duplicate_holding_id",
        "transactions_out_of_order",
        "zero_unit_transaction",
        "non_positive_split_ratio",
        "allocation_targets_exceed_100pct",
    ] {
        assert!(found.iter().any(|i| i == expected), "missing {}", expected);
    }
}

#[test]
fn price_cache_problems_are_flagged() {
    let mut cache = daily_cache(2, vec![(1, 1, vec![100, 101]), (9, 0, vec![5])]);
    cache.cache_times = vec![0, 0];
    let snap = snapshot(vec![holding(1, vec![])], cache);

    let found = issues(&snap);
    assert!(found.contains(&"cache_times_not_ascending".to_string()));
    assert!(found.contains(&"prices_past_cache_times".to_string()));
    assert!(found.contains(&"prices_for_unknown_holding".to_string()));
}
