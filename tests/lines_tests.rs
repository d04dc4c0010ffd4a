// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{DAY, JAN_1, at, d, daily_cache, dec, holding, snapshot, txn};
use fundclip::analytics::color::Rgb;
use fundclip::analytics::lines::{LineMode, LineRequest, OVERALL_LINE_ID, simplify};
use fundclip::analytics::report::FundReport;
use fundclip::analytics::SeriesPoint;
use fundclip::models::FundSnapshot;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Fund 1 priced from the first tick, fund 2 from the second, fund 3 sold
/// on Jan 2 after being priced on Jan 1.
fn portfolio() -> FundSnapshot {
    let bought = d(2023, 12, 1);
    snapshot(
        vec![
            holding(1, vec![txn(bought, 10, 100)]),
            holding(2, vec![txn(bought, 10, 40)]),
            holding(3, vec![txn(bought, 10, 30), txn(d(2024, 1, 2), -10, 20)]),
        ],
        daily_cache(
            3,
            vec![
                (1, 0, vec![100, 110, 120]),
                (2, 1, vec![50, 60]),
                (3, 0, vec![20, 20, 20]),
            ],
        ),
    )
}

fn request(mode: LineMode, view_sold: bool) -> LineRequest {
    LineRequest {
        mode,
        view_sold,
        max_points: None,
    }
}

fn line<'a>(lines: &'a [fundclip::analytics::lines::Line], id: &str) -> &'a [SeriesPoint] {
    &lines.iter().find(|l| l.id == id).unwrap().data
}

#[test]
fn overall_value_merges_offset_series_on_time() {
    let snap = portfolio();
    let report = FundReport::new(&snap, at(JAN_1 + 3 * DAY));
    let lines = report.lines(request(LineMode::Absolute, false));

    let ids: Vec<&str> = lines.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", OVERALL_LINE_ID]);

    let overall = line(&lines, OVERALL_LINE_ID);
    assert_eq!(
        overall,
        &[
            (at(JAN_1), dec(1000)),
            (at(JAN_1 + DAY), dec(1600)),
            (at(JAN_1 + 2 * DAY), dec(1800)),
        ]
    );
    assert_eq!(line(&lines, "2").len(), 2);
    assert_eq!(lines.last().unwrap().color, Rgb::BLACK);
}

#[test]
fn sold_holdings_join_only_when_asked() {
    let snap = portfolio();
    let report = FundReport::new(&snap, at(JAN_1 + 3 * DAY));
    let lines = report.lines(request(LineMode::Absolute, true));

    assert!(lines.iter().any(|l| l.id == "3"));
    let overall = line(&lines, OVERALL_LINE_ID);
    // fund 3 still held 10 units on Jan 1
    assert_eq!(overall[0], (at(JAN_1), dec(1200)));
    assert_eq!(overall[1], (at(JAN_1 + DAY), dec(1600)));
}

#[test]
fn overall_roi_pools_value_and_cost() {
    let snap = portfolio();
    let report = FundReport::new(&snap, at(JAN_1 + 3 * DAY));
    let lines = report.lines(request(LineMode::Roi, false));

    assert_eq!(line(&lines, "1")[1].1, dec(10));
    let overall = line(&lines, OVERALL_LINE_ID);
    assert_eq!(overall[0].1, Decimal::ZERO);
    // (1100 + 500 - 1000 - 400) * 100 / 1400
    assert_eq!(overall[1].1, dec(20_000) / dec(1400));
    // (1200 + 600 - 1400) * 100 / 1400
    assert_eq!(overall[2].1, dec(40_000) / dec(1400));
}

#[test]
fn price_mode_has_no_overall_line() {
    let snap = portfolio();
    let report = FundReport::new(&snap, at(JAN_1 + 3 * DAY));
    let lines = report.lines(request(LineMode::Price, true));

    assert!(lines.iter().all(|l| l.id != OVERALL_LINE_ID));
    let prices: Vec<Decimal> = line(&lines, "1").iter().map(|p| p.1).collect();
    assert_eq!(prices, vec![dec(100), dec(110), dec(120)]);
}

#[test]
fn palette_follows_ledger_position_not_visibility() {
    let snap = portfolio();
    let report = FundReport::new(&snap, at(JAN_1 + 3 * DAY));
    let all = report.lines(request(LineMode::Absolute, true));
    let unsold = report.lines(request(LineMode::Absolute, false));
    for id in ["1", "2"] {
        let a = all.iter().find(|l| l.id == id).unwrap().color;
        let b = unsold.iter().find(|l| l.id == id).unwrap().color;
        assert_eq!(a, b);
    }
}

#[test]
fn max_points_simplifies_every_line() {
    let snap = portfolio();
    let report = FundReport::new(&snap, at(JAN_1 + 3 * DAY));
    let lines = report.lines(LineRequest {
        mode: LineMode::Absolute,
        view_sold: false,
        max_points: Some(2),
    });
    let overall = line(&lines, OVERALL_LINE_ID);
    assert_eq!(overall.len(), 2);
    assert_eq!(overall[0].0, at(JAN_1));
    assert_eq!(overall[1].0, at(JAN_1 + 2 * DAY));
}

proptest! {
    #[test]
    fn simplify_keeps_endpoints_and_order(
        gaps in prop::collection::vec(1i64..1_000, 0..40),
        target in 0usize..50,
    ) {
        let mut t = JAN_1;
        let mut data: Vec<SeriesPoint> = vec![(at(t), Decimal::ZERO)];
        for (i, gap) in gaps.iter().enumerate() {
            t += gap;
            data.push((at(t), Decimal::from(i as i64 + 1)));
        }

        let out = simplify(&data, target);
        prop_assert_eq!(out.len(), data.len().min(target.max(2)));
        prop_assert_eq!(out.first(), data.first());
        prop_assert_eq!(out.last(), data.last());
        prop_assert!(out.windows(2).all(|w| w[0].0 < w[1].0));
        prop_assert!(out.iter().all(|p| data.contains(p)));
    }
}
