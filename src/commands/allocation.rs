// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{load_snapshot, resolve_now};
use crate::analytics::report::FundReport;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let snapshot = load_snapshot(sub)?;
    let now = resolve_now(sub)?;
    let rows = FundReport::new(&snapshot, now).allocation();

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }

    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                fmt_money(&r.value),
                fmt_pct(&r.actual),
                r.target.as_ref().map(fmt_pct).unwrap_or_else(|| "-".into()),
                r.drift.as_ref().map(fmt_pct).unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Holding", "Value", "Actual", "Target", "Drift"], data)
    );
    Ok(())
}
