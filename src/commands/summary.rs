// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{load_snapshot, resolve_now};
use crate::analytics::gain::PortfolioTotals;
use crate::analytics::ledger::LedgerScope;
use crate::analytics::report::{FundReport, HoldingReport};
use crate::config::Settings;
use crate::models::FundSnapshot;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub as_of: DateTime<Utc>,
    pub scope: LedgerScope,
    pub holdings: Vec<HoldingReport>,
    pub totals: PortfolioTotals,
}

pub fn build_summary(
    snapshot: &FundSnapshot,
    now: DateTime<Utc>,
    scope: LedgerScope,
    settings: &Settings,
) -> Summary {
    let report =
        FundReport::new(snapshot, now).with_colors(settings.up_color, settings.down_color);
    let holdings = report.holdings(scope);
    let totals = PortfolioTotals::from_summaries(holdings.iter().filter_map(|h| h.gain.as_ref()));
    Summary {
        as_of: now,
        scope,
        holdings,
        totals,
    }
}

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let snapshot = load_snapshot(sub)?;
    let now = resolve_now(sub)?;
    let scope = match sub.get_one::<String>("scope") {
        Some(raw) => raw.parse::<LedgerScope>()?,
        None => LedgerScope::All,
    };
    let summary = build_summary(&snapshot, now, scope, settings);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }

    let mut rows: Vec<Vec<String>> = summary
        .holdings
        .iter()
        .map(|h| match &h.gain {
            Some(g) => vec![
                h.id.to_string(),
                h.name.clone(),
                if h.sold { "sold".into() } else { g.units.to_string() },
                fmt_money(&g.value),
                fmt_money(&g.cost),
                fmt_money(&g.gain_abs),
                fmt_pct(&g.gain),
                fmt_money(&g.day_gain_abs),
                fmt_pct(&g.day_gain),
            ],
            None => vec![
                h.id.to_string(),
                h.name.clone(),
                "no prices".into(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        })
        .collect();
    let t = &summary.totals;
    rows.push(vec![
        String::new(),
        "Total".into(),
        String::new(),
        fmt_money(&t.value),
        fmt_money(&t.cost),
        fmt_money(&t.gain_abs),
        fmt_pct(&t.gain),
        fmt_money(&t.day_gain_abs),
        fmt_pct(&t.day_gain),
    ]);
    println!(
        "{}",
        pretty_table(
            &["ID", "Holding", "Units", "Value", "Cost", "Gain", "Gain %", "Day", "Day %"],
            rows
        )
    );
    Ok(())
}
