// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{load_snapshot, resolve_now};
use crate::analytics::ohlc::Resolution;
use crate::analytics::report::FundReport;
use crate::config::Settings;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let resolution = match sub.get_one::<String>("resolution") {
        Some(raw) => raw
            .parse::<Resolution>()
            .with_context(|| format!("Invalid --resolution '{}'", raw))?,
        None => settings.resolution()?,
    };
    let snapshot = load_snapshot(sub)?;
    let now = resolve_now(sub)?;
    let candles = FundReport::new(&snapshot, now).candlesticks(resolution)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &candles)? {
        return Ok(());
    }
    if candles.is_empty() {
        println!("No priced holdings to chart at {}", resolution);
        return Ok(());
    }

    let rows = candles
        .iter()
        .map(|c| {
            vec![
                c.t0.date_naive().to_string(),
                c.t1.date_naive().to_string(),
                fmt_money(&c.start),
                fmt_money(&c.max),
                fmt_money(&c.min),
                fmt_money(&c.end),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["From", "To", "Open", "High", "Low", "Close"], rows)
    );
    Ok(())
}
