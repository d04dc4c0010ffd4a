// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{load_snapshot, resolve_now};
use crate::analytics::lines::{LineMode, LineRequest};
use crate::analytics::report::FundReport;
use crate::config::Settings;
use anyhow::Result;
use tracing::debug;

/// Command-line flags win; anything unset falls back to the settings file.
pub fn line_request(sub: &clap::ArgMatches, settings: &Settings) -> Result<LineRequest> {
    let mode = match sub.get_one::<String>("mode") {
        Some(raw) => raw.parse::<LineMode>()?,
        None => settings.line_mode,
    };
    Ok(LineRequest {
        mode,
        view_sold: sub.get_flag("view-sold") || settings.view_sold,
        max_points: sub
            .get_one::<usize>("max-points")
            .copied()
            .or(settings.max_points),
    })
}

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let snapshot = load_snapshot(sub)?;
    let now = resolve_now(sub)?;
    let request = line_request(sub, settings)?;
    let lines = FundReport::new(&snapshot, now).lines(request);
    debug!(mode = request.mode.as_str(), lines = lines.len(), "composed lines");
    println!("{}", serde_json::to_string_pretty(&lines)?);
    Ok(())
}
