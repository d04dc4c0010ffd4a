// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod allocation;
pub mod candles;
pub mod doctor;
pub mod importer;
pub mod lines;
pub mod settings;
pub mod summary;

use crate::models::FundSnapshot;
use crate::utils::parse_instant;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

pub(crate) fn load_snapshot(sub: &clap::ArgMatches) -> Result<FundSnapshot> {
    let path = sub
        .get_one::<String>("snapshot")
        .context("--snapshot is required")?;
    crate::snapshot::load(Path::new(path.trim()))
}

pub(crate) fn resolve_now(sub: &clap::ArgMatches) -> Result<DateTime<Utc>> {
    match sub.get_one::<String>("now") {
        Some(raw) => parse_instant(raw),
        None => Ok(Utc::now()),
    }
}
