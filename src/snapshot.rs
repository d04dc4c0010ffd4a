// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Snapshot files: the JSON form of the ledger and price cache handed to
//! the engine for a single request.

use crate::models::FundSnapshot;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn load(path: &Path) -> Result<FundSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read snapshot at {}", path.display()))?;
    let snapshot: FundSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Parse snapshot at {}", path.display()))?;
    info!(
        path = %path.display(),
        holdings = snapshot.holdings.len(),
        ticks = snapshot.price_cache.cache_times.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

pub fn save(path: &Path, snapshot: &FundSnapshot) -> Result<()> {
    let raw = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, raw).with_context(|| format!("Write snapshot at {}", path.display()))?;
    Ok(())
}
