// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{FundSnapshot, FundTransaction, HoldingId};
use crate::utils::{parse_date, parse_decimal, parse_flag};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(sub),
        _ => Ok(()),
    }
}

fn import_transactions(sub: &clap::ArgMatches) -> Result<()> {
    let snapshot_path = sub
        .get_one::<String>("snapshot")
        .map(|s| s.trim().to_string())
        .context("--snapshot is required")?;
    let holding = *sub
        .get_one::<HoldingId>("holding")
        .context("--holding is required")?;
    let path = sub
        .get_one::<String>("path")
        .map(|s| s.trim().to_string())
        .context("--path is required")?;

    let file = std::fs::File::open(&path).with_context(|| format!("Open CSV {}", path))?;
    let snapshot_path = Path::new(&snapshot_path);
    let mut snapshot = crate::snapshot::load(snapshot_path)?;
    let added = import_into(&mut snapshot, holding, file)?;
    crate::snapshot::save(snapshot_path, &snapshot)?;
    println!("Imported {} transactions into holding {}", added, holding);
    Ok(())
}

/// Parse `date,units,price,fees,taxes,drip,pension` rows (header required;
/// the last four columns may be blank) and merge them into the holding's
/// ledger, keeping it in date order.
pub fn import_into<R: Read>(
    snapshot: &mut FundSnapshot,
    holding_id: HoldingId,
    reader: R,
) -> Result<usize> {
    let holding = snapshot
        .holdings
        .iter_mut()
        .find(|h| h.id == holding_id)
        .ok_or_else(|| anyhow!("Holding {} not found in snapshot", holding_id))?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut parsed = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = line + 2;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let units_raw = rec.get(1).context("units missing")?.trim();
        let price_raw = rec.get(2).context("price missing")?.trim();

        let date = parse_date(date_raw).with_context(|| format!("Row {}", row))?;
        let units = parse_decimal(units_raw).with_context(|| format!("Row {}", row))?;
        let price = parse_decimal(price_raw).with_context(|| format!("Row {}", row))?;
        let fees = optional_decimal(rec.get(3)).with_context(|| format!("Row {}", row))?;
        let taxes = optional_decimal(rec.get(4)).with_context(|| format!("Row {}", row))?;
        let is_drip = parse_flag(rec.get(5).unwrap_or("")).with_context(|| format!("Row {}", row))?;
        let is_pension =
            parse_flag(rec.get(6).unwrap_or("")).with_context(|| format!("Row {}", row))?;

        if units.is_zero() {
            return Err(anyhow!("Row {}: units must be non-zero", row));
        }
        parsed.push(FundTransaction {
            date,
            units,
            price,
            fees,
            taxes,
            is_drip,
            is_pension,
        });
    }

    let added = parsed.len();
    holding.transactions.extend(parsed);
    // stable: same-day rows keep ledger order, then file order
    holding.transactions.sort_by_key(|t| t.date);
    info!(holding = holding_id, added, "imported transactions");
    Ok(added)
}

fn optional_decimal(raw: Option<&str>) -> Result<Decimal> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_decimal(s),
        None => Ok(Decimal::ZERO),
    }
}
