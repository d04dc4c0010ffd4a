// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cli::subcommand_help;
use crate::config::{Settings, config_path};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    match m.subcommand() {
        Some(("path", _)) => println!("{}", config_path()?.display()),
        Some(("show", _)) => println!("{}", serde_json::to_string_pretty(settings)?),
        _ => {
            if let Some(help) = subcommand_help("config") {
                println!("{}", help);
            }
        }
    }
    Ok(())
}
