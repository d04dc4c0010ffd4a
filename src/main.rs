// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fundclip::{cli, commands, config, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));
    let settings = config::load()?;

    match matches.subcommand() {
        Some(("summary", sub)) => commands::summary::handle(sub, &settings)?,
        Some(("lines", sub)) => commands::lines::handle(sub, &settings)?,
        Some(("candles", sub)) => commands::candles::handle(sub, &settings)?,
        Some(("allocation", sub)) => commands::allocation::handle(sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(sub)?,
        Some(("import", sub)) => commands::importer::handle(sub)?,
        Some(("config", sub)) => commands::settings::handle(sub, &settings)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
