// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, value_parser};

fn snapshot_arg() -> Arg {
    arg!(--snapshot <FILE> "Snapshot JSON with holdings and price cache").required(true)
}

fn now_arg() -> Arg {
    arg!(--now <TIME> "Evaluate as of this time (RFC 3339 or YYYY-MM-DD); defaults to now")
        .required(false)
}

fn json_args() -> [Arg; 2] {
    [
        arg!(--json "Print JSON").action(ArgAction::SetTrue),
        arg!(--jsonl "Print JSON lines").action(ArgAction::SetTrue),
    ]
}

pub fn build_cli() -> Command {
    Command::new("fundclip")
        .about("Fund valuation, gains and performance charts")
        .version(clap::crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v, -vv, -vvv)"),
        )
        .subcommand(
            Command::new("summary")
                .about("Per-holding value and gains with portfolio totals")
                .arg(snapshot_arg())
                .arg(now_arg())
                .arg(
                    arg!(--scope <SCOPE> "Transactions to include")
                        .required(false)
                        .value_parser(["all", "exclude-pensions", "pensions-only"])
                        .default_value("all"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("lines")
                .about("Chart lines per holding plus the overall portfolio line")
                .arg(snapshot_arg())
                .arg(now_arg())
                .arg(
                    arg!(--mode <MODE> "absolute | roi | price")
                        .required(false)
                        .value_parser(["absolute", "roi", "price"]),
                )
                .arg(arg!(--"view-sold" "Include sold holdings").action(ArgAction::SetTrue))
                .arg(
                    arg!(--"max-points" <N> "Simplify each line to at most N points")
                        .required(false)
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("candles")
                .about("OHLC candlesticks over the combined portfolio value")
                .arg(snapshot_arg())
                .arg(now_arg())
                .arg(
                    arg!(--resolution <RES> "Bucket width, e.g. \"1 week\" or \"3 months\"")
                        .required(false),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("allocation")
                .about("Current allocation against each holding's target")
                .arg(snapshot_arg())
                .arg(now_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check a snapshot for ledger and price cache problems")
                .arg(snapshot_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Import data into a snapshot")
                .subcommand(
                    Command::new("transactions")
                        .about("Append CSV transactions (date,units,price,fees,taxes,drip,pension)")
                        .arg(snapshot_arg())
                        .arg(
                            arg!(--holding <ID> "Holding id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(arg!(--path <CSV> "CSV file").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect settings")
                .subcommand(Command::new("path").about("Print the settings file path"))
                .subcommand(Command::new("show").about("Print effective settings")),
        )
}

/// Rendered help for one top-level subcommand.
pub fn subcommand_help(name: &str) -> Option<String> {
    let mut cli = build_cli();
    let sub = cli.find_subcommand_mut(name)?;
    Some(sub.render_help().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn config_help_lists_its_subcommands() {
        let help = subcommand_help("config").unwrap();
        assert!(help.contains("path"));
        assert!(help.contains("show"));
        assert!(subcommand_help("nope").is_none());
    }

    #[test]
    fn lines_parses_flags() {
        let m = build_cli().get_matches_from([
            "fundclip",
            "lines",
            "--snapshot",
            "s.json",
            "--mode",
            "roi",
            "--view-sold",
            "--max-points",
            "50",
        ]);
        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, "lines");
        assert_eq!(sub.get_one::<String>("mode").unwrap(), "roi");
        assert!(sub.get_flag("view-sold"));
        assert_eq!(*sub.get_one::<usize>("max-points").unwrap(), 50);
    }
}
