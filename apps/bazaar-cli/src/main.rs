//! # Bazaar CLI
//!
//! Command-line access to the marketplace's currency and listing rules.
//!
//! ## Usage
//! ```bash
//! bazaar to-copper 1 0 250 7          # 1000250007 copper (1p 250s 7c)
//! bazaar split 2003004005             # platinum/gold/silver/copper
//! bazaar prices 1000 3 total          # each: 333c, total: 1s
//! bazaar check listings.json --items items.json
//! bazaar list listings.json --search log --sort totaldesc
//! ```
//!
//! ## Environment
//! - `BAZAAR_LOG` - tracing filter (default: `info`)
//! - `BAZAAR_PRICE_MODE` - default mode for `prices` (default: `Each`)

mod commands;
mod config;

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::CliConfig;

fn print_help() {
    println!("Bazaar marketplace tools");
    println!();
    println!("Usage: bazaar <COMMAND> [ARGS]");
    println!();
    println!("Commands:");
    println!("  to-copper <p> <g> <s> <c>          Combine denominations into copper");
    println!("  split <total>                      Split a copper total into denominations");
    println!("  prices <total> <qty> [each|total]  Per-unit and total price");
    println!("  check <file> [--items <file>]      Check listing JSON against the form rules");
    println!("  list <file> [--search <text>] [--type <buy|sell|all>]");
    println!("       [--category <name|all>] [--sort <asc|desc|totalasc|totaldesc|new|old>]");
    println!("                                     Filter and sort listings");
    println!("  help                               Show this help message");
}

fn run(config: &CliConfig, command: &str, args: &[String]) -> anyhow::Result<bool> {
    let lines = match command {
        "to-copper" => commands::to_copper_cmd(args)?,
        "split" => commands::split_cmd(args)?,
        "prices" => commands::prices_cmd(args, config)?,
        "list" => commands::list_cmd(args)?,
        "check" => {
            let report = commands::check_cmd(args)?;
            for line in &report.lines {
                println!("{line}");
            }
            return Ok(report.invalid == 0);
        }
        "help" | "-h" | "--help" => {
            print_help();
            return Ok(true);
        }
        other => anyhow::bail!("unknown command '{other}' (try `bazaar help`)"),
    };

    for line in lines {
        println!("{line}");
    }
    Ok(true)
}

fn main() -> ExitCode {
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let filter = match EnvFilter::try_new(&config.log_filter).context("invalid BAZAAR_LOG filter")
    {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        print_help();
        return ExitCode::SUCCESS;
    };

    info!(command = %command, mode = %config.default_price_mode, "running");

    match run(&config, command, rest) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
