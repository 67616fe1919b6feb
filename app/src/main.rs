//! Overflow-safe signed 8-bit addition
//!
//! Checks whether `a + add` would overflow an `i8` before performing it, then
//! prints exactly one line and exits with the matching status.
//!
//! # Usage
//!
//! ```bash
//! # The fixed case: 127 + 1
//! overflow-safe                      # Overflow detected (exit 1)
//!
//! # Other operands
//! overflow-safe --a 126 --add 1      # a = 127 (exit 0)
//!
//! # Guard the negative side too
//! overflow-safe --a -128 --add -1 --policy symmetric
//!
//! # Read operands and policies from a run file
//! overflow-safe --config run.toml
//! ```

mod config;

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use config::{NarrowingArg, Overrides, PolicyArg, RunConfig};
use verified::{evaluate, Outcome};

/// Exit status for unreadable or invalid configuration, matching clap's usage errors.
const EXIT_USAGE: i32 = 2;

/// Overflow-safe signed 8-bit addition
#[derive(Parser)]
#[command(name = "overflow-safe")]
#[command(author = "Prasanna Gautam")]
#[command(version = "0.1.0")]
#[command(about = "Checks a signed 8-bit addition for overflow before performing it")]
struct Cli {
    /// Accumulator (default 127)
    #[arg(long = "a", allow_hyphen_values = true)]
    a: Option<i8>,

    /// Increment (default 1)
    #[arg(long, allow_hyphen_values = true)]
    add: Option<i8>,

    /// Which side of the range to guard
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// How to bring an unguarded out-of-range sum back to 8 bits
    #[arg(long, value_enum)]
    narrowing: Option<NarrowingArg>,

    /// TOML run file with any of: a, add, policy, narrowing
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// The single computation of a run.
fn run(config: &RunConfig) -> Outcome {
    evaluate(config.a, config.add, config.policy, config.narrowing)
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let overrides = Overrides {
        a: cli.a,
        add: cli.add,
        policy: cli.policy,
        narrowing: cli.narrowing,
    };

    let config = match RunConfig::resolve(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            std::process::exit(EXIT_USAGE);
        }
    };

    let outcome = run(&config);
    println!("{}", outcome.report_line());
    std::process::exit(outcome.exit_code());
}
