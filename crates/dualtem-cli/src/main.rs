//! dualtem CLI - monthly effective rate (TEM) of Argentine dual bonds.
//!
//! # Usage
//!
//! ```bash
//! # Prospectus and market TEM, live data
//! dualtem report TTM26
//!
//! # Override the reference-rate average and pick the price-implied TEM
//! dualtem report TTM26 --reference-avg 0.31 --market-source price --price 101.5
//!
//! # Run against captured payloads, as a table
//! dualtem --offline-dir ./captures --format table report TTJ26
//!
//! # List the catalogued dual bonds
//! dualtem bonds
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the default filter.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::DualtemConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context {
        format: cli.format,
        config: DualtemConfig::load(cli.config.as_deref())?,
        offline_dir: cli.offline_dir,
    };

    match cli.command {
        Commands::Report(args) => commands::report::execute(&args, &ctx)?,
        Commands::Bonds => commands::bonds::execute(&ctx)?,
        Commands::Config => commands::config::execute(&ctx)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,dualtem=debug"
    } else {
        "warn,dualtem=info"
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
