//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use dualtem_analytics::market::SourcePreference;

use crate::commands::ReportArgs;

/// dualtem - Monthly effective rate (TEM) of Argentine dual bonds
#[derive(Parser)]
#[command(name = "dualtem")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    pub format: OutputFormat,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, env = "DUALTEM_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read captured JSON payloads from this directory instead of the network
    #[arg(long, global = true, value_name = "DIR")]
    pub offline_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute prospectus and market TEM for a ticker
    Report(ReportArgs),

    /// List the catalogued dual bonds
    Bonds,

    /// Print the effective configuration as TOML
    Config,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Human-readable tables
    Table,
}

/// Market TEM source selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarketSourceArg {
    /// TEM from the quoted yield
    Yield,
    /// TEM from the yield implied by the price
    Price,
    /// TEM from the latest reference rate
    Fallback,
    /// First available of yield, price, fallback
    Auto,
}

impl From<MarketSourceArg> for SourcePreference {
    fn from(arg: MarketSourceArg) -> Self {
        match arg {
            MarketSourceArg::Yield => SourcePreference::Yield,
            MarketSourceArg::Price => SourcePreference::Price,
            MarketSourceArg::Fallback => SourcePreference::Fallback,
            MarketSourceArg::Auto => SourcePreference::Auto,
        }
    }
}
