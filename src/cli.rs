use std::path::PathBuf;

use crate::types::Chamber;

/// Election-results conform CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "gerryconform", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Clean and conform a raw results table to the gerrymetrics schema
    Conform(ConformArgs),

    /// Print data-quality diagnostics for a raw results table
    Explore(ExploreArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConformArgs {
    /// Raw results CSV in the MEDSL schema
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Conformed output CSV
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Election year stamped on every output row
    #[arg(short, long)]
    pub year: i32,

    /// Legislative chamber to select; requires --offices
    #[arg(short, long, value_enum)]
    pub chamber: Option<Chamber>,

    /// Office-title classification file (JSON)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub offices: Option<PathBuf>,

    /// Correction tables for known distributor errors (JSON)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub fixes: Option<PathBuf>,

    /// Pre-clean exclusions, reason -> state codes (JSON)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub exclusions: Option<PathBuf>,

    /// Dataset name used in the run report, defaults to the output file stem
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct ExploreArgs {
    /// Raw results CSV in the MEDSL schema
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Legislative chamber to select; requires --offices
    #[arg(short, long, value_enum)]
    pub chamber: Option<Chamber>,

    /// Office-title classification file (JSON)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub offices: Option<PathBuf>,

    /// Minimum statewide voteshare for a third party to be reported
    #[arg(long, default_value_t = 0.01)]
    pub threshold: f64,
}
