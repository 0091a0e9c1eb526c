use anyhow::Result;
use clap::Parser;

use gerryconform::cli::{Cli, Commands};
use gerryconform::commands::{conform, explore};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Conform(args) => conform::run(&cli, args),
        Commands::Explore(args) => explore::run(&cli, args),
    }
}
