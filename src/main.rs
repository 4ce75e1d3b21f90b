//! medial - MEDIAL launch link filter.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use medial::cli::{self, Cli, Commands, load_filter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    medial::logger::set_verbose(cli.is_verbose());

    match &cli.command {
        Commands::Filter { args } => {
            cli::filter::run_filter(args, &load_filter(&cli.config, &args.overrides)?)
        }
        Commands::Scan { args, overrides } => {
            cli::inspect::run_scan(args, &load_filter(&cli.config, overrides)?)
        }
        Commands::Tokenize { args } => cli::inspect::run_tokenize(args),
    }
}
