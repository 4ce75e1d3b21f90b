//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::filter::ZoneMode;

/// MEDIAL launch link filter CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: medial.toml)
    #[arg(short = 'C', long, default_value = "medial.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite launch links in HTML
    #[command(visible_alias = "f")]
    Filter {
        #[command(flatten)]
        args: FilterArgs,
    },

    /// Print the tag/text fragments of an HTML document as JSON
    #[command(visible_alias = "t")]
    Tokenize {
        #[command(flatten)]
        args: InspectArgs,
    },

    /// List the launch links a filter run would rewrite, as JSON
    #[command(visible_alias = "s")]
    Scan {
        #[command(flatten)]
        args: InspectArgs,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// Filter command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    /// Files to filter. Reads stdin when omitted or `-`.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub paths: Vec<PathBuf>,

    /// Original format of the input, checked against the allow-list
    #[arg(short, long, default_value = "1")]
    pub format: String,

    /// Treat the input as having no known format (pass-through)
    #[arg(long, conflicts_with = "format")]
    pub unformatted: bool,

    /// Rewrite every PATH in place
    #[arg(short, long, conflicts_with = "output")]
    pub in_place: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments shared by the inspection commands.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// HTML file to inspect. Reads stdin when omitted or `-`.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub path: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// Config values that can be overridden from the command line.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Override the site root substituted for launch placeholders
    #[arg(short = 'U', long = "site-root", value_hint = clap::ValueHint::Url)]
    pub site_root: Option<String>,

    /// Override the allow-listed formats (comma-separated)
    #[arg(long)]
    pub formats: Option<String>,

    /// Override the exclusion zone policy (shallow, nested)
    #[arg(long)]
    pub zones: Option<ZoneMode>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl OverrideArgs {
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            site_root: self.site_root.clone(),
            formats: self.formats.clone(),
            zones: self.zones,
        }
    }
}

impl Cli {
    /// Overrides of the selected command, if it takes any.
    pub fn overrides(&self) -> Option<&OverrideArgs> {
        match &self.command {
            Commands::Filter { args } => Some(&args.overrides),
            Commands::Scan { overrides, .. } => Some(overrides),
            Commands::Tokenize { .. } => None,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.overrides().is_some_and(|o| o.verbose)
    }
}
