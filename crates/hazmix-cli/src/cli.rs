//! CLI command definitions and argument parsing.

use hazmix_domain::{ChemicalId, GroupId};
use std::path::PathBuf;
use clap::{ArgAction, Parser, Subcommand};

/// hazmix - Predict the hazards of mixing chemicals.
#[derive(Debug, Parser)]
#[command(name = "hazmix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HAZMIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reference database path
    #[arg(short, long, global = true, env = "HAZMIX_DATABASE")]
    pub database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (verdict or ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze the compatibility of a set of chemicals
    Analyze(AnalyzeArgs),

    /// List reactive groups
    Groups,

    /// Show a chemical's record, identifiers and reactive groups
    Show(ShowArgs),

    /// Show reference database statistics
    Stats,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Chemical ids to combine
    pub chemicals: Vec<ChemicalId>,

    /// Add a reactive group directly (repeatable)
    #[arg(short = 'g', long = "group")]
    pub groups: Vec<GroupId>,

    /// Include water as a participant
    #[arg(short, long)]
    pub water: bool,

    /// Read an analysis request from a JSON file
    #[arg(short, long)]
    pub request: Option<PathBuf>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Chemical id
    pub chemical: ChemicalId,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
