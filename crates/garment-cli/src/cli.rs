//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Garment - Divide a contested garment among claimants by successive concession.
#[derive(Debug, Parser)]
#[command(name = "garment")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, env = "GARMENT_FORMAT")]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GARMENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log resolution steps to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (allocations only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a dispute over the given claims
    Resolve(ResolveArgs),

    /// List the configured scenarios, or resolve one
    Scenarios(ScenariosArgs),

    /// Write the default configuration file
    Init(InitArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// Claims as fractions, integers or decimals (e.g. 1 1/2 0.25)
    #[arg(required = true, num_args = 1..)]
    pub claims: Vec<String>,

    /// Also print each concession round
    #[arg(short, long)]
    pub trace: bool,
}

/// Arguments for the scenarios command.
#[derive(Debug, Parser)]
pub struct ScenariosArgs {
    /// Scenario to resolve
    pub name: Option<String>,

    /// Resolve every configured scenario
    #[arg(short, long, conflicts_with = "name")]
    pub all: bool,

    /// Also print each concession round
    #[arg(short, long)]
    pub trace: bool,
}

/// Arguments for the init command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
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
