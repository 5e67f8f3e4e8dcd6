//! Garment CLI - Divide a contested garment among claimants from the command line.

use clap::Parser;
use garment_cli::commands;
use garment_cli::repl;
use garment_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> garment_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config, falling back to defaults when the file is absent
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        None | Some(Command::Repl) => {
            let history_path = Config::history_path(&config_path);
            repl::run_repl(&config, &history_path, &formatter)?;
        }
        Some(Command::Resolve(args)) => {
            commands::execute_resolve(args, &config, &formatter)?;
        }
        Some(Command::Scenarios(args)) => {
            commands::execute_scenarios(args, &config, &formatter)?;
        }
        Some(Command::Init(args)) => {
            commands::execute_init(args, &config_path, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr. `-v` flags win over `RUST_LOG`; without either only warnings show.
fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
