//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the init command, writing the default configuration to `path`.
pub fn execute_init(args: InitArgs, path: &Path, formatter: &Formatter) -> Result<()> {
    write_default_config(path, args.force)?;
    tracing::info!("Wrote default configuration to {}", path.display());
    println!(
        "{}",
        formatter.success(&format!("Configuration written to {}", path.display()))
    );
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }
    Config::default().save_to(path)
}
