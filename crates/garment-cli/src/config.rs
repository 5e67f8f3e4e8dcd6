//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use garment_domain::ExactFraction;
use garment_resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Named claim lists, kept sorted by name.
pub type Scenarios = BTreeMap<String, Vec<ExactFraction>>;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Resolver behaviour
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Named scenarios
    #[serde(default = "default_scenarios")]
    pub scenarios: Scenarios,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path (`~/.garment/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".garment").join("config.toml"))
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok(config)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// REPL history file kept next to the configuration file.
    pub fn history_path(config_path: &Path) -> PathBuf {
        config_path.with_file_name("history.txt")
    }

    /// Look up a scenario by name.
    pub fn scenario(&self, name: &str) -> Result<&[ExactFraction]> {
        self.scenarios
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| CliError::UnknownScenario(name.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            resolver: ResolverConfig::default(),
            scenarios: default_scenarios(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

/// Built-in example disputes.
const BUILTIN_SCENARIOS: &[(&str, &[(i64, i64)])] = &[
    ("classic", &[(1, 1), (1, 2)]),
    ("scenario-1", &[(1, 1), (1, 1)]),
    ("no-dispute", &[(1, 2), (1, 4), (1, 4)]),
    ("case-1", &[(1, 1), (1, 2), (1, 2)]),
    ("case-2", &[(1, 1), (1, 1), (1, 2)]),
    ("case-3", &[(1, 1), (1, 1), (1, 2), (1, 2)]),
    (
        "six-claimants",
        &[(1, 1), (1, 2), (1, 2), (1, 3), (1, 4), (1, 1)],
    ),
];

/// The built-in scenarios as a fresh table.
pub fn default_scenarios() -> Scenarios {
    BUILTIN_SCENARIOS
        .iter()
        .map(|&(name, claims)| {
            let claims = claims
                .iter()
                .filter_map(|&(n, d)| ExactFraction::new(n, d).ok())
                .collect();
            (name.to_string(), claims)
        })
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}
