//! Configuration for Quill
//!
//! Precedence: CLI args > environment variables > config file > defaults,
//! with an XDG-compliant config file location and validation.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

/// CLI arguments for Quill
#[derive(Parser, Debug, Clone)]
#[command(name = "quill")]
#[command(version)]
#[command(about = "A minimal terminal screen editor", long_about = None)]
pub struct CliArgs {
    /// Path to custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the detected viewport columns
    #[arg(long, value_name = "COLS")]
    pub columns: Option<u16>,

    /// Override the detected viewport rows
    #[arg(long, value_name = "ROWS")]
    pub rows: Option<u16>,

    /// Hide the startup banner
    #[arg(long)]
    pub no_banner: bool,
}

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Viewport override as (columns, rows); unset = query the terminal
    #[serde(default)]
    pub dimensions: Option<(u16, u16)>,

    /// Draw the version banner on an empty document
    #[serde(default = "default_true")]
    pub banner: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: None,
            banner: true,
        }
    }
}

/// Configuration error
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub message: String,
    pub field: Option<String>,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Config error in '{}': {}", field, self.message)
        } else {
            write!(f, "Config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration with full precedence:
    /// CLI args > environment variables > config file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let config_path = args.config.clone().or_else(Self::default_config_path);
        if let Some(path) = &config_path {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(file_config) => config = file_config,
                    Err(e) => {
                        log::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        config.apply_env_vars();
        config.apply_cli_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            message: format!("Failed to read config file: {}", e),
            field: None,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError {
            message: format!("Failed to parse config file: {}", e),
            field: None,
        })
    }

    /// Apply environment variables to config
    fn apply_env_vars(&mut self) {
        let cols = env::var("QUILL_COLUMNS").ok().and_then(|v| v.parse().ok());
        let rows = env::var("QUILL_ROWS").ok().and_then(|v| v.parse().ok());
        if let (Some(cols), Some(rows)) = (cols, rows) {
            self.dimensions = Some((cols, rows));
        }
        if let Ok(val) = env::var("QUILL_BANNER") {
            self.banner = val == "1" || val.to_lowercase() == "true";
        }
    }

    /// Apply CLI arguments to config (highest priority)
    fn apply_cli_args(&mut self, args: &CliArgs) {
        if args.columns.is_some() || args.rows.is_some() {
            let (cols, rows) = self.dimensions.unwrap_or((80, 24));
            self.dimensions = Some((
                args.columns.unwrap_or(cols),
                args.rows.unwrap_or(rows),
            ));
        }
        if args.no_banner {
            self.banner = false;
        }
    }

    /// Validate the final configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some((cols, rows)) = self.dimensions {
            if cols == 0 {
                return Err(ConfigError {
                    message: "Viewport columns must be at least 1".to_string(),
                    field: Some("dimensions".to_string()),
                });
            }
            if rows == 0 {
                return Err(ConfigError {
                    message: "Viewport rows must be at least 1".to_string(),
                    field: Some("dimensions".to_string()),
                });
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quill").join("config.toml"))
    }
}
