//! # Configuration
//!
//! Settings come from three layers, highest precedence first:
//! 1. CLI flags (`--data`, `serve --host/--port`)
//! 2. A TOML file (`--config <path>`, or `paf-dash.toml` in the working directory)
//! 3. Built-in defaults
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8050
//!
//! [data]
//! path = "final_df_all_causes.csv"
//!
//! [defaults]
//! risk = "Diet low in fruits"
//! cause = "Ischemic heart disease"
//! age_label = "Age 55-59"
//! ```

use paf_core::PafError;
use paf_core::primitives::{DEFAULT_AGE_LABEL, DEFAULT_CAUSE, DEFAULT_RISK};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "paf-dash.toml";

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub defaults: DefaultsConfig,
}

/// Bind address of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8050,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for `TcpListener::bind`.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("final_df_all_causes.csv"),
        }
    }
}

/// Initial dropdown values and the fallback age label for titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub risk: String,
    pub cause: String,
    pub age_label: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            risk: DEFAULT_RISK.to_string(),
            cause: DEFAULT_CAUSE.to_string(),
            age_label: DEFAULT_AGE_LABEL.to_string(),
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, PafError> {
        toml::from_str(contents).map_err(|e| PafError::Config(e.to_string()))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `paf-dash.toml` in the
    /// working directory is used when present, else the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, PafError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    tracing::debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            PafError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!("Configuration loaded from {}", path.display());
        Ok(config)
    }
}

// =============================================================================
// TESTS
// =============================================================================
