//! Configuration system for nodequery.
//!
//! This module provides the configuration structure for nodequery with sensible
//! defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments, which take precedence.
//!
//! # Example
//!
//! ```
//! use nodequery::config::{Config, OutputFormat};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.payload_field, "node");
//! assert_eq!(config.output, OutputFormat::Plain);
//!
//! // Create custom configuration
//! let custom = Config {
//!     children_field: "kids".to_string(),
//!     ..Config::default()
//! };
//! assert_eq!(custom.design_fields().children, "kids");
//! ```

use crate::document::parser::DesignFields;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// How query results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One payload per line
    #[default]
    Plain,
    /// A YAML sequence
    Yaml,
    /// A JSON array
    Json,
}

/// Configuration for the nodequery application.
///
/// # Fields
///
/// * `payload_field` - Design key holding an entry's payload (default: "node")
/// * `children_field` - Design key holding an entry's children (default: "children")
/// * `output` - Result format: "plain", "yaml" or "json" (default: "plain")
/// * `log_filter` - tracing filter used when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Design key holding an entry's payload
    #[serde(default = "default_payload_field")]
    pub payload_field: String,

    /// Design key holding an entry's children
    #[serde(default = "default_children_field")]
    pub children_field: String,

    /// Result format
    #[serde(default)]
    pub output: OutputFormat,

    /// Log filter directives, e.g. "warn" or "nodequery=debug"
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_payload_field() -> String {
    "node".to_string()
}

fn default_children_field() -> String {
    "children".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            payload_field: default_payload_field(),
            children_field: default_children_field(),
            output: OutputFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/nodequery/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("nodequery");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_else(|err| {
            warn!(error = %format!("{:#}", err), "using default config");
            Self::default()
        })
    }

    /// Loads configuration from the default config file, reporting why a
    /// present file could not be used.
    ///
    /// A missing file (or no home directory) is not an error.
    pub fn try_load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::try_load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from `path`. A missing file yields the defaults.
    pub fn try_load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Field names used when parsing tree designs.
    pub fn design_fields(&self) -> DesignFields {
        DesignFields {
            payload: self.payload_field.clone(),
            children: self.children_field.clone(),
        }
    }
}
