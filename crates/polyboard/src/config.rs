//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use polyboard_core::{SearchSettings, VariantRegistry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "polyboard.toml";

/// Settings for a play session. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// Variant to start with, by name or catalog index.
    #[serde(default = "default_variant")]
    default_variant: String,

    /// Search depth bound in plies.
    #[serde(default = "default_search_depth")]
    search_depth: u32,

    /// Search time bound in seconds.
    #[serde(default = "default_search_time_secs")]
    search_time_secs: u32,

    /// Whether the computer answers every human move.
    #[serde(default = "default_auto_reply")]
    auto_reply: bool,

    /// Log file used by the terminal UI.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Tracing filter directive, used when `RUST_LOG` is unset.
    #[serde(default)]
    log_filter: Option<String>,
}

fn default_variant() -> String {
    polyboard_variants::DEFAULT_VARIANT.to_string()
}

fn default_search_depth() -> u32 {
    polyboard_core::DEFAULT_SEARCH_DEPTH
}

fn default_search_time_secs() -> u32 {
    polyboard_core::DEFAULT_SEARCH_TIME_SECS
}

fn default_auto_reply() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("polyboard.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_variant: default_variant(),
            search_depth: default_search_depth(),
            search_time_secs: default_search_time_secs(),
            auto_reply: default_auto_reply(),
            log_file: default_log_file(),
            log_filter: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(variant = %config.default_variant, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Rejects bounds the search cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::new("search_depth must be positive".to_string()));
        }
        if self.search_time_secs == 0 {
            return Err(ConfigError::new("search_time_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Search bounds for the controller.
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings::new(self.search_depth, self.search_time_secs)
    }

    /// Catalog index of [`default_variant`](Self::default_variant), matched
    /// by name first and then as an index.
    #[instrument(skip(self, registry), fields(variant = %self.default_variant))]
    pub fn variant_index(&self, registry: &VariantRegistry) -> Result<usize, ConfigError> {
        registry
            .find(&self.default_variant)
            .or_else(|| {
                self.default_variant
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|&index| index < registry.count())
            })
            .ok_or_else(|| {
                ConfigError::new(format!("Unknown variant '{}'", self.default_variant))
            })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
