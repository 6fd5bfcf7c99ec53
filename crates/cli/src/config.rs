//! Configuration module - environment variable parsing

use std::env;
use std::path::PathBuf;

use stockroom_inventory::{DEFAULT_INVENTORY_FILE, DEFAULT_LOW_STOCK_THRESHOLD};

pub const INVENTORY_FILE_VAR: &str = "STOCKROOM_INVENTORY_FILE";
pub const LOW_STOCK_THRESHOLD_VAR: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";
pub const LOAD_ON_START_VAR: &str = "STOCKROOM_LOAD_ON_START";
pub const LOG_FILTER_VAR: &str = "STOCKROOM_LOG";

/// Driver configuration loaded from environment variables
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Where the inventory snapshot is read from and written to
    pub inventory_file: PathBuf,
    /// Items strictly below this are reported as low stock
    pub low_stock_threshold: i64,
    /// Load the snapshot before running the demonstration
    pub load_on_start: bool,
    /// Default tracing filter (RUST_LOG still takes precedence)
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inventory_file: PathBuf::from(DEFAULT_INVENTORY_FILE),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            load_on_start: false,
            log_filter: stockroom_observability::DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let inventory_file = match lookup(INVENTORY_FILE_VAR) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::Empty(INVENTORY_FILE_VAR));
            }
            Some(path) => PathBuf::from(path),
            None => defaults.inventory_file,
        };

        let low_stock_threshold = match lookup(LOW_STOCK_THRESHOLD_VAR) {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| ConfigError::Invalid {
                key: LOW_STOCK_THRESHOLD_VAR,
                value: raw,
            })?,
            None => defaults.low_stock_threshold,
        };

        let load_on_start = match lookup(LOAD_ON_START_VAR) {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                key: LOAD_ON_START_VAR,
                value: raw,
            })?,
            None => defaults.load_on_start,
        };

        let log_filter = lookup(LOG_FILTER_VAR).unwrap_or(defaults.log_filter);

        Ok(Self {
            inventory_file,
            low_stock_threshold,
            load_on_start,
            log_filter,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} must not be empty")]
    Empty(&'static str),

    #[error("invalid value {value:?} for environment variable {key}")]
    Invalid { key: &'static str, value: String },
}
