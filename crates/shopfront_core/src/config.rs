//! Runtime configuration for catalog hosts.
//!
//! # Responsibility
//! - Resolve database/logging/seeding settings from `SHOPFRONT_*` variables.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Malformed values are errors, never silently replaced.
//! - Resolution runs before logging starts, so it does not log.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "SHOPFRONT_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "SHOPFRONT_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SHOPFRONT_LOG_DIR";
pub const SEED_ENV: &str = "SHOPFRONT_SEED";

const DEFAULT_DB_PATH: &str = "products.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBool { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBool { key, value } => {
                write!(f, "invalid boolean `{value}` for {key}; expected true|false|1|0")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings shared by every catalog host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub seed_on_start: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
            seed_on_start: true,
        }
    }
}

impl CatalogConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let db_path = get(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from);
        let log_level = get(LOG_LEVEL_ENV).unwrap_or(defaults.log_level);
        let log_dir = get(LOG_DIR_ENV).map(PathBuf::from);
        let seed_on_start = match get(SEED_ENV) {
            Some(value) => parse_bool(SEED_ENV, &value)?,
            None => defaults.seed_on_start,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
            seed_on_start,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
