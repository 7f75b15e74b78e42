//! TOML-based configuration for tempora.
//!
//! Example configuration:
//! ```toml
//! [resolver]
//! strictness = "lenient"
//! week_start = "monday"
//! epoch = "1970-01-01"
//! loose_phrase_fallback = true
//!
//! [query]
//! dialect = "duckdb"
//! ```

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Strictness;
use crate::filter::Dialect;
use crate::temporal::ResolverOptions;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid week start day: {0}")]
    InvalidWeekStart(String),

    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Timeframe resolver configuration.
    pub resolver: ResolverSettings,

    /// Query rendering configuration.
    pub query: QuerySettings,
}

/// Resolver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Failure policy: "lenient" (skip-and-warn) or "strict" (fail-fast).
    pub strictness: Strictness,

    /// First day of the week ("monday", "sunday", ...).
    pub week_start: String,

    /// Lower bound for open-ended phrases like "till now".
    pub epoch: NaiveDate,

    /// Allow the substring fallback over the fixed-phrase table.
    pub loose_phrase_fallback: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            strictness: Strictness::Lenient,
            week_start: "monday".to_string(),
            epoch: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            loose_phrase_fallback: true,
        }
    }
}

impl ResolverSettings {
    /// Convert to resolver options, validating the week start day.
    pub fn options(&self) -> Result<ResolverOptions, SettingsError> {
        let week_start = parse_weekday(&self.week_start)
            .ok_or_else(|| SettingsError::InvalidWeekStart(self.week_start.clone()))?;
        Ok(ResolverOptions {
            week_start,
            epoch: self.epoch,
            loose_phrase_fallback: self.loose_phrase_fallback,
        })
    }
}

/// Query rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Target dialect for generated query text.
    pub dialect: String,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            dialect: "duckdb".to_string(),
        }
    }
}

impl QuerySettings {
    /// Get the configured dialect.
    pub fn dialect(&self) -> Result<Dialect, SettingsError> {
        Dialect::from_name(&self.dialect)
            .ok_or_else(|| SettingsError::UnsupportedDialect(self.dialect.clone()))
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `TEMPORA_CONFIG`
    /// 2. `./tempora.toml`
    /// 3. `~/.config/tempora/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("TEMPORA_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("tempora.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tempora").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Defaults if no config file found.
        Ok(Settings::default())
    }
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}
