//! Configuration for the state container.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (JSON)
//! 3. Default values

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session module configuration.
    pub session: SessionSection,
    /// Drawer module configuration.
    pub drawer: DrawerSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Session module configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Session lifetime in hours.
    pub ttl_hours: i64,
    /// PBKDF2 rounds for password hashing.
    pub kdf_rounds: u32,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            ttl_hours: crate::session::DEFAULT_TTL_HOURS,
            kdf_rounds: crate::session::DEFAULT_KDF_ROUNDS,
        }
    }
}

impl SessionSection {
    /// Session lifetime as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::hours(self.ttl_hours)
    }
}

/// Drawer module configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerSection {
    /// Whether the drawer starts open.
    pub start_open: bool,
    /// Whether the drawer starts pinned.
    pub start_pinned: bool,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(hours) = std::env::var("STATEHUB_SESSION_TTL_HOURS") {
            if let Ok(hours) = hours.parse() {
                self.session.ttl_hours = hours;
            }
        }

        if let Ok(open) = std::env::var("STATEHUB_DRAWER_OPEN") {
            if let Ok(open) = open.parse() {
                self.drawer.start_open = open;
            }
        }

        if let Ok(level) = std::env::var("STATEHUB_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Load configuration with the full priority chain.
    ///
    /// Priority: env vars > config file > defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}
