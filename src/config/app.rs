//! Main application configuration
//!
//! This module defines the primary configuration structures for the throne-room
//! tournament tool, including environment variable and TOML file loading.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use super::rating::RatingRules;
use super::seat::{SeatSettings, MAX_SEAT_CAPACITY};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingRules,
    pub seats: SeatSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Where the tournament snapshot is stored
    pub state_file: PathBuf,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "throne-room".to_string(),
            log_level: "info".to_string(),
            state_file: PathBuf::from("tournament.json"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(state_file) = env::var("STATE_FILE") {
            self.service.state_file = PathBuf::from(state_file);
        }

        // Rating rules
        if let Ok(rate) = env::var("INITIAL_RATE") {
            self.rating.initial_rate = rate
                .parse()
                .map_err(|_| anyhow!("Invalid INITIAL_RATE value: {}", rate))?;
        }
        if let Ok(floor) = env::var("RATE_FLOOR") {
            self.rating.rate_floor = floor
                .parse()
                .map_err(|_| anyhow!("Invalid RATE_FLOOR value: {}", floor))?;
        }

        // Seat settings
        if let Ok(capacity) = env::var("SEAT_CAPACITY") {
            self.seats.capacity = capacity
                .parse()
                .map_err(|_| anyhow!("Invalid SEAT_CAPACITY value: {}", capacity))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.state_file.as_os_str().is_empty() {
        return Err(anyhow!("State file path cannot be empty"));
    }

    config.rating.validate()?;

    // Validate seat settings
    if config.seats.capacity == 0 || config.seats.capacity > MAX_SEAT_CAPACITY {
        return Err(anyhow!(
            "Seat capacity must be between 1 and {}",
            MAX_SEAT_CAPACITY
        ));
    }
    if config.seats.min_players == 0 || config.seats.min_players > config.seats.capacity {
        return Err(anyhow!(
            "Minimum players must be between 1 and the seat capacity"
        ));
    }

    Ok(())
}
