//! Configuration management for plotline.
//!
//! Loads configuration from TOML files with defaults for every section.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub chart: ChartConfig,
    pub replay: ReplayConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./plotline.toml`
    /// 2. `~/.config/plotline/plotline.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        if let Ok(config) = Self::load("plotline.toml") {
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("plotline").join("plotline.toml");
            if let Ok(config) = Self::load(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("plotline.toml")
    }
}

/// General application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default trading symbol to load on startup.
    pub default_symbol: String,
    /// Default data timeframe label.
    pub default_timeframe: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_symbol: "GOLD".to_string(),
            default_timeframe: "1D".to_string(),
        }
    }
}

/// Trendline interaction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Hover tolerance as a percentage of the reference price.
    pub hover_threshold_pct: f64,
    /// Endpoint time tolerance in multiples of the nominal bar span.
    pub hover_time_tolerance_spans: f64,
    /// Extra drag headroom around the visible price range (fraction of
    /// the visible span).
    pub drag_buffer_ratio: f64,
    /// Require strictly positive times and prices.
    pub require_positive_values: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            hover_threshold_pct: 1.5,
            hover_time_tolerance_spans: 2.0,
            drag_buffer_ratio: 0.5,
            require_positive_values: true,
        }
    }
}

/// Replay playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Initial speed multiplier.
    pub default_speed: f64,
    /// Maximum allowed speed multiplier.
    pub max_speed: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            default_speed: 1.0,
            max_speed: 10.0,
        }
    }
}
