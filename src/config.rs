// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted state records
    pub data_dir: PathBuf,
    /// Override for the Open-Meteo air-quality endpoint (tests/mirrors)
    pub air_quality_base_url: Option<String>,
    /// Override for the Open-Meteo forecast endpoint (tests/mirrors)
    pub weather_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let data_dir = match env::var("AIRPATH_DATA_DIR") {
            Ok(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::Invalid("AIRPATH_DATA_DIR"));
            }
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir(),
        };

        Ok(Self {
            data_dir,
            air_quality_base_url: env::var("AIRPATH_AIR_QUALITY_URL").ok(),
            weather_base_url: env::var("AIRPATH_WEATHER_URL").ok(),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            data_dir: PathBuf::from("target/test-data"),
            air_quality_base_url: None,
            weather_base_url: None,
        }
    }
}

/// Per-user data directory, following the platform convention where one
/// is discoverable, otherwise a local fallback.
fn default_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("airpath");
    }
    if let Ok(home) = env::var("HOME") {
        return PathBuf::from(home).join(".local/share/airpath");
    }
    PathBuf::from(".airpath")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
