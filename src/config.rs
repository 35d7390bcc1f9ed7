// Configuration loading and parsing (config/scout.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cohort: CohortConfig,
    pub data_paths: DataPaths,
}

/// Floors for reference-cohort membership. The hitter floors are deployment
/// configuration, not constants: different datasets want different
/// small-sample cutoffs.
#[derive(Debug, Clone, Deserialize)]
pub struct CohortConfig {
    /// Minimum innings pitched for any pitcher cohort.
    pub min_innings: f64,
    /// Plate-appearance threshold that makes a hitter a "regular".
    pub regular_pa: u32,
    /// Plate-appearance floor for the all-hitters cohort.
    pub min_pa: u32,
}

impl Default for CohortConfig {
    fn default() -> Self {
        CohortConfig {
            min_innings: 10.0,
            regular_pa: 200,
            min_pa: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub pitchers: String,
    pub hitters: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/scout.toml` relative to the
/// given base directory.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("scout.toml");
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working
/// directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let cohort = &config.cohort;

    if !cohort.min_innings.is_finite() || cohort.min_innings < 0.0 {
        return Err(ConfigError::ValidationError {
            field: "cohort.min_innings".into(),
            message: format!("must be a finite value >= 0, got {}", cohort.min_innings),
        });
    }

    if cohort.regular_pa == 0 {
        return Err(ConfigError::ValidationError {
            field: "cohort.regular_pa".into(),
            message: "must be greater than 0".into(),
        });
    }

    if cohort.min_pa > cohort.regular_pa {
        return Err(ConfigError::ValidationError {
            field: "cohort.min_pa".into(),
            message: format!(
                "must not exceed cohort.regular_pa ({} > {})",
                cohort.min_pa, cohort.regular_pa
            ),
        });
    }

    if config.data_paths.pitchers.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.pitchers".into(),
            message: "must not be empty".into(),
        });
    }

    if config.data_paths.hitters.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.hitters".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
