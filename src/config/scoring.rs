//! Scoring coefficient configuration from config.toml
//!
//! The point formula's coefficients are product-tuning constants, not derived
//! from any stated formula, so they are kept in configuration rather than
//! hardcoded. Every field has a default matching the shipped product values;
//! a missing file or missing section falls back to those defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Point formula coefficients
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Coefficients of the gamification point formula.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points per percent of positive savings
    pub savings_reward_multiplier: f64,
    /// Points per percent of negative savings (multiplies a negative value)
    pub overuse_penalty_multiplier: f64,
    /// Points per reading entered in the current period
    pub points_per_reading: f64,
    /// Points per consecutive-reading streak step
    pub streak_bonus: f64,
    /// Maximum gap between consecutive readings that keeps a streak alive
    pub streak_window_days: i64,
    /// Number of consecutive reading pairs inspected for the streak
    pub streak_max_pairs: usize,
    /// Multiplier applied to monthly points for contracted companies
    pub contracted_bonus: f64,
    /// Fixed lifetime points granted per manually entered reading
    pub manual_reading_award: i64,
    /// How many tips a user may apply per month
    pub monthly_tip_limit: u32,
    /// Tip reward when neither an explicit reward nor a difficulty matches
    pub default_tip_reward: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            savings_reward_multiplier: 5.0,
            overuse_penalty_multiplier: 2.0,
            points_per_reading: 3.0,
            streak_bonus: 5.0,
            streak_window_days: 35,
            streak_max_pairs: 3,
            contracted_bonus: 1.2,
            manual_reading_award: 10,
            monthly_tip_limit: 3,
            default_tip_reward: 10,
        }
    }
}

/// Loads configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from the default location (./config.toml), falling
/// back to built-in defaults when the file is missing or unreadable.
#[must_use]
pub fn load_default_config() -> Config {
    load_config("config.toml").unwrap_or_else(|e| {
        tracing::warn!("Using default scoring configuration: {e}");
        Config::default()
    })
}
