//! Scoring parameters.
//!
//! Every field has a default, so a config file only needs to name the
//! values it overrides.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::board::CollectionRates;

/// Errors raised when loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable constants of the target scorer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Exponent applied to travel distance in the yield term.
    pub distance_exponent: f64,
    /// Lower clamp on travel distance, so inverse-distance terms stay finite.
    pub min_distance: f64,
    /// Target bonus for staying on an uncrowded current cluster.
    pub stay_bonus: f64,
    /// Multiplier on the target bonus once the current cluster is saturated.
    pub must_switch_multiplier: f64,
    pub rates: CollectionRates,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            distance_exponent: -0.5,
            min_distance: 0.5,
            stay_bonus: 1_000_000.0,
            must_switch_multiplier: 1000.0,
            rates: CollectionRates::default(),
        }
    }
}

impl ScoringConfig {
    /// Parses a config from JSON, then validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// Rejects values that would make scores meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_distance.is_nan() || self.min_distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_distance must be positive, got {}",
                self.min_distance
            )));
        }
        let rates = [self.rates.wood, self.rates.coal, self.rates.uranium];
        if rates.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "collection rates must be finite and non-negative, got {:?}",
                self.rates
            )));
        }
        Ok(())
    }
}
