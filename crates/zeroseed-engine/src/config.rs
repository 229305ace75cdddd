//! Engine configuration

use serde::{Deserialize, Serialize};
use std::env;
use zeroseed_domain::DEFAULT_PARTITION_THRESHOLD;
use zeroseed_witness::WitnessConfig;

use crate::error::EngineError;

/// Configuration for the whole mutation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Witness pipeline settings
    pub witness: WitnessConfig,

    /// Constitutional score threshold for the dominant partition
    pub partition_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            witness: WitnessConfig::default(),
            partition_threshold: DEFAULT_PARTITION_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// Delegates the witness settings to
    /// [`WitnessConfig::from_env`] and additionally reads
    /// `ZEROSEED_PARTITION_THRESHOLD`.
    pub fn from_env() -> Result<Self, EngineError> {
        let witness = WitnessConfig::from_env()?;
        let mut config = Self {
            witness,
            ..Self::default()
        };

        if let Ok(threshold) = env::var("ZEROSEED_PARTITION_THRESHOLD") {
            config.partition_threshold = threshold.parse().map_err(|e| {
                EngineError::Config(format!("Invalid ZEROSEED_PARTITION_THRESHOLD: {}", e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for nonsensical values
    pub fn validate(&self) -> Result<(), EngineError> {
        self.witness.validate()?;
        if !(self.partition_threshold > 0.0 && self.partition_threshold <= 1.0) {
            return Err(EngineError::Config(
                "partition_threshold must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}
