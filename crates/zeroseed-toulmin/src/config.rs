//! Validator configuration

use serde::{Deserialize, Serialize};

/// Tunables for coherence scoring
///
/// Targets are the text lengths (and rebuttal count) at which a
/// sub-score saturates at 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Characters of `data` at which data richness saturates
    pub data_richness_target: usize,

    /// Characters of `backing` at which backing support saturates
    pub backing_target: usize,

    /// Rebuttal count at which coverage saturates (strong qualifiers)
    pub rebuttal_coverage_target: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            data_richness_target: 200,
            backing_target: 100,
            rebuttal_coverage_target: 3,
        }
    }
}

impl ValidatorConfig {
    /// A lenient configuration: short evidence already scores well
    pub fn lenient() -> Self {
        Self {
            data_richness_target: 50,
            backing_target: 25,
            rebuttal_coverage_target: 1,
        }
    }

    /// A strict configuration: only thorough proofs score high
    pub fn strict() -> Self {
        Self {
            data_richness_target: 500,
            backing_target: 250,
            rebuttal_coverage_target: 5,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.data_richness_target == 0 {
            return Err("data_richness_target must be positive".to_string());
        }
        if self.backing_target == 0 {
            return Err("backing_target must be positive".to_string());
        }
        if self.rebuttal_coverage_target == 0 {
            return Err("rebuttal_coverage_target must be positive".to_string());
        }
        Ok(())
    }
}
