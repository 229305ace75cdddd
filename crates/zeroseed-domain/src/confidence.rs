//! Confidence intervals backing qualifier bands

use serde::{Deserialize, Serialize};

/// Confidence interval representing [lower, upper] bounds
///
/// Intervals capture both the confidence level itself and the certainty
/// about that level: a wide interval says "we do not know how sure we are".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound [0.0, 1.0]
    pub lower: f64,
    /// Upper bound [0.0, 1.0]
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    ///
    /// # Panics
    /// Panics if bounds are invalid (lower > upper or out of [0, 1])
    pub fn new(lower: f64, upper: f64) -> Self {
        assert!(lower >= 0.0 && lower <= 1.0, "Lower bound must be in [0, 1]");
        assert!(upper >= 0.0 && upper <= 1.0, "Upper bound must be in [0, 1]");
        assert!(lower <= upper, "Lower bound must be <= upper bound");

        Self { lower, upper }
    }

    /// Get the midpoint of the interval
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Get the width of the interval (uncertainty measure)
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if the interval contains a value
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}
