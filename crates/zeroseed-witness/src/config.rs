//! Configuration for the witness pipeline

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::WitnessError;

/// How eagerly marks reach the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WitnessMode {
    /// Persist every mark immediately
    Single,
    /// Buffer marks, flush on threshold or interval
    #[default]
    Session,
    /// Buffer marks, flush only when explicitly asked
    Lazy,
}

impl WitnessMode {
    /// String form of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            WitnessMode::Single => "single",
            WitnessMode::Session => "session",
            WitnessMode::Lazy => "lazy",
        }
    }

    /// Parse a mode from its string form
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "single" => Ok(WitnessMode::Single),
            "session" => Ok(WitnessMode::Session),
            "lazy" => Ok(WitnessMode::Lazy),
            _ => Err(format!("Unknown witness mode: {}", s)),
        }
    }
}

impl std::fmt::Display for WitnessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WitnessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Configuration for mark buffering and flushing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WitnessConfig {
    /// Buffering mode
    pub mode: WitnessMode,

    /// Buffer size that triggers a flush in session mode
    pub flush_threshold: usize,

    /// Buffer age that triggers a flush in session mode (seconds)
    pub flush_interval_secs: u64,

    /// Origin label stamped on every mark produced by the system
    pub origin: String,

    /// Attempts per persistence call before giving up
    pub max_flush_retries: u32,

    /// Delay between retry attempts (milliseconds)
    pub retry_backoff_ms: u64,
}

impl Default for WitnessConfig {
    fn default() -> Self {
        Self {
            mode: WitnessMode::Session,
            flush_threshold: 10,
            flush_interval_secs: 30,
            origin: "zeroseed".to_string(),
            max_flush_retries: 3,
            retry_backoff_ms: 50,
        }
    }
}

impl WitnessConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Immediate persistence, one mark per save
    pub fn single() -> Self {
        Self {
            mode: WitnessMode::Single,
            ..Self::default()
        }
    }

    /// Buffered persistence with threshold and interval flushing
    pub fn session() -> Self {
        Self {
            mode: WitnessMode::Session,
            ..Self::default()
        }
    }

    /// Buffered persistence, flushed only on demand
    pub fn lazy() -> Self {
        Self {
            mode: WitnessMode::Lazy,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Recognized variables:
    /// - `ZEROSEED_WITNESS_MODE` - "single", "session", or "lazy"
    /// - `ZEROSEED_FLUSH_THRESHOLD` - buffer size trigger
    /// - `ZEROSEED_FLUSH_INTERVAL_SECS` - buffer age trigger
    /// - `ZEROSEED_WITNESS_ORIGIN` - origin label for marks
    ///
    /// Missing variables fall back to defaults; malformed values are
    /// an error.
    pub fn from_env() -> Result<Self, WitnessError> {
        let mut config = Self::default();

        if let Ok(mode) = env::var("ZEROSEED_WITNESS_MODE") {
            config.mode = WitnessMode::parse(&mode).map_err(WitnessError::Config)?;
        }

        if let Ok(threshold) = env::var("ZEROSEED_FLUSH_THRESHOLD") {
            config.flush_threshold = threshold.parse().map_err(|e| {
                WitnessError::Config(format!("Invalid ZEROSEED_FLUSH_THRESHOLD: {}", e))
            })?;
        }

        if let Ok(interval) = env::var("ZEROSEED_FLUSH_INTERVAL_SECS") {
            config.flush_interval_secs = interval.parse().map_err(|e| {
                WitnessError::Config(format!("Invalid ZEROSEED_FLUSH_INTERVAL_SECS: {}", e))
            })?;
        }

        if let Ok(origin) = env::var("ZEROSEED_WITNESS_ORIGIN") {
            config.origin = origin;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self, WitnessError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WitnessError::Config(format!("Failed to read {}: {}", path, e)))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| WitnessError::Config(format!("Failed to parse {}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for nonsensical values
    pub fn validate(&self) -> Result<(), WitnessError> {
        if self.flush_threshold == 0 {
            return Err(WitnessError::Config(
                "flush_threshold must be at least 1".to_string(),
            ));
        }
        if self.flush_interval_secs == 0 {
            return Err(WitnessError::Config(
                "flush_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.origin.trim().is_empty() {
            return Err(WitnessError::Config(
                "origin must not be empty".to_string(),
            ));
        }
        if self.max_flush_retries == 0 {
            return Err(WitnessError::Config(
                "max_flush_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Flush interval as a Duration
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs)
    }

    /// Retry backoff as a Duration
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
