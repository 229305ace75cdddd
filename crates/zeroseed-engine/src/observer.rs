//! Default observer for system-initiated mutations

use zeroseed_domain::{Observer, UmweltSnapshot};

/// Observer identifying the running process itself
///
/// Stamps marks with a fixed origin and a minimal context snapshot
/// (process id and capture time). Richer observers belong to the
/// callers that know their own context.
#[derive(Debug, Clone)]
pub struct SystemObserver {
    origin: String,
}

impl SystemObserver {
    /// Create an observer with the given origin label
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }
}

impl Default for SystemObserver {
    fn default() -> Self {
        Self::new("zeroseed")
    }
}

impl Observer for SystemObserver {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn umwelt_snapshot(&self) -> UmweltSnapshot {
        UmweltSnapshot::from_value(serde_json::json!({
            "observer": self.origin,
            "pid": std::process::id(),
            "captured_at_ms": zeroseed_domain::current_timestamp_ms(),
        }))
    }
}
