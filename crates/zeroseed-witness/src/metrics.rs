//! Counters for witness activity

/// Metrics tracking witness throughput and failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WitnessMetrics {
    /// Marks persisted immediately (single mode)
    pub marks_recorded: u64,
    /// Marks added to the buffer
    pub marks_buffered: u64,
    /// Batches flushed to the archive
    pub batches_flushed: u64,
    /// Marks carried inside flushed batches
    pub marks_flushed: u64,
    /// Flushes that exhausted their retries
    pub flush_failures: u64,
    /// Retry attempts across all persistence calls
    pub retries: u64,
}

impl WitnessMetrics {
    /// Create zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mark persisted immediately
    pub fn record_mark(&mut self) {
        self.marks_recorded += 1;
    }

    /// Record a mark entering the buffer
    pub fn record_buffered(&mut self) {
        self.marks_buffered += 1;
    }

    /// Record a successful batch flush of `marks` marks
    pub fn record_flush(&mut self, marks: usize) {
        self.batches_flushed += 1;
        self.marks_flushed += marks as u64;
    }

    /// Record a flush that gave up after exhausting retries
    pub fn record_flush_failure(&mut self) {
        self.flush_failures += 1;
    }

    /// Record one retry attempt
    pub fn record_retry(&mut self) {
        self.retries += 1;
    }

    /// Total marks that reached the archive, by any route
    pub fn total_persisted(&self) -> u64 {
        self.marks_recorded + self.marks_flushed
    }

    /// Reset all counters to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Human-readable summary of activity
    pub fn summary(&self) -> String {
        format!(
            "Witness: {} recorded, {} buffered, {} batches flushed ({} marks), {} failures, {} retries",
            self.marks_recorded,
            self.marks_buffered,
            self.batches_flushed,
            self.marks_flushed,
            self.flush_failures,
            self.retries
        )
    }
}
