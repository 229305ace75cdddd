//! Background flush loop

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

use crate::archive::Archive;
use crate::batcher::WitnessBatcher;

/// Background worker that flushes the buffer on a fixed interval
///
/// Drives the age-based flush trigger for buffered modes: marks left
/// sitting in the buffer go out even when no new mark arrives to
/// check the clock. On cancellation the worker drains the buffer one
/// last time before exiting, so shutdown never strands marks.
pub struct WitnessWorker<A: Archive> {
    batcher: Arc<WitnessBatcher<A>>,
    interval: Duration,
    cancel: CancellationToken,
}

impl<A: Archive> WitnessWorker<A> {
    /// Create a worker over the given batcher
    pub fn new(
        batcher: Arc<WitnessBatcher<A>>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            batcher,
            interval,
            cancel,
        }
    }

    /// Run the flush loop until cancelled
    pub async fn run(self) {
        let mut ticker = interval(self.interval);

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Witness worker started"
        );

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::info!("Witness worker shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        // Drain whatever is still buffered before exiting
        match self.batcher.force_flush().await {
            Ok(Some(batch)) => {
                tracing::info!(batch = %batch.id, marks = batch.count, "final drain flushed buffer");
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "final drain failed, buffered marks lost");
            }
        }

        let metrics = self.batcher.metrics().await;
        tracing::info!(summary = %metrics.summary(), "Witness worker stopped");
    }

    /// Run a fixed number of flush cycles (for testing)
    pub async fn run_cycles(&self, count: usize) {
        for _ in 0..count {
            self.tick().await;
        }
    }

    async fn tick(&self) {
        match self.batcher.force_flush().await {
            Ok(Some(batch)) => {
                tracing::info!(batch = %batch.id, marks = batch.count, "interval flush");
            }
            Ok(None) => {
                tracing::debug!("interval flush found empty buffer");
            }
            Err(e) => {
                tracing::error!(error = %e, "interval flush failed");
            }
        }
    }
}
