//! Mark buffering and flush orchestration

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use zeroseed_domain::{BatchId, BatchMark, Mark, MarkId};

use crate::archive::Archive;
use crate::config::{WitnessConfig, WitnessMode};
use crate::error::WitnessError;
use crate::metrics::WitnessMetrics;

/// What happened to a mark handed to the batcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WitnessOutcome {
    /// The mark was persisted on its own, immediately
    Recorded(MarkId),
    /// The mark entered the buffer and its arrival triggered a flush
    Flushed {
        /// Id of the batch that carried the buffer out
        batch: BatchId,
        /// Number of marks in that batch
        marks: usize,
    },
    /// The mark entered the buffer and is waiting for a later flush
    Deferred {
        /// Buffer size after this mark was added
        pending: usize,
    },
}

#[derive(Debug)]
struct BatcherState {
    buffer: Vec<Mark>,
    last_flush: Instant,
    metrics: WitnessMetrics,
}

impl BatcherState {
    fn new() -> Self {
        Self {
            buffer: Vec::new(),
            last_flush: Instant::now(),
            metrics: WitnessMetrics::new(),
        }
    }
}

/// Routes marks to the archive according to the configured mode
///
/// Single mode persists each mark on arrival. Session mode buffers
/// marks and flushes the whole buffer as one batch when it reaches the
/// configured threshold or age. Lazy mode buffers until someone calls
/// [`WitnessBatcher::force_flush`].
///
/// All operations serialize on one internal lock, which is held across
/// persistence calls. A failed flush leaves the buffer intact so the
/// marks flush again on the next trigger.
pub struct WitnessBatcher<A: Archive> {
    archive: Arc<A>,
    config: WitnessConfig,
    state: Mutex<BatcherState>,
}

impl<A: Archive> WitnessBatcher<A> {
    /// Create a batcher over the given archive
    pub fn new(archive: Arc<A>, config: WitnessConfig) -> Self {
        Self {
            archive,
            config,
            state: Mutex::new(BatcherState::new()),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &WitnessConfig {
        &self.config
    }

    /// Hand a mark to the witness pipeline
    pub async fn witness(&self, mark: Mark) -> Result<WitnessOutcome, WitnessError> {
        let mut state = self.state.lock().await;

        match self.config.mode {
            WitnessMode::Single => {
                let id = mark.id;
                self.save_mark_with_retry(&mark, &mut state.metrics).await?;
                state.metrics.record_mark();
                tracing::debug!(mark = %id, "mark persisted");
                Ok(WitnessOutcome::Recorded(id))
            }
            WitnessMode::Session => {
                state.buffer.push(mark);
                state.metrics.record_buffered();

                let due = state.buffer.len() >= self.config.flush_threshold
                    || state.last_flush.elapsed() >= self.config.flush_interval();
                if due {
                    match self.flush_locked(&mut state).await? {
                        Some(batch) => Ok(WitnessOutcome::Flushed {
                            marks: batch.count,
                            batch: batch.id,
                        }),
                        None => Ok(WitnessOutcome::Deferred { pending: 0 }),
                    }
                } else {
                    Ok(WitnessOutcome::Deferred {
                        pending: state.buffer.len(),
                    })
                }
            }
            WitnessMode::Lazy => {
                state.buffer.push(mark);
                state.metrics.record_buffered();
                Ok(WitnessOutcome::Deferred {
                    pending: state.buffer.len(),
                })
            }
        }
    }

    /// Flush the buffer now, regardless of mode or triggers
    ///
    /// Returns the flushed batch, or `None` when the buffer was empty.
    pub async fn force_flush(&self) -> Result<Option<BatchMark>, WitnessError> {
        let mut state = self.state.lock().await;
        self.flush_locked(&mut state).await
    }

    /// Number of marks currently buffered
    pub async fn pending_count(&self) -> usize {
        self.state.lock().await.buffer.len()
    }

    /// Snapshot of the activity counters
    pub async fn metrics(&self) -> WitnessMetrics {
        self.state.lock().await.metrics.clone()
    }

    async fn flush_locked(&self, state: &mut BatcherState) -> Result<Option<BatchMark>, WitnessError> {
        // Buffer is cleared only after the batch lands, so a failed
        // flush retries the same marks later
        let Some(batch) = BatchMark::from_marks(&self.config.origin, state.buffer.clone()) else {
            return Ok(None);
        };

        match self.save_batch_with_retry(&batch, &mut state.metrics).await {
            Ok(()) => {
                state.metrics.record_flush(batch.count);
                state.buffer.clear();
                state.last_flush = Instant::now();
                tracing::debug!(batch = %batch.id, marks = batch.count, "flushed mark batch");
                Ok(Some(batch))
            }
            Err(e) => {
                state.metrics.record_flush_failure();
                tracing::error!(
                    error = %e,
                    pending = state.buffer.len(),
                    "batch flush failed, buffer retained"
                );
                Err(e)
            }
        }
    }

    async fn save_mark_with_retry(
        &self,
        mark: &Mark,
        metrics: &mut WitnessMetrics,
    ) -> Result<(), WitnessError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.archive.save_mark(mark).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.config.max_flush_retries => {
                    metrics.record_retry();
                    tracing::warn!(attempt, error = %e, "mark persistence failed, retrying");
                    tokio::time::sleep(self.config.retry_backoff()).await;
                }
                Err(e) => {
                    return Err(WitnessError::FlushRetriesExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
            }
        }
    }

    async fn save_batch_with_retry(
        &self,
        batch: &BatchMark,
        metrics: &mut WitnessMetrics,
    ) -> Result<(), WitnessError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.archive.save_batch_mark(batch).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.config.max_flush_retries => {
                    metrics.record_retry();
                    tracing::warn!(attempt, error = %e, "batch persistence failed, retrying");
                    tokio::time::sleep(self.config.retry_backoff()).await;
                }
                Err(e) => {
                    return Err(WitnessError::FlushRetriesExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;
    use zeroseed_domain::UmweltSnapshot;

    fn mark(response: &str) -> Mark {
        Mark::new("test", "stimulus", response, UmweltSnapshot::empty())
    }

    fn batcher(config: WitnessConfig) -> (Arc<MemoryArchive>, WitnessBatcher<MemoryArchive>) {
        let archive = Arc::new(MemoryArchive::new());
        let batcher = WitnessBatcher::new(archive.clone(), config);
        (archive, batcher)
    }

    #[tokio::test]
    async fn test_single_mode_persists_immediately() {
        let (archive, batcher) = batcher(WitnessConfig::single());

        let m = mark("created node");
        let id = m.id;
        let outcome = batcher.witness(m).await.unwrap();

        assert_eq!(outcome, WitnessOutcome::Recorded(id));
        assert_eq!(archive.mark_count().await, 1);
        assert_eq!(batcher.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_session_mode_defers_until_threshold() {
        let config = WitnessConfig {
            flush_threshold: 3,
            ..WitnessConfig::session()
        };
        let (archive, batcher) = batcher(config);

        assert_eq!(
            batcher.witness(mark("a")).await.unwrap(),
            WitnessOutcome::Deferred { pending: 1 }
        );
        assert_eq!(
            batcher.witness(mark("b")).await.unwrap(),
            WitnessOutcome::Deferred { pending: 2 }
        );
        assert_eq!(archive.batch_count().await, 0);

        // Third mark reaches the threshold and rides out in the batch
        let outcome = batcher.witness(mark("c")).await.unwrap();
        match outcome {
            WitnessOutcome::Flushed { marks, .. } => assert_eq!(marks, 3),
            other => panic!("expected flush, got {:?}", other),
        }
        assert_eq!(archive.batch_count().await, 1);
        assert_eq!(batcher.pending_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_mode_flushes_on_stale_buffer() {
        let config = WitnessConfig {
            flush_threshold: 100,
            flush_interval_secs: 30,
            ..WitnessConfig::session()
        };
        let (archive, batcher) = batcher(config);

        batcher.witness(mark("early")).await.unwrap();
        tokio::time::advance(std::time::Duration::from_secs(31)).await;

        let outcome = batcher.witness(mark("late")).await.unwrap();
        match outcome {
            WitnessOutcome::Flushed { marks, .. } => assert_eq!(marks, 2),
            other => panic!("expected flush, got {:?}", other),
        }
        assert_eq!(archive.batch_count().await, 1);
    }

    #[tokio::test]
    async fn test_lazy_mode_never_flushes_on_its_own() {
        let config = WitnessConfig {
            flush_threshold: 1,
            ..WitnessConfig::lazy()
        };
        let (archive, batcher) = batcher(config);

        for i in 0..5 {
            let outcome = batcher.witness(mark(&format!("m{}", i))).await.unwrap();
            assert_eq!(outcome, WitnessOutcome::Deferred { pending: i + 1 });
        }
        assert_eq!(archive.batch_count().await, 0);
        assert_eq!(batcher.pending_count().await, 5);
    }

    #[tokio::test]
    async fn test_force_flush_drains_buffer() {
        let (archive, batcher) = batcher(WitnessConfig::lazy());
        batcher.witness(mark("a")).await.unwrap();
        batcher.witness(mark("b")).await.unwrap();

        let batch = batcher.force_flush().await.unwrap().unwrap();
        assert_eq!(batch.count, 2);
        assert_eq!(batch.marks[0].response, "a");
        assert_eq!(batch.marks[1].response, "b");

        assert_eq!(archive.batch_count().await, 1);
        assert_eq!(batcher.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_force_flush_of_empty_buffer_is_noop() {
        let (archive, batcher) = batcher(WitnessConfig::session());

        assert!(batcher.force_flush().await.unwrap().is_none());
        assert!(batcher.force_flush().await.unwrap().is_none());
        assert_eq!(archive.batch_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_flush_retains_buffer() {
        let config = WitnessConfig {
            max_flush_retries: 2,
            ..WitnessConfig::lazy()
        };
        let (archive, batcher) = batcher(config);
        batcher.witness(mark("survivor")).await.unwrap();

        // Both attempts fail, buffer must survive
        archive.fail_next(2).await;
        let err = batcher.force_flush().await.unwrap_err();
        match err {
            WitnessError::FlushRetriesExhausted { attempts, .. } => assert_eq!(attempts, 2),
            other => panic!("expected exhausted retries, got {:?}", other),
        }
        assert_eq!(batcher.pending_count().await, 1);

        // Next flush succeeds with the same mark
        let batch = batcher.force_flush().await.unwrap().unwrap();
        assert_eq!(batch.count, 1);
        assert_eq!(batch.marks[0].response, "survivor");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_from_transient_failure() {
        let config = WitnessConfig {
            max_flush_retries: 3,
            ..WitnessConfig::single()
        };
        let (archive, batcher) = batcher(config);

        archive.fail_next(2).await;
        let outcome = batcher.witness(mark("persistent")).await.unwrap();
        assert!(matches!(outcome, WitnessOutcome::Recorded(_)));

        let metrics = batcher.metrics().await;
        assert_eq!(metrics.retries, 2);
        assert_eq!(metrics.marks_recorded, 1);
    }

    #[tokio::test]
    async fn test_metrics_track_batches() {
        let config = WitnessConfig {
            flush_threshold: 2,
            ..WitnessConfig::session()
        };
        let (_archive, batcher) = batcher(config);

        batcher.witness(mark("a")).await.unwrap();
        batcher.witness(mark("b")).await.unwrap();

        let metrics = batcher.metrics().await;
        assert_eq!(metrics.marks_buffered, 2);
        assert_eq!(metrics.batches_flushed, 1);
        assert_eq!(metrics.marks_flushed, 2);
        assert_eq!(metrics.total_persisted(), 2);
    }

    #[tokio::test]
    async fn test_flushed_batch_preserves_order() {
        let config = WitnessConfig {
            flush_threshold: 3,
            ..WitnessConfig::session()
        };
        let (archive, batcher) = batcher(config);

        batcher.witness(mark("first")).await.unwrap();
        batcher.witness(mark("second")).await.unwrap();
        batcher.witness(mark("third")).await.unwrap();

        let batches = archive.batches().await;
        let responses: Vec<&str> = batches[0].marks.iter().map(|m| m.response.as_str()).collect();
        assert_eq!(responses, vec!["first", "second", "third"]);
    }
}
