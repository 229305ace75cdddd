//! Witness pipeline: every mutation leaves a durable audit record
//!
//! Marks flow from the mutation path into an [`Archive`] through a
//! [`WitnessBatcher`], which applies one of three persistence modes:
//!
//! - **single**: every mark is persisted on arrival
//! - **session**: marks buffer and flush as one batch when the buffer
//!   reaches a size threshold or an age limit
//! - **lazy**: marks buffer until an explicit flush
//!
//! A failed flush keeps the buffer intact and retries on the next
//! trigger, so the audit trail loses nothing short of a crash. The
//! optional [`WitnessWorker`] drives the age trigger from a background
//! task and drains the buffer on shutdown.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod archive;
mod batcher;
mod config;
mod error;
mod metrics;
mod worker;

pub use archive::{Archive, MemoryArchive};
pub use batcher::{WitnessBatcher, WitnessOutcome};
pub use config::{WitnessConfig, WitnessMode};
pub use error::WitnessError;
pub use metrics::WitnessMetrics;
pub use worker::WitnessWorker;
