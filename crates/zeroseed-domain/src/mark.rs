//! Immutable audit records and their batched aggregation

use crate::id::{BatchId, MarkId, NodeId};
use crate::proof::Proof;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Snapshot of the acting observer's context at mutation time
///
/// Opaque to the graph core: it is captured, persisted, and replayed
/// verbatim. Consumers that know the observer's schema may inspect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UmweltSnapshot(serde_json::Value);

impl UmweltSnapshot {
    /// An empty snapshot (observer had nothing to report)
    pub fn empty() -> Self {
        Self(serde_json::Value::Null)
    }

    /// Wrap an arbitrary JSON value
    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Whether the snapshot carries no information
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }
}

impl Default for UmweltSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// An immutable audit record of one logical mutation
///
/// Created exactly once per mutation and never modified afterward.
/// `stimulus` records what was asked for, `response` what actually
/// changed; `links` names the nodes the record describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Unique identifier (UUIDv7, chronologically sortable)
    pub id: MarkId,
    /// Who or what performed the mutation
    pub origin: String,
    /// What triggered the mutation (the delta, serialized)
    pub stimulus: String,
    /// What changed as a result
    pub response: String,
    /// Observer context at mutation time
    pub umwelt: UmweltSnapshot,
    /// Nodes this record describes
    pub links: Vec<NodeId>,
    /// Unix millisecond timestamp of creation
    pub timestamp: u64,
    /// Justification, required when the mutation targets a proof-bearing layer
    pub proof: Option<Proof>,
    /// Free-form labels for retrieval
    pub tags: BTreeSet<String>,
}

impl Mark {
    /// Create a mark for one mutation
    pub fn new(
        origin: impl Into<String>,
        stimulus: impl Into<String>,
        response: impl Into<String>,
        umwelt: UmweltSnapshot,
    ) -> Self {
        Self {
            id: MarkId::new(),
            origin: origin.into(),
            stimulus: stimulus.into(),
            response: response.into(),
            umwelt,
            links: Vec::new(),
            timestamp: crate::current_timestamp_ms(),
            proof: None,
            tags: BTreeSet::new(),
        }
    }

    /// Link the mark to a node it describes (builder style)
    pub fn with_link(mut self, node: NodeId) -> Self {
        self.links.push(node);
        self
    }

    /// Attach the justification carried by the mutation (builder style)
    pub fn with_proof(mut self, proof: Proof) -> Self {
        self.proof = Some(proof);
        self
    }

    /// Add a tag (builder style)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }
}

/// An ordered aggregation of buffered marks, flushed as one record
///
/// Invariants: `count == marks.len()`; [`BatchMark::into_marks`]
/// reproduces the buffered marks losslessly in order. An empty batch
/// cannot be constructed, which is what makes flushing an empty buffer
/// a no-op rather than a degenerate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMark {
    /// Unique identifier
    pub id: BatchId,
    /// The batcher's configured origin
    pub origin: String,
    /// The aggregated marks, in buffer order
    pub marks: Vec<Mark>,
    /// Number of aggregated marks, always `marks.len()`
    pub count: usize,
    /// Timestamp of the first aggregated mark
    pub first_timestamp: u64,
    /// Timestamp of the last aggregated mark
    pub last_timestamp: u64,
    /// Free-form labels for retrieval
    pub tags: BTreeSet<String>,
}

impl BatchMark {
    /// Aggregate marks into a batch, preserving order
    ///
    /// Returns `None` for an empty input: no batch record exists for
    /// nothing-to-flush.
    pub fn from_marks(origin: impl Into<String>, marks: Vec<Mark>) -> Option<Self> {
        let first = marks.first()?.timestamp;
        let last = marks.last().map_or(first, |m| m.timestamp);
        let count = marks.len();
        Some(Self {
            id: BatchId::new(),
            origin: origin.into(),
            marks,
            count,
            first_timestamp: first,
            last_timestamp: last,
            tags: BTreeSet::new(),
        })
    }

    /// Add a tag (builder style)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Unpack the batch back into its marks, in order
    pub fn into_marks(self) -> Vec<Mark> {
        self.marks
    }
}
