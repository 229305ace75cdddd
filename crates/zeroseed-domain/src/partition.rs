//! Constitutional partitioning of nodes

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default constitutional score threshold for the dominant partition
pub const DEFAULT_PARTITION_THRESHOLD: f64 = 0.6;

/// Which constitutional partition a node falls in
///
/// Contradictions may only connect nodes within the same partition.
/// That containment is what keeps one low-value contradiction from
/// infecting well-justified claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    /// Constitutionally well-aligned (score at or above the threshold)
    Dominant,
    /// Constitutionally weak (score below half the threshold)
    Recessive,
    /// Neither clearly aligned nor clearly weak, or never scored
    Incomparable,
}

impl Partition {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Dominant => "dominant",
            Partition::Recessive => "recessive",
            Partition::Incomparable => "incomparable",
        }
    }

    /// Classify a constitutional score against a threshold
    ///
    /// Scores at or above `threshold` are dominant; scores below
    /// `threshold / 2` are recessive; everything between is
    /// incomparable.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            Partition::Dominant
        } else if score < threshold / 2.0 {
            Partition::Recessive
        } else {
            Partition::Incomparable
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Node-to-partition assignment computed from constitutional scores
///
/// Nodes absent from the map were never scored and report
/// [`Partition::Incomparable`]. The map records the threshold it was
/// computed with, so a rejection can name the rule it applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionMap {
    assignments: HashMap<NodeId, Partition>,
    threshold: f64,
}

impl PartitionMap {
    /// Create an empty map with the given threshold
    pub fn new(threshold: f64) -> Self {
        Self {
            assignments: HashMap::new(),
            threshold,
        }
    }

    /// The threshold this map was computed with
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Record a node's partition from its constitutional score
    pub fn assign(&mut self, node: NodeId, score: f64) {
        self.assignments
            .insert(node, Partition::from_score(score, self.threshold));
    }

    /// Record a node's partition directly
    pub fn assign_partition(&mut self, node: NodeId, partition: Partition) {
        self.assignments.insert(node, partition);
    }

    /// The partition of a node; unscored nodes are incomparable
    pub fn partition_of(&self, node: NodeId) -> Partition {
        self.assignments
            .get(&node)
            .copied()
            .unwrap_or(Partition::Incomparable)
    }

    /// Whether two nodes fall in the same partition
    pub fn same_partition(&self, a: NodeId, b: NodeId) -> bool {
        self.partition_of(a) == self.partition_of(b)
    }

    /// Number of scored nodes
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no node has been scored
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterate over the scored nodes and their partitions
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Partition)> {
        self.assignments.iter()
    }
}

impl Default for PartitionMap {
    fn default() -> Self {
        Self::new(DEFAULT_PARTITION_THRESHOLD)
    }
}
