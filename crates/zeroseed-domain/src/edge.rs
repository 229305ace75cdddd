//! Typed edges between graph nodes

use crate::id::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic relationship an edge asserts between two nodes
///
/// # Examples
///
/// ```
/// use zeroseed_domain::EdgeKind;
///
/// let kind = EdgeKind::Contradicts;
/// assert_eq!(kind.as_str(), "contradicts");
/// assert!(kind.is_adversarial());
///
/// let parsed: EdgeKind = "supports".parse().unwrap();
/// assert_eq!(parsed, EdgeKind::Supports);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Source strengthens the target's claim
    Supports,
    /// Source and target cannot both hold
    Contradicts,
    /// Source reconciles the tension the target participates in
    Synthesizes,
    /// Source follows from the target
    Derives,
    /// Source cites the target without epistemic weight
    References,
}

impl EdgeKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Supports => "supports",
            EdgeKind::Contradicts => "contradicts",
            EdgeKind::Synthesizes => "synthesizes",
            EdgeKind::Derives => "derives",
            EdgeKind::References => "references",
        }
    }

    /// Parse from a string representation
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "supports" => Ok(EdgeKind::Supports),
            "contradicts" => Ok(EdgeKind::Contradicts),
            "synthesizes" => Ok(EdgeKind::Synthesizes),
            "derives" => Ok(EdgeKind::Derives),
            "references" => Ok(EdgeKind::References),
            _ => Err(format!("Unknown edge kind: {}", s)),
        }
    }

    /// Whether this kind pits its endpoints against each other
    ///
    /// Adversarial edges are the only ones subject to constitutional
    /// partition checks before insertion.
    pub fn is_adversarial(&self) -> bool {
        matches!(self, EdgeKind::Contradicts)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A directed, typed edge between two nodes
///
/// Edges are identified by id but deduplicated by [`ZeroEdge::key`]:
/// at most one edge of a given kind may connect an ordered pair of
/// nodes. Resolution state is meaningful only for contradicts edges;
/// it stays `false` and `None` everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroEdge {
    /// Unique identifier
    pub id: EdgeId,
    /// Node the edge points from
    pub source: NodeId,
    /// Node the edge points to
    pub target: NodeId,
    /// Relationship asserted
    pub kind: EdgeKind,
    /// Free-text note on why the edge exists
    pub context: String,
    /// Whether a contradiction has been reconciled
    pub is_resolved: bool,
    /// The node whose synthesis reconciled the contradiction
    pub resolution: Option<NodeId>,
    /// Unix millisecond timestamp of creation
    pub created_at: u64,
}

impl ZeroEdge {
    /// Create an edge between two nodes
    pub fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            target,
            kind,
            context: String::new(),
            is_resolved: false,
            resolution: None,
            created_at: crate::current_timestamp_ms(),
        }
    }

    /// Attach free-text context (builder style)
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Deduplication key: ordered endpoints plus kind
    pub fn key(&self) -> (NodeId, NodeId, EdgeKind) {
        (self.source, self.target, self.kind)
    }

    /// Whether this is a contradiction still awaiting resolution
    pub fn is_open_contradiction(&self) -> bool {
        self.kind == EdgeKind::Contradicts && !self.is_resolved
    }

    /// Whether the edge touches the given node at either end
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// The endpoint opposite the given node, if the edge touches it
    pub fn other_endpoint(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}
