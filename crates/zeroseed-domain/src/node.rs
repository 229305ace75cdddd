//! Graph nodes, their layer placement, and field-level updates

use crate::id::NodeId;
use crate::proof::Proof;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Epistemic layer a node lives on, from 1 (axioms) to 7 (practice)
///
/// Lower layers hold the load-bearing commitments of the graph; higher
/// layers hold claims and day-to-day decisions. Placement determines
/// how much justification a node must carry: from [`Layer::PROOF_REQUIRED_FROM`]
/// upward every node needs a structured proof.
///
/// # Examples
///
/// ```
/// use zeroseed_domain::Layer;
///
/// let axioms = Layer::new(1).unwrap();
/// assert!(axioms.is_foundational());
/// assert!(!axioms.requires_proof());
///
/// let claims = Layer::new(4).unwrap();
/// assert!(claims.requires_proof());
///
/// assert!(Layer::new(0).is_err());
/// assert!(Layer::new(8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Layer(u8);

impl Layer {
    /// Lowest layer (axioms)
    pub const MIN: u8 = 1;

    /// Highest layer (practice)
    pub const MAX: u8 = 7;

    /// First layer at which a node must carry a proof
    pub const PROOF_REQUIRED_FROM: u8 = 3;

    /// Create a layer, rejecting values outside 1..=7
    pub fn new(value: u8) -> Result<Self, String> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(format!(
                "Layer must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            ));
        }
        Ok(Self(value))
    }

    /// The raw layer number
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether nodes on this layer must carry a proof
    pub fn requires_proof(&self) -> bool {
        self.0 >= Self::PROOF_REQUIRED_FROM
    }

    /// Whether this is the foundational layer (layer 1)
    pub fn is_foundational(&self) -> bool {
        self.0 == Self::MIN
    }
}

impl TryFrom<u8> for Layer {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Layer> for u8 {
    fn from(layer: Layer) -> u8 {
        layer.0
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// What role a node plays in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Foundational commitment, exempt from proof requirements
    Axiom,
    /// Normative statement derived from axioms
    Principle,
    /// Vocabulary-fixing statement
    Definition,
    /// Assertion about the world that can be contradicted
    Claim,
    /// Recorded choice with its justification
    Decision,
}

impl NodeKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Axiom => "axiom",
            NodeKind::Principle => "principle",
            NodeKind::Definition => "definition",
            NodeKind::Claim => "claim",
            NodeKind::Decision => "decision",
        }
    }

    /// Parse from a string representation
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "axiom" => Ok(NodeKind::Axiom),
            "principle" => Ok(NodeKind::Principle),
            "definition" => Ok(NodeKind::Definition),
            "claim" => Ok(NodeKind::Claim),
            "decision" => Ok(NodeKind::Decision),
            _ => Err(format!("Unknown node kind: {}", s)),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A single witnessed statement in the graph
///
/// Nodes from [`Layer::PROOF_REQUIRED_FROM`] upward must hold a [`Proof`];
/// foundational nodes (layers 1 and 2) may omit it. The engine enforces
/// that requirement at creation and modification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroNode {
    /// Unique identifier (UUIDv7, chronologically sortable)
    pub id: NodeId,
    /// Which epistemic layer the node lives on
    pub layer: Layer,
    /// Role of the node in the graph
    pub kind: NodeKind,
    /// Short human-readable statement
    pub title: String,
    /// Full statement text
    pub body: String,
    /// Structured justification, if the layer demands one
    pub proof: Option<Proof>,
    /// Free-form labels for retrieval
    pub tags: BTreeSet<String>,
    /// Unix millisecond timestamp of creation
    pub created_at: u64,
}

impl ZeroNode {
    /// Create a node with the given placement and text
    ///
    /// Timestamps are set to now; the proof starts empty and is attached
    /// by the caller when the layer requires one.
    pub fn new(
        layer: Layer,
        kind: NodeKind,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: NodeId::new(),
            layer,
            kind,
            title: title.into(),
            body: body.into(),
            proof: None,
            tags: BTreeSet::new(),
            created_at: crate::current_timestamp_ms(),
        }
    }

    /// Attach a proof (builder style)
    pub fn with_proof(mut self, proof: Proof) -> Self {
        self.proof = Some(proof);
        self
    }

    /// Add a tag (builder style)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Whether this node is a foundational axiom (axiom kind on layer 1)
    ///
    /// Foundational axioms anchor truth evaluation: an unresolved
    /// contradiction against one marks the challenger false rather
    /// than unknown.
    pub fn is_foundational_axiom(&self) -> bool {
        self.kind == NodeKind::Axiom && self.layer.is_foundational()
    }

    /// Whether this node's placement demands a proof
    pub fn requires_proof(&self) -> bool {
        self.layer.requires_proof()
    }
}

/// A field-level update to an existing node
///
/// Absent fields leave the node untouched. `apply` is pure: it returns
/// the updated copy and never mutates shared state, so callers can
/// validate the result before committing it.
///
/// # Examples
///
/// ```
/// use zeroseed_domain::{Layer, NodeDelta, NodeKind, ZeroNode};
///
/// let node = ZeroNode::new(Layer::new(4).unwrap(), NodeKind::Claim, "Title", "Body");
/// let delta = NodeDelta::default().set_title("Better title");
/// let updated = delta.apply(&node);
///
/// assert_eq!(updated.title, "Better title");
/// assert_eq!(node.title, "Title");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDelta {
    /// Replacement title, if any
    pub title: Option<String>,
    /// Replacement body, if any
    pub body: Option<String>,
    /// Replacement proof, if any
    pub proof: Option<Proof>,
    /// Tags to add
    pub add_tags: BTreeSet<String>,
    /// Tags to remove
    pub remove_tags: BTreeSet<String>,
}

impl NodeDelta {
    /// Set a replacement title (builder style)
    pub fn set_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a replacement body (builder style)
    pub fn set_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a replacement proof (builder style)
    pub fn set_proof(mut self, proof: Proof) -> Self {
        self.proof = Some(proof);
        self
    }

    /// Queue a tag addition (builder style)
    pub fn add_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tags.insert(tag.into());
        self
    }

    /// Queue a tag removal (builder style)
    pub fn remove_tag(mut self, tag: impl Into<String>) -> Self {
        self.remove_tags.insert(tag.into());
        self
    }

    /// Whether the delta changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.proof.is_none()
            && self.add_tags.is_empty()
            && self.remove_tags.is_empty()
    }

    /// Apply the delta to a node, returning the updated copy
    ///
    /// Identity, layer, kind, and creation time never change.
    pub fn apply(&self, node: &ZeroNode) -> ZeroNode {
        let mut updated = node.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(body) = &self.body {
            updated.body = body.clone();
        }
        if let Some(proof) = &self.proof {
            updated.proof = Some(proof.clone());
        }
        for tag in &self.add_tags {
            updated.tags.insert(tag.clone());
        }
        for tag in &self.remove_tags {
            updated.tags.remove(tag);
        }
        updated
    }

    /// Short description of the touched fields, for audit records
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.title.is_some() {
            parts.push("title");
        }
        if self.body.is_some() {
            parts.push("body");
        }
        if self.proof.is_some() {
            parts.push("proof");
        }
        if !self.add_tags.is_empty() || !self.remove_tags.is_empty() {
            parts.push("tags");
        }
        if parts.is_empty() {
            "no fields".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::{EvidenceTier, Proof, Qualifier};

    fn sample_proof() -> Proof {
        Proof::new(
            "Observed in three independent sessions",
            "Repeated observation under varied conditions generalizes",
            "The behavior is stable",
            Qualifier::Probably,
            EvidenceTier::Empirical,
        )
    }

    #[test]
    fn test_layer_bounds() {
        assert!(Layer::new(0).is_err());
        assert!(Layer::new(1).is_ok());
        assert!(Layer::new(7).is_ok());
        assert!(Layer::new(8).is_err());
        assert!(Layer::new(255).is_err());
    }

    #[test]
    fn test_layer_proof_requirement() {
        assert!(!Layer::new(1).unwrap().requires_proof());
        assert!(!Layer::new(2).unwrap().requires_proof());
        assert!(Layer::new(3).unwrap().requires_proof());
        assert!(Layer::new(7).unwrap().requires_proof());
    }

    #[test]
    fn test_layer_foundational() {
        assert!(Layer::new(1).unwrap().is_foundational());
        assert!(!Layer::new(2).unwrap().is_foundational());
    }

    #[test]
    fn test_layer_serde_rejects_out_of_range() {
        let ok: Result<Layer, _> = serde_json::from_str("4");
        assert_eq!(ok.unwrap().value(), 4);

        let bad: Result<Layer, _> = serde_json::from_str("9");
        assert!(bad.is_err());
    }

    #[test]
    fn test_node_kind_roundtrip() {
        for kind in [
            NodeKind::Axiom,
            NodeKind::Principle,
            NodeKind::Definition,
            NodeKind::Claim,
            NodeKind::Decision,
        ] {
            assert_eq!(NodeKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert!(NodeKind::parse("hunch").is_err());
    }

    #[test]
    fn test_node_creation() {
        let node = ZeroNode::new(
            Layer::new(4).unwrap(),
            NodeKind::Claim,
            "Rust borrow checker prevents data races",
            "Exclusive mutable access is enforced at compile time.",
        )
        .with_tag("memory-safety");

        assert_eq!(node.layer.value(), 4);
        assert_eq!(node.kind, NodeKind::Claim);
        assert!(node.proof.is_none());
        assert!(node.requires_proof());
        assert!(node.tags.contains("memory-safety"));
        assert!(node.created_at > 0);
    }

    #[test]
    fn test_foundational_axiom_detection() {
        let axiom = ZeroNode::new(
            Layer::new(1).unwrap(),
            NodeKind::Axiom,
            "Witnessing precedes knowing",
            "No statement enters the graph without an audit record.",
        );
        assert!(axiom.is_foundational_axiom());

        // An axiom placed above layer 1 is not foundational
        let elevated = ZeroNode::new(Layer::new(2).unwrap(), NodeKind::Axiom, "t", "b");
        assert!(!elevated.is_foundational_axiom());

        // A layer-1 non-axiom is not foundational either
        let principle = ZeroNode::new(Layer::new(1).unwrap(), NodeKind::Principle, "t", "b");
        assert!(!principle.is_foundational_axiom());
    }

    #[test]
    fn test_delta_apply_is_pure() {
        let node = ZeroNode::new(Layer::new(4).unwrap(), NodeKind::Claim, "Old", "Old body")
            .with_tag("keep")
            .with_tag("drop");

        let delta = NodeDelta::default()
            .set_title("New")
            .add_tag("added")
            .remove_tag("drop");

        let updated = delta.apply(&node);

        // Original untouched
        assert_eq!(node.title, "Old");
        assert!(node.tags.contains("drop"));

        // Updated copy reflects the delta
        assert_eq!(updated.title, "New");
        assert_eq!(updated.body, "Old body");
        assert!(updated.tags.contains("keep"));
        assert!(updated.tags.contains("added"));
        assert!(!updated.tags.contains("drop"));

        // Identity and creation time survive
        assert_eq!(updated.id, node.id);
        assert_eq!(updated.created_at, node.created_at);
    }

    #[test]
    fn test_delta_replaces_proof() {
        let node = ZeroNode::new(Layer::new(4).unwrap(), NodeKind::Claim, "t", "b");
        let delta = NodeDelta::default().set_proof(sample_proof());

        let updated = delta.apply(&node);
        assert!(updated.proof.is_some());
        assert!(node.proof.is_none());
    }

    #[test]
    fn test_delta_empty_and_summary() {
        let empty = NodeDelta::default();
        assert!(empty.is_empty());
        assert_eq!(empty.summary(), "no fields");

        let delta = NodeDelta::default().set_title("x").add_tag("y");
        assert!(!delta.is_empty());
        assert_eq!(delta.summary(), "title, tags");
    }

    #[test]
    fn test_node_serde_roundtrip() {
        let node = ZeroNode::new(
            Layer::new(5).unwrap(),
            NodeKind::Decision,
            "Adopt UUIDv7 ids",
            "Sortable ids remove the need for a separate sequence column.",
        )
        .with_proof(sample_proof())
        .with_tag("infrastructure");

        let json = serde_json::to_string(&node).unwrap();
        let back: ZeroNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
