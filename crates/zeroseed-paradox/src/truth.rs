//! Three-valued truth

use std::fmt;

/// Truth status of a node under paraconsistent evaluation
///
/// `True` and `Unknown` are the common cases: a node is true when
/// nothing contradicts it (or every contradiction has been resolved),
/// and unknown while a contradiction stands open. `False` is reserved
/// for direct negation of a foundational axiom, the one situation
/// where the graph takes a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TruthValue {
    /// Uncontradicted, or all contradictions resolved
    True,
    /// Stands in unresolved contradiction with a foundational axiom
    False,
    /// Participates in an open contradiction
    Unknown,
}

impl TruthValue {
    /// String representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TruthValue::True => "true",
            TruthValue::False => "false",
            TruthValue::Unknown => "unknown",
        }
    }

    /// Whether evaluation reached a definite answer
    pub fn is_settled(&self) -> bool {
        !matches!(self, TruthValue::Unknown)
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
