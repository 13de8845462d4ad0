//! Structural errors raised by the graph builder and the layout engine.
//!
//! Malformed-but-parseable input (cycles, duplicate edges, orphans, forward
//! references, disconnected people) is never an error; the algorithms absorb
//! it. Only the cases below abort a call.

/// Error returned by [`crate::build_graph`], [`crate::layout`] and the
/// string parsers on the boundary types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KinshipError {
    /// A relationship record carries a type outside `parent`, `spouse`, `sibling`.
    #[error("invalid relationship type '{value}' between {person1} and {person2}")]
    InvalidRelationshipType { value: String, person1: String, person2: String },
    /// The caller asked for a layout root that is not in the person list.
    #[error("unknown root person: {0}")]
    UnknownRootPerson(String),
    /// A traversal kind string outside `ancestors`, `descendants`, `siblings`, `spouses`.
    #[error("invalid traversal kind '{0}' (expected ancestors, descendants, siblings or spouses)")]
    InvalidTraversalKind(String),
    /// A root policy string that does not name a known policy.
    #[error("invalid root policy '{0}' (expected earliest_birth, largest_family or first_listed)")]
    InvalidRootPolicy(String),
}
