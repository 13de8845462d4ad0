//! Shared defaults for traversal and layout.

// ── Traversal ───────────────────────────────────────────────────

/// Generation cap applied when a caller does not pass one. Guards against
/// pathological cyclic input; real pedigrees rarely exceed it.
pub const DEFAULT_MAX_DEPTH: usize = 10;

// ── Layout (abstract layout units) ──────────────────────────────

/// Horizontal footprint of a single person.
pub const DEFAULT_NODE_WIDTH: f64 = 1.0;

/// Vertical distance between consecutive generations.
pub const DEFAULT_GENERATION_HEIGHT: f64 = 1.5;

/// Horizontal gap between adjacent sibling subtrees.
pub const DEFAULT_SIBLING_GAP: f64 = 0.5;

/// Horizontal gap between a person and a spouse placed beside them.
pub const DEFAULT_SPOUSE_GAP: f64 = 0.25;
