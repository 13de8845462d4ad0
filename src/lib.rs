//! Relationship graph, traversal and layout core for family trees.
//!
//! The crate takes one tree's worth of flat records (people plus pairwise
//! `parent` / `spouse` / `sibling` relationships), builds immutable adjacency
//! structures over them, and answers two kinds of questions: who is related
//! to whom (ancestors, descendants, siblings, spouses), and where every person
//! sits on a 2D plane so that parents are above children, spouses are side by
//! side, and sibling subtrees never overlap.
//!
//! There is no I/O here. Callers own the [`Person`] and [`Relationship`]
//! records; the core borrows them for the duration of a computation and hands
//! back references, coordinates and edge descriptors.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Input records and the [`FamilyTree`] snapshot |
//! | [`graph`] | Builds the arena-backed adjacency [`Graph`] |
//! | [`traverse`] | Ancestor / descendant / sibling / spouse queries |
//! | [`layout`](mod@layout) | Generational layout with overflow placement |
//! | [`date`] | Lenient genealogical date parsing |
//! | [`error`] | [`KinshipError`] |
//! | [`consts`] | Default layout constants and traversal depth |

pub mod consts;
pub mod date;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod traverse;
mod walk;

pub use error::KinshipError;
pub use graph::{Graph, SpouseLink, build_graph};
pub use layout::{Disconnected, Edge, EdgeKind, Layout, LayoutOptions, Position, RootPolicy, SpouseMeta, layout};
pub use model::{FamilyTree, Gender, Person, Relationship, RelationshipKind};
pub use traverse::{Relative, TraversalKind, traverse, traverse_with_generation};
