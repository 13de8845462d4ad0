//! Layout output: positions and edge descriptors for a rendering layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Center of a person's footprint, in layout units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    ParentChild,
    Spouse,
}

/// Marriage markers carried on spouse edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpouseMeta {
    pub marriage_year: Option<i32>,
    pub divorced: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SpouseMeta>,
}

impl Edge {
    pub(crate) fn parent_child(from: &str, to: &str) -> Self {
        Self { from: from.to_owned(), to: to.to_owned(), kind: EdgeKind::ParentChild, metadata: None }
    }

    pub(crate) fn spouse(from: &str, to: &str, meta: SpouseMeta) -> Self {
        Self { from: from.to_owned(), to: to.to_owned(), kind: EdgeKind::Spouse, metadata: Some(meta) }
    }
}

/// Result of [`crate::layout`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Person placed at generation 0, if any person was given.
    pub root: Option<String>,
    /// Exactly one entry per loaded person.
    pub positions: BTreeMap<String, Position>,
    /// In placement order.
    pub edges: Vec<Edge>,
    /// Persons placed in the overflow row, left to right.
    pub overflow: Vec<String>,
    /// Number of generation rows used by family placement (the overflow row,
    /// when present, sits at index `generations`).
    pub generations: usize,
}

impl Layout {
    #[must_use]
    pub fn position(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }

    pub fn edges_of(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from == id || e.to == id)
    }
}
