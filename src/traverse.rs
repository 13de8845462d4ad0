//! Traversal engine: ancestors, descendants, siblings and spouses.
//!
//! All queries are read-only over a built [`Graph`] and return the caller's
//! own [`Person`] records by reference. An id the graph has never seen is
//! treated as "no relationships recorded" and yields an empty result.
//! Forward references (ids named by relationships but not loaded) are walked
//! through but never returned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MAX_DEPTH;
use crate::error::KinshipError;
use crate::graph::Graph;
use crate::model::Person;
use crate::walk::{Reached, breadth_first};

/// Which relatives a traversal collects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalKind {
    Ancestors,
    Descendants,
    Siblings,
    Spouses,
}

impl TraversalKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ancestors => "ancestors",
            Self::Descendants => "descendants",
            Self::Siblings => "siblings",
            Self::Spouses => "spouses",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalKind {
    type Err = KinshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ancestors" => Ok(Self::Ancestors),
            "descendants" => Ok(Self::Descendants),
            "siblings" => Ok(Self::Siblings),
            "spouses" => Ok(Self::Spouses),
            other => Err(KinshipError::InvalidTraversalKind(other.to_owned())),
        }
    }
}

/// A relative found by a traversal, with the number of generations between
/// them and the start person (0 for siblings and spouses).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Relative<'a> {
    pub person: &'a Person,
    pub generation: usize,
}

/// Run one traversal and return the matching persons in result order.
///
/// `max_depth` bounds ancestor and descendant walks (default
/// [`DEFAULT_MAX_DEPTH`]) and is ignored for siblings and spouses.
#[must_use]
pub fn traverse<'a>(graph: &Graph<'a>, id: &str, kind: TraversalKind, max_depth: Option<usize>) -> Vec<&'a Person> {
    traverse_with_generation(graph, id, kind, max_depth)
        .into_iter()
        .map(|r| r.person)
        .collect()
}

/// Like [`traverse`], but keeps each relative's generation distance.
#[must_use]
pub fn traverse_with_generation<'a>(
    graph: &Graph<'a>,
    id: &str,
    kind: TraversalKind,
    max_depth: Option<usize>,
) -> Vec<Relative<'a>> {
    let depth = max_depth.unwrap_or(DEFAULT_MAX_DEPTH);
    let relatives = match kind {
        TraversalKind::Ancestors => ancestors_of(graph, id, depth),
        TraversalKind::Descendants => descendants_of(graph, id, depth),
        TraversalKind::Siblings => flat(siblings_of(graph, id)),
        TraversalKind::Spouses => flat(spouses_of(graph, id)),
    };
    tracing::trace!(person = id, %kind, found = relatives.len(), "traversal complete");
    relatives
}

/// Breadth-first walk up parent edges, closest generation first. Each
/// ancestor appears once even when reachable through several lineages.
#[must_use]
pub fn ancestors_of<'a>(graph: &Graph<'a>, id: &str, max_depth: usize) -> Vec<Relative<'a>> {
    let Some(start) = graph.index_of(id) else {
        return Vec::new();
    };
    let reached = breadth_first(graph.node_count(), start, max_depth, move |n| graph.parents(n));
    loaded(graph, reached)
}

/// Breadth-first walk down child edges, closest generation first.
#[must_use]
pub fn descendants_of<'a>(graph: &Graph<'a>, id: &str, max_depth: usize) -> Vec<Relative<'a>> {
    let Some(start) = graph.index_of(id) else {
        return Vec::new();
    };
    let reached = breadth_first(graph.node_count(), start, max_depth, move |n| graph.children(n));
    loaded(graph, reached)
}

/// Children of every recorded parent of `id`, excluding `id`, in parent
/// order then child order. Explicit `sibling` records are not consulted; see
/// [`Graph::declared_siblings`] for those.
#[must_use]
pub fn siblings_of<'a>(graph: &Graph<'a>, id: &str) -> Vec<&'a Person> {
    let Some(start) = graph.index_of(id) else {
        return Vec::new();
    };
    let mut seen = vec![false; graph.node_count()];
    seen[start] = true;
    let mut siblings = Vec::new();
    for &parent in graph.parents(start) {
        for &child in graph.children(parent) {
            if seen[child] {
                continue;
            }
            seen[child] = true;
            if let Some(person) = graph.person_at(child) {
                siblings.push(person);
            }
        }
    }
    siblings
}

/// Recorded spouses of `id`, in declaration order.
#[must_use]
pub fn spouses_of<'a>(graph: &Graph<'a>, id: &str) -> Vec<&'a Person> {
    let Some(start) = graph.index_of(id) else {
        return Vec::new();
    };
    graph
        .spouses(start)
        .iter()
        .filter_map(|link| graph.person_at(link.spouse))
        .collect()
}

fn loaded<'a>(graph: &Graph<'a>, reached: Vec<Reached>) -> Vec<Relative<'a>> {
    reached
        .into_iter()
        .filter_map(|r| {
            graph
                .person_at(r.index)
                .map(|person| Relative { person, generation: r.depth })
        })
        .collect()
}

fn flat(persons: Vec<&Person>) -> Vec<Relative<'_>> {
    persons
        .into_iter()
        .map(|person| Relative { person, generation: 0 })
        .collect()
}

#[cfg(test)]
#[path = "traverse_test.rs"]
mod tests;
