//! Relationship graph builder.
//!
//! DESIGN
//! ======
//! Every identifier seen (loaded persons first, in input order, then forward
//! references from relationship records, in first-occurrence order) gets a
//! dense index. Adjacency is stored as index lists so traversal and layout
//! never hash on the hot path; the id→index table is only consulted at the
//! boundary.
//!
//! The graph is immutable once built. Any edit to the relationship set means
//! building a new one.

use std::collections::HashMap;

use crate::error::KinshipError;
use crate::model::{FamilyTree, Person, Relationship, RelationshipKind};

/// A spouse edge as seen from one side, with the marriage markers of the
/// first record between the pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpouseLink {
    pub(crate) spouse: usize,
    pub spouse_id: String,
    pub marriage_date: Option<String>,
    pub divorce_date: Option<String>,
}

impl SpouseLink {
    #[must_use]
    pub fn is_divorced(&self) -> bool {
        self.divorce_date.is_some()
    }
}

/// Adjacency structures for one tree, borrowing the caller's person records.
#[derive(Clone, Debug)]
pub struct Graph<'a> {
    persons: Vec<&'a Person>,
    ids: Vec<String>,
    index: HashMap<String, usize>,
    children: Vec<Vec<usize>>,
    parents: Vec<Vec<usize>>,
    spouses: Vec<Vec<SpouseLink>>,
    siblings: Vec<Vec<usize>>,
}

/// Build adjacency maps from flat person and relationship lists.
///
/// Relationship records may name identifiers that are not in `persons`; they
/// are recorded as forward references and walked like any other node, but
/// never surface as persons. Duplicate records between the same pair collapse
/// into one adjacency entry. A record linking a person to themselves is
/// skipped.
///
/// # Errors
///
/// Returns [`KinshipError::InvalidRelationshipType`] for the first record whose
/// type tag is outside `parent`, `spouse`, `sibling`.
pub fn build_graph<'a>(persons: &'a [Person], relationships: &[Relationship]) -> Result<Graph<'a>, KinshipError> {
    let mut graph = Graph::with_persons(persons);

    for rel in relationships {
        let kind = rel.kind()?;
        if rel.person1_id == rel.person2_id {
            tracing::warn!(person = %rel.person1_id, %kind, "skipping self-referencing relationship");
            continue;
        }

        let a = graph.intern(&rel.person1_id);
        let b = graph.intern(&rel.person2_id);
        match kind {
            RelationshipKind::Parent => {
                push_unique(&mut graph.children[a], b);
                push_unique(&mut graph.parents[b], a);
            }
            RelationshipKind::Spouse => {
                graph.link_spouse(a, b, rel);
                graph.link_spouse(b, a, rel);
            }
            RelationshipKind::Sibling => {
                push_unique(&mut graph.siblings[a], b);
                push_unique(&mut graph.siblings[b], a);
            }
        }
    }

    tracing::debug!(
        persons = graph.persons.len(),
        nodes = graph.ids.len(),
        relationships = relationships.len(),
        "relationship graph built"
    );
    Ok(graph)
}

impl FamilyTree {
    /// Build the relationship graph for this tree.
    ///
    /// # Errors
    ///
    /// See [`build_graph`].
    pub fn graph(&self) -> Result<Graph<'_>, KinshipError> {
        build_graph(&self.persons, &self.relationships)
    }
}

fn push_unique(list: &mut Vec<usize>, value: usize) {
    if list.contains(&value) {
        tracing::trace!(value, "dropping duplicate adjacency entry");
    } else {
        list.push(value);
    }
}

impl<'a> Graph<'a> {
    fn with_persons(persons: &'a [Person]) -> Self {
        let mut graph = Self {
            persons: Vec::with_capacity(persons.len()),
            ids: Vec::with_capacity(persons.len()),
            index: HashMap::with_capacity(persons.len()),
            children: Vec::new(),
            parents: Vec::new(),
            spouses: Vec::new(),
            siblings: Vec::new(),
        };
        for person in persons {
            if graph.index.contains_key(&person.id) {
                tracing::warn!(person = %person.id, "ignoring repeated person id");
                continue;
            }
            graph.intern(&person.id);
            graph.persons.push(person);
        }
        graph
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id.to_owned());
        self.index.insert(id.to_owned(), idx);
        self.children.push(Vec::new());
        self.parents.push(Vec::new());
        self.spouses.push(Vec::new());
        self.siblings.push(Vec::new());
        idx
    }

    fn link_spouse(&mut self, from: usize, to: usize, rel: &Relationship) {
        let links = &mut self.spouses[from];
        if links.iter().any(|l| l.spouse == to) {
            tracing::trace!(from, to, "dropping duplicate spouse entry");
            return;
        }
        links.push(SpouseLink {
            spouse: to,
            spouse_id: self.ids[to].clone(),
            marriage_date: rel.marriage_date.clone(),
            divorce_date: rel.divorce_date.clone(),
        });
    }

    // ---- boundary lookups (by id) ----

    /// Loaded persons in input order (repeated ids dropped).
    #[must_use]
    pub fn persons(&self) -> &[&'a Person] {
        &self.persons
    }

    #[must_use]
    pub fn person(&self, id: &str) -> Option<&'a Person> {
        self.index_of(id).and_then(|idx| self.person_at(idx))
    }

    /// Whether `id` is a loaded person (not merely a forward reference).
    #[must_use]
    pub fn contains_person(&self, id: &str) -> bool {
        self.person(id).is_some()
    }

    /// Child ids of `id` in first-declaration order. Empty for unknown ids.
    #[must_use]
    pub fn children_of(&self, id: &str) -> Vec<&str> {
        self.ids_of(id, move |idx| self.children[idx].as_slice())
    }

    /// Parent ids of `id` in first-declaration order. Empty for unknown ids.
    #[must_use]
    pub fn parents_of(&self, id: &str) -> Vec<&str> {
        self.ids_of(id, move |idx| self.parents[idx].as_slice())
    }

    /// Spouse links of `id` in first-declaration order, with marriage markers.
    #[must_use]
    pub fn spouse_links(&self, id: &str) -> &[SpouseLink] {
        match self.index_of(id) {
            Some(idx) => &self.spouses[idx],
            None => &[],
        }
    }

    /// Ids recorded through explicit `sibling` records. These are kept apart
    /// from siblinghood derived through shared parents.
    #[must_use]
    pub fn declared_siblings(&self, id: &str) -> Vec<&str> {
        self.ids_of(id, move |idx| self.siblings[idx].as_slice())
    }

    fn ids_of<'g>(&'g self, id: &str, adjacency: impl Fn(usize) -> &'g [usize]) -> Vec<&'g str> {
        self.index_of(id)
            .map(|idx| adjacency(idx).iter().map(|&n| self.ids[n].as_str()).collect())
            .unwrap_or_default()
    }

    // ---- index-level access for traversal and layout ----

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn id_at(&self, idx: usize) -> &str {
        &self.ids[idx]
    }

    pub(crate) fn person_at(&self, idx: usize) -> Option<&'a Person> {
        self.persons.get(idx).copied()
    }

    /// Number of indexed nodes, forward references included.
    pub(crate) fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn children(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    pub(crate) fn parents(&self, idx: usize) -> &[usize] {
        &self.parents[idx]
    }

    pub(crate) fn spouses(&self, idx: usize) -> &[SpouseLink] {
        &self.spouses[idx]
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
