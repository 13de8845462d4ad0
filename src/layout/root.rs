//! Generation-0 selection.
//!
//! The claim pass places every child of a placed person, so an unplaced
//! person's recorded parents are either all unplaced or include a forward
//! reference. "Every recorded parent is placed" therefore reduces to "no
//! recorded parents", which never changes between roots. Candidates are
//! ranked once and handed out in order.

use std::cmp::Reverse;

use super::config::RootPolicy;
use super::plan::Plan;
use crate::date::parse_date;
use crate::graph::Graph;
use crate::walk::breadth_first;

/// Hands out roots among the loaded persons a [`Plan`] has not claimed yet.
#[derive(Debug)]
pub(crate) struct RootSelector {
    /// Parentless persons in policy order.
    candidates: Vec<usize>,
    next_candidate: usize,
    /// Input-order fallback cursor, for when no candidate is left.
    next_listed: usize,
    loaded: usize,
}

impl RootSelector {
    pub fn new(graph: &Graph<'_>, policy: RootPolicy) -> Self {
        let loaded = graph.persons().len();
        let mut candidates: Vec<usize> = match policy {
            RootPolicy::FirstListed => Vec::new(),
            RootPolicy::EarliestBirth | RootPolicy::LargestFamily => {
                (0..loaded).filter(|&i| graph.parents(i).is_empty()).collect()
            }
        };
        match policy {
            RootPolicy::EarliestBirth => candidates.sort_by_cached_key(|&i| birth_key(graph, i)),
            RootPolicy::LargestFamily => {
                candidates.sort_by_cached_key(|&i| (Reverse(descendant_count(graph, i)), i));
            }
            RootPolicy::FirstListed => {}
        }
        Self { candidates, next_candidate: 0, next_listed: 0, loaded }
    }

    /// Next root: the best-ranked unclaimed candidate, else the first
    /// unclaimed person in input order. `None` once everyone is claimed.
    ///
    /// Claims only ever grow, so both cursors move forward only.
    pub fn next(&mut self, plan: &Plan) -> Option<usize> {
        while let Some(&idx) = self.candidates.get(self.next_candidate) {
            if !plan.is_claimed(idx) {
                return Some(idx);
            }
            self.next_candidate += 1;
        }
        while self.next_listed < self.loaded {
            if !plan.is_claimed(self.next_listed) {
                return Some(self.next_listed);
            }
            self.next_listed += 1;
        }
        None
    }
}

/// Dated persons first, earliest date first, then input order.
fn birth_key(graph: &Graph<'_>, idx: usize) -> (bool, Option<time::Date>, usize) {
    let date = graph
        .person_at(idx)
        .and_then(|p| p.birth_date.as_deref())
        .and_then(parse_date);
    (date.is_none(), date, idx)
}

fn descendant_count(graph: &Graph<'_>, idx: usize) -> usize {
    breadth_first(graph.node_count(), idx, graph.node_count(), move |n| graph.children(n))
        .into_iter()
        .filter(|r| graph.person_at(r.index).is_some())
        .count()
}

#[cfg(test)]
#[path = "root_test.rs"]
mod tests;
