//! Claim and measurement passes.
//!
//! DESIGN
//! ======
//! A family graph is a DAG at best (several parents, remarriage, pedigree
//! collapse) and may even contain cycles, so "the subtree of a person" is only
//! defined relative to a visiting order. The claim pass fixes that order once:
//! a pre-order walk from the root in which each person is owned by the first
//! couple that reaches it, either as a spouse (same generation) or as a child
//! (one generation down). Spouses of claimed spouses join the same row, so a
//! remarried partner's earlier spouse stays with the family. The result is a
//! plain tree of families.
//!
//! Widths are then measured bottom-up over that tree in a single sweep
//! (reverse pre-order), so nothing is re-measured and no visited set is ever
//! copied. Placement only reads the width table.

use super::config::Metrics;
use crate::graph::{Graph, SpouseLink};

/// A spouse placed in a family row, with the link that brought them in.
#[derive(Clone, Debug)]
pub(crate) struct Partner {
    /// Row member the link was followed from: the head, or an earlier partner.
    pub via: usize,
    pub link: SpouseLink,
}

impl Partner {
    pub fn person(&self) -> usize {
        self.link.spouse
    }
}

/// One claimed family: a head, the spouses placed beside them, and the
/// children placed below them.
#[derive(Clone, Debug, Default)]
pub(crate) struct Family {
    /// Spouses claimed into the head's row, left to right. A partner's own
    /// spouses follow that partner.
    pub partners: Vec<Partner>,
    pub children: Vec<usize>,
}

/// Output of the claim and measurement passes for one or more roots.
#[derive(Debug)]
pub(crate) struct Plan {
    /// Generation of every claimed person, by node index.
    pub level: Vec<Option<usize>>,
    /// Family data for heads, by node index.
    pub families: Vec<Family>,
    /// Subtree width for heads, by node index.
    pub width: Vec<f64>,
    /// Heads in claim order.
    pub heads: Vec<usize>,
}

/// A claimed head whose children are still being walked.
struct Frame {
    head: usize,
    level: usize,
    children: Vec<usize>,
    next: usize,
}

impl Plan {
    pub fn new(node_count: usize) -> Self {
        Self {
            level: vec![None; node_count],
            families: vec![Family::default(); node_count],
            width: vec![0.0; node_count],
            heads: Vec::new(),
        }
    }

    pub fn is_claimed(&self, idx: usize) -> bool {
        self.level[idx].is_some()
    }

    /// Claim `root` at generation 0 and everything reachable below it.
    ///
    /// Walks pre-order on an explicit stack, so depth is bounded by memory
    /// rather than by the call stack.
    pub fn claim_from(&mut self, graph: &Graph<'_>, root: usize) {
        let first_head = self.heads.len();
        self.level[root] = Some(0);
        let mut stack = vec![self.open(graph, root, 0)];

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.children.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let (head, level) = (frame.head, frame.level + 1);
            if graph.person_at(child).is_none() || self.is_claimed(child) {
                continue;
            }
            self.level[child] = Some(level);
            self.families[head].children.push(child);
            stack.push(self.open(graph, child, level));
        }

        tracing::trace!(root = graph.id_at(root), heads = self.heads.len() - first_head, "claimed family");
    }

    /// Record `head` in claim order, claim their spouse row and list the
    /// couple's children still to walk.
    fn open(&mut self, graph: &Graph<'_>, head: usize, level: usize) -> Frame {
        self.heads.push(head);
        self.claim_partners(graph, head, level);
        let children = couple_children(graph, head, &self.families[head].partners);
        Frame { head, level, children, next: 0 }
    }

    /// Claim every loaded person joined to `head` through spouse links alone,
    /// depth-first so each partner's other spouses sit right after them.
    fn claim_partners(&mut self, graph: &Graph<'_>, head: usize, level: usize) {
        let mut pending: Vec<(usize, &SpouseLink)> = graph.spouses(head).iter().rev().map(|l| (head, l)).collect();
        while let Some((via, link)) = pending.pop() {
            let spouse = link.spouse;
            if graph.person_at(spouse).is_none() || self.is_claimed(spouse) {
                continue;
            }
            self.level[spouse] = Some(level);
            self.families[head].partners.push(Partner { via, link: link.clone() });
            pending.extend(graph.spouses(spouse).iter().rev().map(|l| (spouse, l)));
        }
    }

    /// Fill `width` for every head claimed so far.
    pub fn measure(&mut self, metrics: &Metrics) {
        for &head in self.heads.iter().rev() {
            let family = &self.families[head];
            let row = metrics.row_width(family.partners.len());
            let below = self.children_width(head, metrics);
            self.width[head] = row.max(below);
        }
    }

    /// Combined width of the children's subtrees, gaps included.
    pub fn children_width(&self, head: usize, metrics: &Metrics) -> f64 {
        let children = &self.families[head].children;
        if children.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let gaps = (children.len() - 1) as f64 * metrics.sibling_gap;
        children.iter().map(|&c| self.width[c]).sum::<f64>() + gaps
    }

    /// Width of the head plus their claimed spouses.
    pub fn row_width(&self, head: usize, metrics: &Metrics) -> f64 {
        metrics.row_width(self.families[head].partners.len())
    }

    pub fn deepest_level(&self) -> Option<usize> {
        self.level.iter().flatten().copied().max()
    }
}

/// Children of a couple: the head's own children in declaration order, then
/// each partner's children not already listed.
fn couple_children(graph: &Graph<'_>, head: usize, partners: &[Partner]) -> Vec<usize> {
    let mut children = graph.children(head).to_vec();
    for partner in partners {
        for &child in graph.children(partner.person()) {
            if !children.contains(&child) {
                children.push(child);
            }
        }
    }
    children
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
