//! Placement pass: turns a measured [`Plan`] into coordinates and edges.

use std::collections::HashSet;

use super::config::Metrics;
use super::plan::Plan;
use super::types::{Edge, EdgeKind, Position, SpouseMeta};
use crate::date::parse_year;
use crate::graph::{Graph, SpouseLink};

/// Accumulates positions (by node index) and edges in placement order.
#[derive(Debug)]
pub(crate) struct Placement {
    pub positions: Vec<Option<Position>>,
    pub edges: Vec<Edge>,
    emitted: HashSet<(usize, usize, EdgeKind)>,
}

impl Placement {
    pub fn new(node_count: usize) -> Self {
        Self { positions: vec![None; node_count], edges: Vec::new(), emitted: HashSet::new() }
    }

    /// Place the family tree claimed from `root`, its footprint starting at
    /// `left`. Pre-order on an explicit stack of `(head, next child, left
    /// edge of next child)`.
    pub fn place_family(&mut self, graph: &Graph<'_>, plan: &Plan, metrics: &Metrics, root: usize, left: f64) {
        let start = self.place_row(graph, plan, metrics, root, left);
        let mut stack = vec![(root, 0usize, start)];

        while let Some((head, next, child_left)) = stack.last_mut() {
            let Some(&child) = plan.families[*head].children.get(*next) else {
                stack.pop();
                continue;
            };
            *next += 1;
            let (head, left) = (*head, *child_left);
            *child_left += plan.width[child] + metrics.sibling_gap;

            self.link_parent(graph, head, child);
            for partner in &plan.families[head].partners {
                self.link_parent(graph, partner.person(), child);
            }
            let start = self.place_row(graph, plan, metrics, child, left);
            stack.push((child, 0, start));
        }
    }

    /// Position `head` and their partner row centered in a footprint starting
    /// at `left`. Returns the left edge of the children block.
    fn place_row(&mut self, graph: &Graph<'_>, plan: &Plan, metrics: &Metrics, head: usize, left: f64) -> f64 {
        let family = &plan.families[head];
        let width = plan.width[head];

        #[allow(clippy::cast_precision_loss)]
        let y = plan.level[head].unwrap_or_default() as f64 * metrics.generation_height;
        let head_x = left + (width - plan.row_width(head, metrics)) / 2.0 + metrics.node_width / 2.0;
        self.positions[head] = Some(Position { x: head_x, y });

        for (i, partner) in family.partners.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let x = head_x + (i + 1) as f64 * (metrics.node_width + metrics.spouse_gap);
            self.positions[partner.person()] = Some(Position { x, y });
            self.link_spouse(graph, partner.via, &partner.link);
        }

        left + (width - plan.children_width(head, metrics)) / 2.0
    }

    /// Emit edges between placed persons that the family tree did not
    /// already connect (a second parent in another family, a spouse claimed
    /// elsewhere), as long as they keep parents one generation above children
    /// and spouses on the same generation.
    pub fn link_remaining(&mut self, graph: &Graph<'_>, plan: &Plan) {
        for idx in 0..graph.persons().len() {
            let Some(level) = plan.level[idx] else {
                continue;
            };
            for &child in graph.children(idx) {
                if plan.level[child] == Some(level + 1) {
                    self.link_parent(graph, idx, child);
                }
            }
            for link in graph.spouses(idx) {
                if plan.level[link.spouse] == Some(level) {
                    self.link_spouse(graph, idx, link);
                }
            }
        }
    }

    /// Place `persons` left to right on generation row `row`, without edges.
    pub fn place_overflow(&mut self, persons: &[usize], row: usize, metrics: &Metrics) {
        #[allow(clippy::cast_precision_loss)]
        let y = row as f64 * metrics.generation_height;
        for (i, &idx) in persons.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let x = metrics.node_width / 2.0 + i as f64 * (metrics.node_width + metrics.sibling_gap);
            self.positions[idx] = Some(Position { x, y });
        }
    }

    fn link_parent(&mut self, graph: &Graph<'_>, parent: usize, child: usize) {
        if !graph.children(parent).contains(&child) {
            return;
        }
        if self.emitted.insert((parent, child, EdgeKind::ParentChild)) {
            self.edges.push(Edge::parent_child(graph.id_at(parent), graph.id_at(child)));
        }
    }

    fn link_spouse(&mut self, graph: &Graph<'_>, from: usize, link: &SpouseLink) {
        let key = (from.min(link.spouse), from.max(link.spouse), EdgeKind::Spouse);
        if self.emitted.insert(key) {
            let meta = SpouseMeta {
                marriage_year: link.marriage_date.as_deref().and_then(parse_year),
                divorced: link.is_divorced(),
            };
            self.edges.push(Edge::spouse(graph.id_at(from), &link.spouse_id, meta));
        }
    }
}
