//! Generational layout engine.
//!
//! Assigns every loaded person a 2D position in abstract layout units:
//! parents one generation above their children, spouses beside each other on
//! the same generation, sibling subtrees side by side without overlap. Nobody
//! knows their own coordinates up front; they fall out of three linear
//! passes over the graph:
//!
//! 1. **Claim** (`plan`): pre-order walk from the root deciding which couple
//!    owns each reachable person and at which generation.
//! 2. **Measure** (`plan`): bottom-up subtree widths over the claimed tree.
//! 3. **Place** (`place`): top-down coordinates, children centered under
//!    their couple, then the persons the walk never reached.
//!
//! The output is fully determined by the input order of persons and
//! relationships plus the options; there is no randomness and no dependence on
//! hash iteration order.

pub mod config;
mod place;
mod plan;
mod root;
pub mod types;

pub use config::{Disconnected, LayoutOptions, RootPolicy};
pub use types::{Edge, EdgeKind, Layout, Position, SpouseMeta};

use crate::error::KinshipError;
use crate::graph::Graph;
use place::Placement;
use plan::Plan;
use root::RootSelector;

/// Lay out every person in `graph`.
///
/// The root is `options.root_id` when given, otherwise the one chosen by
/// `options.root_policy`. Persons never reached from the root go to the
/// overflow row or, with [`Disconnected::SideBySide`], into their own
/// families to the right.
///
/// # Errors
///
/// Returns [`KinshipError::UnknownRootPerson`] when `options.root_id` names
/// someone who is not in the graph's person list. Nothing else fails.
pub fn layout(graph: &Graph<'_>, options: &LayoutOptions) -> Result<Layout, KinshipError> {
    let metrics = options.metrics();
    let node_count = graph.node_count();

    let mut plan = Plan::new(node_count);
    let mut selector = None;
    let root = match options.root_id.as_deref() {
        Some(id) => Some(
            graph
                .index_of(id)
                .filter(|&idx| graph.person_at(idx).is_some())
                .ok_or_else(|| KinshipError::UnknownRootPerson(id.to_owned()))?,
        ),
        None => selector
            .get_or_insert_with(|| RootSelector::new(graph, options.root_policy))
            .next(&plan),
    };
    let Some(root) = root else {
        return Ok(Layout::default());
    };

    plan.claim_from(graph, root);
    let mut roots = vec![root];
    if options.disconnected == Disconnected::SideBySide {
        let selector = selector.get_or_insert_with(|| RootSelector::new(graph, options.root_policy));
        while let Some(next) = selector.next(&plan) {
            plan.claim_from(graph, next);
            roots.push(next);
        }
    }
    plan.measure(&metrics);

    let mut placement = Placement::new(node_count);
    let mut left = 0.0;
    for &family_root in &roots {
        placement.place_family(graph, &plan, &metrics, family_root, left);
        left += plan.width[family_root] + metrics.sibling_gap;
    }
    placement.link_remaining(graph, &plan);

    let generations = plan.deepest_level().map_or(0, |deepest| deepest + 1);
    let overflow: Vec<usize> = (0..graph.persons().len()).filter(|&idx| !plan.is_claimed(idx)).collect();
    placement.place_overflow(&overflow, generations, &metrics);

    let positions = (0..graph.persons().len())
        .filter_map(|idx| placement.positions[idx].map(|pos| (graph.id_at(idx).to_owned(), pos)))
        .collect();
    let result = Layout {
        root: Some(graph.id_at(root).to_owned()),
        positions,
        edges: placement.edges,
        overflow: overflow.iter().map(|&idx| graph.id_at(idx).to_owned()).collect(),
        generations,
    };

    tracing::debug!(
        root = graph.id_at(root),
        families = roots.len(),
        placed = result.positions.len(),
        overflow = result.overflow.len(),
        edges = result.edges.len(),
        generations,
        "layout computed"
    );
    Ok(result)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
