//! Breadth-first walk with a visited set and a depth cap.
//!
//! The one traversal primitive shared by ancestor and descendant queries and
//! by root selection. The visited set both de-duplicates converging paths
//! (pedigree collapse) and guarantees termination on cyclic input.

use std::collections::VecDeque;

/// A node reached by [`breadth_first`], with its distance from the start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Reached {
    pub index: usize,
    pub depth: usize,
}

/// Walk outward from `start` along `next`, level by level, up to `max_depth`
/// hops. Each node is reported once, at the shallowest depth it is reachable,
/// in the order it is first discovered. `start` itself is never reported.
pub(crate) fn breadth_first<'g, F>(node_count: usize, start: usize, max_depth: usize, next: F) -> Vec<Reached>
where
    F: Fn(usize) -> &'g [usize],
{
    let mut visited = vec![false; node_count];
    let mut reached = Vec::new();
    let mut queue = VecDeque::from([(start, 0usize)]);
    visited[start] = true;

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for &neighbor in next(node) {
            if visited[neighbor] {
                continue;
            }
            visited[neighbor] = true;
            reached.push(Reached { index: neighbor, depth: depth + 1 });
            queue.push_back((neighbor, depth + 1));
        }
    }
    reached
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
