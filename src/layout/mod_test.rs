//! Tests for the layout engine: worked scenarios, then structural invariants.

use super::*;
use crate::consts::{DEFAULT_GENERATION_HEIGHT, DEFAULT_NODE_WIDTH};
use crate::graph::build_graph;
use crate::model::{Gender, Person, Relationship};

fn people(ids: &[&str]) -> Vec<Person> {
    ids.iter().map(|id| Person::new(*id, id.to_uppercase(), Gender::Male)).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn pos(layout: &Layout, id: &str) -> Position {
    layout.position(id).unwrap_or_else(|| panic!("no position for {id}"))
}

fn edge_pairs(layout: &Layout, kind: EdgeKind) -> Vec<(&str, &str)> {
    layout
        .edges
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect()
}

/// Three generations with a remarriage, a step-child, in-laws and a
/// disconnected household.
fn extended_family() -> (Vec<Person>, Vec<Relationship>) {
    let mut persons = people(&[
        "grandpa", "grandma", "dad", "mum", "aunt", "uncle_in_law", "me", "sis", "cousin1", "cousin2",
        "dad_second_wife", "half_bro", "stepkid", "neighbour", "neighbour_kid",
    ]);
    persons[0].birth_date = Some("1930-02-01".to_owned());
    persons[1].birth_date = Some("1932".to_owned());
    let rels = vec![
        Relationship::spouse("grandpa", "grandma").married("1955-06-01"),
        Relationship::parent("grandpa", "dad"),
        Relationship::parent("grandma", "dad"),
        Relationship::parent("grandpa", "aunt"),
        Relationship::parent("grandma", "aunt"),
        Relationship::spouse("dad", "mum").married("1980").divorced("1995"),
        Relationship::spouse("dad", "dad_second_wife").married("1998-03-03"),
        Relationship::parent("dad", "me"),
        Relationship::parent("mum", "me"),
        Relationship::parent("dad", "sis"),
        Relationship::parent("mum", "sis"),
        Relationship::parent("dad", "half_bro"),
        Relationship::parent("dad_second_wife", "half_bro"),
        Relationship::parent("dad_second_wife", "stepkid"),
        Relationship::spouse("aunt", "uncle_in_law"),
        Relationship::parent("aunt", "cousin1"),
        Relationship::parent("uncle_in_law", "cousin1"),
        Relationship::parent("aunt", "cousin2"),
        Relationship::parent("neighbour", "neighbour_kid"),
    ];
    (persons, rels)
}

fn assert_invariants(graph: &Graph<'_>, layout: &Layout, options: &LayoutOptions) {
    let metrics = options.metrics();

    // Completeness: one position per loaded person, nothing else.
    assert_eq!(layout.positions.len(), graph.persons().len());
    for person in graph.persons() {
        assert!(layout.positions.contains_key(&person.id), "{} missing", person.id);
    }

    for edge in &layout.edges {
        let from = pos(layout, &edge.from);
        let to = pos(layout, &edge.to);
        match edge.kind {
            EdgeKind::ParentChild => {
                assert!(close(to.y - from.y, metrics.generation_height), "{} -> {}", edge.from, edge.to);
            }
            EdgeKind::Spouse => assert!(close(from.y, to.y), "{} = {}", edge.from, edge.to),
        }
    }

    // Siblings under the same parent never overlap.
    for person in graph.persons() {
        let mut kids: Vec<Position> = layout
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::ParentChild && e.from == person.id)
            .map(|e| pos(layout, &e.to))
            .collect();
        kids.sort_by(|a, b| a.x.total_cmp(&b.x));
        for pair in kids.windows(2) {
            let gap = pair[1].x - pair[0].x;
            assert!(gap + 1e-9 >= metrics.node_width, "siblings of {} overlap", person.id);
        }
    }

    // No two persons share a spot.
    let spots: Vec<Position> = layout.positions.values().copied().collect();
    for (i, a) in spots.iter().enumerate() {
        for b in &spots[i + 1..] {
            let same_row = close(a.y, b.y);
            assert!(!same_row || (a.x - b.x).abs() + 1e-9 >= metrics.node_width, "{a:?} overlaps {b:?}");
        }
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn parent_with_two_children_centers_them_below() {
    let persons = people(&["a", "b", "c"]);
    let rels = vec![Relationship::parent("a", "b"), Relationship::parent("a", "c")];
    let graph = build_graph(&persons, &rels).expect("graph");
    let layout = layout(&graph, &LayoutOptions::default()).expect("layout");

    assert_eq!(layout.root.as_deref(), Some("a"));
    let (a, b, c) = (pos(&layout, "a"), pos(&layout, "b"), pos(&layout, "c"));
    assert!(close(a.y, 0.0));
    assert!(close(b.y, DEFAULT_GENERATION_HEIGHT));
    assert!(close(c.y, DEFAULT_GENERATION_HEIGHT));
    assert!(c.x - b.x >= DEFAULT_NODE_WIDTH);
    assert!(close(a.x, f64::midpoint(b.x, c.x)));
    assert_eq!(edge_pairs(&layout, EdgeKind::ParentChild), vec![("a", "b"), ("a", "c")]);
    assert!(edge_pairs(&layout, EdgeKind::Spouse).is_empty());
}

#[test]
fn default_metrics_give_expected_coordinates() {
    let persons = people(&["a", "b", "c"]);
    let rels = vec![Relationship::parent("a", "b"), Relationship::parent("a", "c")];
    let graph = build_graph(&persons, &rels).expect("graph");
    let layout = layout(&graph, &LayoutOptions::default()).expect("layout");

    // children span 1 + 0.5 + 1 = 2.5
    assert_eq!(pos(&layout, "b"), Position { x: 0.5, y: 1.5 });
    assert_eq!(pos(&layout, "c"), Position { x: 2.0, y: 1.5 });
    assert_eq!(pos(&layout, "a"), Position { x: 1.25, y: 0.0 });
}

#[test]
fn spouses_share_a_generation_side_by_side() {
    let persons = people(&["a", "b"]);
    let rels = vec![Relationship::spouse("a", "b")];
    let graph = build_graph(&persons, &rels).expect("graph");
    let layout = layout(&graph, &LayoutOptions::default()).expect("layout");

    let (a, b) = (pos(&layout, "a"), pos(&layout, "b"));
    assert!(close(a.y, b.y));
    assert!(close(b.x - a.x, DEFAULT_NODE_WIDTH + crate::consts::DEFAULT_SPOUSE_GAP));
    assert_eq!(edge_pairs(&layout, EdgeKind::Spouse), vec![("a", "b")]);
    assert!(layout.overflow.is_empty());
}

#[test]
fn unrelated_person_goes_to_overflow_row() {
    let persons = people(&["a", "b", "c", "d"]);
    let rels = vec![Relationship::parent("a", "b"), Relationship::parent("a", "c")];
    let graph = build_graph(&persons, &rels).expect("graph");
    let layout = layout(&graph, &LayoutOptions::default()).expect("layout");

    assert_eq!(layout.generations, 2);
    assert_eq!(layout.overflow, vec!["d"]);
    let d = pos(&layout, "d");
    assert!(close(d.y, 2.0 * DEFAULT_GENERATION_HEIGHT));
    assert!(close(d.x, DEFAULT_NODE_WIDTH / 2.0));
    assert_eq!(layout.edges_of("d").count(), 0);
}

#[test]
fn overflow_row_keeps_input_order_and_drops_edges() {
    let persons = people(&["root", "x", "y", "z"]);
    let rels = vec![Relationship::parent("x", "y"), Relationship::spouse("y", "z")];
    let options = LayoutOptions::default().with_root("root");
    let graph = build_graph(&persons, &rels).expect("graph");
    let layout = layout(&graph, &options).expect("layout");

    assert_eq!(layout.overflow, vec!["x", "y", "z"]);
    let xs: Vec<f64> = ["x", "y", "z"].iter().map(|id| pos(&layout, id).x).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
    assert!(layout.edges.is_empty());
}

#[test]
fn spouse_edges_carry_marriage_metadata() {
    let persons = people(&["a", "b"]);
    let rels = vec![Relationship::spouse("a", "b").married("1971-09-12").divorced("1980")];
    let graph = build_graph(&persons, &rels).expect("graph");
    let layout = layout(&graph, &LayoutOptions::default()).expect("layout");

    let edge = &layout.edges[0];
    assert_eq!(edge.metadata, Some(SpouseMeta { marriage_year: Some(1971), divorced: true }));
}

// =============================================================================
// ROOT HANDLING
// =============================================================================

#[test]
fn explicit_root_anchors_generation_zero() {
    let persons = people(&["a", "b", "c"]);
    let rels = vec![Relationship::parent("a", "b"), Relationship::parent("b", "c")];
    let graph = build_graph(&persons, &rels).expect("graph");
    let layout = layout(&graph, &LayoutOptions::default().with_root("b")).expect("layout");

    assert_eq!(layout.root.as_deref(), Some("b"));
    assert!(close(pos(&layout, "b").y, 0.0));
    assert!(close(pos(&layout, "c").y, DEFAULT_GENERATION_HEIGHT));
    assert_eq!(layout.overflow, vec!["a"]);
}

#[test]
fn unknown_explicit_root_is_an_error() {
    let persons = people(&["a"]);
    let graph = build_graph(&persons, &[]).expect("graph");
    let err = layout(&graph, &LayoutOptions::default().with_root("zzz")).expect_err("unknown root");
    assert_eq!(err, KinshipError::UnknownRootPerson("zzz".to_owned()));
}

#[test]
fn forward_referenced_root_is_an_error() {
    let persons = people(&["a"]);
    let rels = vec![Relationship::parent("ghost", "a")];
    let graph = build_graph(&persons, &rels).expect("graph");
    assert!(matches!(
        layout(&graph, &LayoutOptions::default().with_root("ghost")),
        Err(KinshipError::UnknownRootPerson(_))
    ));
}

#[test]
fn empty_tree_lays_out_nothing() {
    let persons: Vec<Person> = Vec::new();
    let graph = build_graph(&persons, &[]).expect("graph");
    let layout = layout(&graph, &LayoutOptions::default()).expect("layout");
    assert_eq!(layout, Layout::default());
}

#[test]
fn root_policy_is_honoured() {
    let persons = people(&["lonely", "big", "k1", "k2"]);
    let rels = vec![Relationship::parent("big", "k1"), Relationship::parent("big", "k2")];
    let graph = build_graph(&persons, &rels).expect("graph");

    let first = layout(&graph, &LayoutOptions::default()).expect("layout");
    assert_eq!(first.root.as_deref(), Some("lonely"));

    let options = LayoutOptions { root_policy: RootPolicy::LargestFamily, ..LayoutOptions::default() };
    let largest = layout(&graph, &options).expect("layout");
    assert_eq!(largest.root.as_deref(), Some("big"));
    assert_eq!(largest.overflow, vec!["lonely"]);
}

// =============================================================================
// MALFORMED INPUT
// =============================================================================

#[test]
fn cyclic_parents_still_place_everyone_once() {
    let persons = people(&["a", "b"]);
    let rels = vec![Relationship::parent("a", "b"), Relationship::parent("b", "a")];
    let graph = build_graph(&persons, &rels).expect("graph");
    let options = LayoutOptions::default();
    let layout = layout(&graph, &options).expect("layout");

    assert_eq!(layout.root.as_deref(), Some("a"));
    assert_eq!(edge_pairs(&layout, EdgeKind::ParentChild), vec![("a", "b")]);
    assert_invariants(&graph, &layout, &options);
}

#[test]
fn child_shared_between_two_branches_is_placed_once() {
    let persons = people(&["root", "left", "right", "shared"]);
    let rels = vec![
        Relationship::parent("root", "left"),
        Relationship::parent("root", "right"),
        Relationship::parent("left", "shared"),
        Relationship::parent("right", "shared"),
    ];
    let graph = build_graph(&persons, &rels).expect("graph");
    let options = LayoutOptions::default();
    let layout = layout(&graph, &options).expect("layout");

    let parents_of_shared: Vec<&str> = layout
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::ParentChild && e.to == "shared")
        .map(|e| e.from.as_str())
        .collect();
    assert_eq!(parents_of_shared, vec!["left", "right"]);
    assert_invariants(&graph, &layout, &options);
}

#[test]
fn very_deep_line_of_descent_is_laid_out() {
    const DEPTH: usize = 50_000;
    let ids: Vec<String> = (0..DEPTH).map(|i| format!("p{i}")).collect();
    let persons: Vec<Person> = ids.iter().map(|id| Person::new(id.as_str(), id.as_str(), Gender::Female)).collect();
    let rels: Vec<Relationship> = ids.windows(2).map(|w| Relationship::parent(w[0].as_str(), w[1].as_str())).collect();
    let graph = build_graph(&persons, &rels).expect("graph");
    let layout = layout(&graph, &LayoutOptions::default()).expect("layout");

    assert_eq!(layout.root.as_deref(), Some("p0"));
    assert_eq!(layout.generations, DEPTH);
    assert!(layout.overflow.is_empty());
    assert_eq!(layout.edges.len(), DEPTH - 1);
    assert!(close(pos(&layout, "p49999").y, 49_999.0 * DEFAULT_GENERATION_HEIGHT));
    assert!(close(pos(&layout, "p49999").x, pos(&layout, "p0").x));
}

#[test]
fn earlier_spouse_of_a_partner_stays_with_the_family() {
    let mut persons = people(&["a", "b", "c", "d"]);
    persons[0].birth_date = Some("1900".to_owned());
    let rels = vec![
        Relationship::spouse("a", "b"),
        Relationship::spouse("b", "c").divorced("1950"),
        Relationship::parent("b", "d"),
        Relationship::parent("c", "d"),
    ];
    let graph = build_graph(&persons, &rels).expect("graph");
    let options = LayoutOptions::default();
    let layout = layout(&graph, &options).expect("layout");

    assert_eq!(layout.root.as_deref(), Some("a"));
    assert!(layout.overflow.is_empty());
    assert_eq!(layout.generations, 2);
    assert_eq!(edge_pairs(&layout, EdgeKind::Spouse), vec![("a", "b"), ("b", "c")]);
    assert_eq!(edge_pairs(&layout, EdgeKind::ParentChild), vec![("b", "d"), ("c", "d")]);
    assert!(close(pos(&layout, "c").y, pos(&layout, "a").y));
    assert_invariants(&graph, &layout, &options);
}

#[test]
fn unusable_metrics_fall_back_to_defaults() {
    let persons = people(&["a", "b"]);
    let rels = vec![Relationship::parent("a", "b")];
    let graph = build_graph(&persons, &rels).expect("graph");
    let options = LayoutOptions { generation_height: -3.0, node_width: f64::NAN, ..LayoutOptions::default() };
    let layout = layout(&graph, &options).expect("layout");
    assert!(close(pos(&layout, "b").y, DEFAULT_GENERATION_HEIGHT));
}

// =============================================================================
// INVARIANTS
// =============================================================================

#[test]
fn extended_family_respects_all_invariants() {
    let (persons, rels) = extended_family();
    let graph = build_graph(&persons, &rels).expect("graph");
    let options = LayoutOptions::default();
    let layout = layout(&graph, &options).expect("layout");

    assert_eq!(layout.root.as_deref(), Some("grandpa"));
    assert_eq!(layout.overflow, vec!["neighbour", "neighbour_kid"]);
    assert_eq!(layout.generations, 3);
    assert_invariants(&graph, &layout, &options);

    // Both spouses of dad sit on dad's generation; step-kid hangs below.
    let dad = pos(&layout, "dad");
    assert!(close(pos(&layout, "mum").y, dad.y));
    assert!(close(pos(&layout, "dad_second_wife").y, dad.y));
    assert!(close(pos(&layout, "stepkid").y, dad.y + DEFAULT_GENERATION_HEIGHT));
    assert!(
        edge_pairs(&layout, EdgeKind::ParentChild).contains(&("dad_second_wife", "stepkid")),
        "step-kid linked to its own parent"
    );
    assert!(!edge_pairs(&layout, EdgeKind::ParentChild).contains(&("dad", "stepkid")));
}

#[test]
fn side_by_side_lays_out_each_family_with_edges() {
    let (persons, rels) = extended_family();
    let graph = build_graph(&persons, &rels).expect("graph");
    let options = LayoutOptions { disconnected: Disconnected::SideBySide, ..LayoutOptions::default() };
    let layout = layout(&graph, &options).expect("layout");

    assert!(layout.overflow.is_empty());
    assert_invariants(&graph, &layout, &options);

    let neighbour = pos(&layout, "neighbour");
    assert!(close(neighbour.y, 0.0));
    let rightmost_main = ["grandpa", "grandma", "dad", "mum", "aunt", "uncle_in_law", "cousin1", "cousin2"]
        .iter()
        .map(|id| pos(&layout, id).x)
        .fold(f64::MIN, f64::max);
    assert!(neighbour.x > rightmost_main);
    assert!(edge_pairs(&layout, EdgeKind::ParentChild).contains(&("neighbour", "neighbour_kid")));
}

#[test]
fn layout_is_deterministic() {
    let (persons, rels) = extended_family();
    let graph = build_graph(&persons, &rels).expect("graph");
    let options = LayoutOptions::default();
    let first = layout(&graph, &options).expect("layout");
    let second = layout(&graph, &options).expect("layout");
    assert_eq!(first, second);

    let rebuilt = build_graph(&persons, &rels).expect("graph");
    let third = layout(&rebuilt, &options).expect("layout");
    assert_eq!(
        serde_json::to_string(&first).expect("json"),
        serde_json::to_string(&third).expect("json")
    );
}

#[test]
fn layout_serializes_for_renderers() {
    let persons = people(&["a", "b", "c"]);
    let rels = vec![Relationship::spouse("a", "b").married("2000"), Relationship::parent("a", "c")];
    let graph = build_graph(&persons, &rels).expect("graph");
    let layout = layout(&graph, &LayoutOptions::default()).expect("layout");
    let json = serde_json::to_value(&layout).expect("json");

    assert_eq!(json["root"], "a");
    assert_eq!(json["edges"][0]["kind"], "spouse");
    assert_eq!(json["edges"][0]["metadata"]["marriageYear"], 2000);
    assert_eq!(json["edges"][1]["kind"], "parentChild");
    assert!(json["edges"][1].get("metadata").is_none());
    assert!(json["positions"]["c"]["y"].is_number());
}
