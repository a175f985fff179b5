//! Integration tests: graph store → view filter (nb-core).
//!
//! Exercises the store's cascade and leniency rules together with the
//! filter's edge-pruning behavior.

use nb_core::filter::ViewFilter;
use nb_core::id::NodeId;
use nb_core::model::{EdgeKind, Point};
use nb_core::store::GraphStore;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn ring(n: usize) -> (GraphStore, Vec<NodeId>) {
    let mut store = GraphStore::new();
    let ids: Vec<NodeId> = (0..n)
        .map(|i| store.create_node(format!("node {i}"), Point::new(i as f32, 0.0)))
        .collect();
    for i in 0..n {
        let kind = if i % 2 == 0 {
            EdgeKind::Primary
        } else {
            EdgeKind::Alias
        };
        store.create_edge(ids[i], ids[(i + 1) % n], kind);
    }
    (store, ids)
}

#[test]
fn ids_stay_unique_across_deletes() {
    let mut store = GraphStore::new();
    let mut seen = HashSet::new();
    for round in 0..10 {
        let id = store.create_node("x", Point::ZERO);
        assert!(seen.insert(id), "id {id} reused in round {round}");
        if round % 3 == 0 {
            store.delete_node(id);
        }
    }
}

#[test]
fn cascade_removes_exactly_incident_edges() {
    let (mut store, ids) = ring(6);
    let victim = ids[2];
    let before: Vec<_> = store.edges().to_vec();

    store.delete_node(victim);

    let expected: Vec<_> = before.into_iter().filter(|e| !e.touches(victim)).collect();
    assert_eq!(store.edges(), expected.as_slice());
    assert_eq!(store.edge_count(), 4);
}

#[test]
fn alpha_beta_scenario() {
    let mut store = GraphStore::new();
    let a = store.create_node("alpha", Point::ZERO);
    let b = store.create_node("beta", Point::new(200.0, 0.0));
    store.create_edge(a, b, EdgeKind::Primary);

    let view = ViewFilter::new("alpha").apply(&store);
    let nodes: Vec<NodeId> = view.nodes.iter().map(|n| n.id).collect();
    assert_eq!(nodes, vec![a]);
    assert!(view.edges.is_empty());
}

#[test]
fn filter_visibility_matches_definition() {
    let (mut store, ids) = ring(8);
    store.update_node_text(ids[3], "Special");
    store.update_node_text(ids[4], "also SPECIAL");
    store.create_edge(ids[3], NodeId::intern("integration_ghost"), EdgeKind::Alias);

    for query in ["", "special", "node", "NODE 1", "zzz"] {
        let filter = ViewFilter::new(query);
        let view = filter.apply(&store);
        let visible: HashSet<NodeId> = view.nodes.iter().map(|n| n.id).collect();

        for node in store.nodes() {
            let expected = node.text.to_lowercase().contains(&query.to_lowercase());
            assert_eq!(visible.contains(&node.id), expected, "{query:?} / {}", node.text);
        }
        for edge in store.edges() {
            let expected = visible.contains(&edge.from) && visible.contains(&edge.to);
            let shown = view.edges.iter().any(|e| e.id == edge.id);
            assert_eq!(shown, expected, "{query:?} / edge {}", edge.id);
        }
    }
}

#[test]
fn dangling_edge_survives_until_its_endpoint_is_deleted() {
    let mut store = GraphStore::new();
    let a = store.create_node("a", Point::ZERO);
    let ghost = NodeId::intern("integration_missing");
    store.create_edge(a, ghost, EdgeKind::Primary);
    assert_eq!(store.edges_of(a).len(), 1);

    assert!(ViewFilter::default().apply(&store).edges.is_empty());

    store.delete_node(a);
    assert_eq!(store.edge_count(), 0);
}
