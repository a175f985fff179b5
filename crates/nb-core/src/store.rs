//! In-memory graph store.
//!
//! Owns the node and edge collections in insertion order. Every operation
//! that names a missing id is a silent no-op: stale references from
//! overlapping user actions must never take the session down.
//!
//! Edge endpoints are not validated. A dangling edge stays in the store and
//! is skipped by the view filter and renderer instead.

use crate::id::{EdgeId, NodeId};
use crate::model::{Edge, EdgeKind, Node, Point};
use smallvec::SmallVec;

/// A node removed by [`GraphStore::delete_node`] together with the edges
/// that were cascaded away with it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedNode {
    pub node: Node,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    /// Append a node with a freshly minted id.
    pub fn create_node(&mut self, text: impl Into<String>, position: Point) -> NodeId {
        let id = NodeId::fresh();
        self.insert_node(Node::new(id, text, position));
        id
    }

    /// Append a node with a caller-chosen id. Replaces the node in place if
    /// the id is already taken, so ids stay unique.
    pub fn insert_node(&mut self, node: Node) {
        log::debug!("create node {} at ({}, {})", node.id, node.position.x, node.position.y);
        match self.node_mut(node.id) {
            Some(existing) => *existing = node,
            None => self.nodes.push(node),
        }
    }

    pub fn update_node_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = text.into();
            log::debug!("update text of {id}");
        }
    }

    pub fn move_node(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.node_mut(id) {
            node.position = position;
            log::trace!("move {id} to ({}, {})", position.x, position.y);
        }
    }

    /// Remove a node and every edge touching it. Edges between other nodes
    /// are left alone.
    pub fn delete_node(&mut self, id: NodeId) -> Option<DeletedNode> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(idx);

        let mut removed = Vec::new();
        self.edges.retain(|edge| {
            if edge.touches(id) {
                removed.push(edge.clone());
                false
            } else {
                true
            }
        });

        log::debug!("delete node {id} (cascaded {} edges)", removed.len());
        Some(DeletedNode {
            node,
            edges: removed,
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The first node in store order whose id differs from `id`.
    pub fn first_other_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id != id)
    }

    // ─── Edges ───────────────────────────────────────────────────────────

    /// Append an edge. Endpoints are taken as given: self-loops, parallel
    /// edges, and dangling references are all accepted.
    pub fn create_edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) -> EdgeId {
        let id = EdgeId::fresh();
        log::debug!("create {kind} edge {id}: {from} -> {to}");
        self.edges.push(Edge { id, from, to, kind });
        id
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let idx = self.edges.iter().position(|e| e.id == id)?;
        log::debug!("delete edge {id}");
        Some(self.edges.remove(idx))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges with `node` at either end.
    pub fn edges_of(&self, node: NodeId) -> SmallVec<[&Edge; 4]> {
        self.edges.iter().filter(|e| e.touches(node)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(texts: &[&str]) -> (GraphStore, Vec<NodeId>) {
        let mut store = GraphStore::new();
        let ids = texts
            .iter()
            .enumerate()
            .map(|(i, t)| store.create_node(*t, Point::new(i as f32 * 10.0, 0.0)))
            .collect();
        (store, ids)
    }

    #[test]
    fn create_node_keeps_insertion_order() {
        let (store, ids) = store_with(&["a", "b", "c"]);
        let order: Vec<NodeId> = store.nodes().iter().map(|n| n.id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn created_ids_are_unique() {
        let (store, _) = store_with(&["x"; 32]);
        let mut ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn update_text_leaves_position() {
        let (mut store, ids) = store_with(&["before"]);
        let pos = store.node(ids[0]).unwrap().position;
        store.update_node_text(ids[0], "after");
        let node = store.node(ids[0]).unwrap();
        assert_eq!(node.text, "after");
        assert_eq!(node.position, pos);
    }

    #[test]
    fn operations_on_missing_ids_are_noops() {
        let (mut store, _) = store_with(&["a"]);
        let ghost = NodeId::intern("ghost_node");
        store.update_node_text(ghost, "boo");
        store.move_node(ghost, Point::new(1.0, 1.0));
        assert!(store.delete_node(ghost).is_none());
        assert!(store.delete_edge(EdgeId::intern("ghost_edge")).is_none());
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn delete_node_cascades_only_incident_edges() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        let ab = store.create_edge(a, b, EdgeKind::Primary);
        let ca = store.create_edge(c, a, EdgeKind::Alias);
        let aa = store.create_edge(a, a, EdgeKind::Primary);
        let bc = store.create_edge(b, c, EdgeKind::Primary);

        let deleted = store.delete_node(a).unwrap();
        let mut cascaded: Vec<EdgeId> = deleted.edges.iter().map(|e| e.id).collect();
        cascaded.sort_by(|x, y| x.as_str().cmp(y.as_str()));
        let mut expected = vec![ab, ca, aa];
        expected.sort_by(|x, y| x.as_str().cmp(y.as_str()));
        assert_eq!(cascaded, expected);

        let remaining: Vec<EdgeId> = store.edges().iter().map(|e| e.id).collect();
        assert_eq!(remaining, vec![bc]);
        assert!(!store.contains_node(a));
    }

    #[test]
    fn dangling_and_parallel_edges_are_accepted() {
        let (mut store, ids) = store_with(&["a"]);
        let ghost = NodeId::intern("dangling_target");
        let e1 = store.create_edge(ids[0], ghost, EdgeKind::Primary);
        let e2 = store.create_edge(ids[0], ghost, EdgeKind::Primary);
        assert_ne!(e1, e2);
        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.edge(e1).unwrap().to, ghost);
    }

    #[test]
    fn first_other_node_follows_store_order() {
        let (store, ids) = store_with(&["a", "b", "c"]);
        assert_eq!(store.first_other_node(ids[0]).unwrap().id, ids[1]);
        assert_eq!(store.first_other_node(ids[2]).unwrap().id, ids[0]);

        let (single, only) = store_with(&["solo"]);
        assert!(single.first_other_node(only[0]).is_none());
    }

    #[test]
    fn edges_of_ignores_direction() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        store.create_edge(ids[0], ids[1], EdgeKind::Primary);
        store.create_edge(ids[2], ids[1], EdgeKind::Alias);
        store.create_edge(ids[0], ids[2], EdgeKind::Alias);
        assert_eq!(store.edges_of(ids[1]).len(), 2);
        assert_eq!(store.edges_of(ids[0]).len(), 2);
    }

    #[test]
    fn insert_node_replaces_duplicate_id() {
        let mut store = GraphStore::new();
        let id = NodeId::intern("fixed_id");
        store.insert_node(Node::new(id, "one", Point::ZERO));
        store.insert_node(Node::new(id, "two", Point::ZERO));
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.node(id).unwrap().text, "two");
    }

    #[test]
    fn delete_edge_by_id() {
        let (mut store, ids) = store_with(&["a", "b"]);
        let e = store.create_edge(ids[0], ids[1], EdgeKind::Alias);
        let removed = store.delete_edge(e).unwrap();
        assert_eq!(removed.kind, EdgeKind::Alias);
        assert_eq!(store.edge_count(), 0);
    }
}
