//! Text search over the graph.
//!
//! A node is visible when its text contains the query, ignoring case. An
//! edge is visible only when both endpoints are visible nodes, so an edge
//! to a missing node is never shown, query or not.

use crate::id::NodeId;
use crate::model::{Edge, Node};
use crate::store::GraphStore;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    query: String,
    /// Lowercased query, cached for matching.
    folded: String,
}

/// The subset of the store that survives a filter, in store order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<&'a Edge>,
}

impl FilteredView<'_> {
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().copied().find(|n| n.id == id)
    }
}

impl ViewFilter {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let folded = query.to_lowercase();
        Self { query, folded }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.folded.is_empty() || node.text.to_lowercase().contains(&self.folded)
    }

    pub fn apply<'a>(&self, store: &'a GraphStore) -> FilteredView<'a> {
        let nodes: Vec<&Node> = store.nodes().iter().filter(|n| self.matches(n)).collect();

        let visible: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();
        let edges = store
            .edges()
            .iter()
            .filter(|e| visible.contains(&e.from) && visible.contains(&e.to))
            .collect();

        FilteredView { nodes, edges }
    }
}
