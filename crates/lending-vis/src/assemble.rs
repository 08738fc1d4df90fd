//! Deduplicating assembly of query rows into a node/edge set.
//!
//! Nodes are keyed by `NodeId` and keep first-seen order. Edges are keyed by
//! `(from, rel_type, to)`, so revisiting a relationship through another row
//! or another traversal never duplicates it.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use lending_core::{GraphNode, GraphRow};

use crate::identity::NodeId;
use crate::project::{project_edge, project_node, VisEdge, VisNode};

/// Response body for graph views.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisGraph {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
}

#[cfg(test)]
impl VisGraph {
    pub fn node(&self, id: &NodeId) -> Option<&VisNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}

type EdgeKey = (NodeId, String, NodeId);

/// Incremental builder behind every graph view.
#[derive(Debug, Default)]
pub struct GraphAssembler {
    nodes: Vec<VisNode>,
    node_index: HashMap<NodeId, usize>,
    edges: Vec<VisEdge>,
    edge_keys: HashSet<EdgeKey>,
}

impl GraphAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node if its id is new. Returns the id either way.
    pub fn push_node(&mut self, node: &GraphNode) -> NodeId {
        let id = NodeId::new(&node.label, &node.name);
        if !self.node_index.contains_key(&id) {
            self.node_index.insert(id.clone(), self.nodes.len());
            self.nodes.push(project_node(node));
        }
        id
    }

    /// Fold one row into the graph.
    ///
    /// Returns the subject id and, when the row carries both a relationship
    /// and an object, the object id. Rows missing either contribute only the
    /// subject.
    pub fn push_row(&mut self, row: &GraphRow) -> (NodeId, Option<NodeId>) {
        let from = self.push_node(&row.subject);

        let Some((rel, object)) = row.segment() else {
            return (from, None);
        };
        let to = self.push_node(object);

        let key = (from.clone(), rel.rel_type.clone(), to.clone());
        if !self.edge_keys.contains(&key) {
            self.edges.push(project_edge(rel, from.clone(), to.clone()));
            self.edge_keys.insert(key);
        }
        (from, Some(to))
    }

    pub fn finish(self) -> VisGraph {
        tracing::debug!(nodes = self.nodes.len(), edges = self.edges.len(), "Assembled graph");
        VisGraph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// Assemble a full row set in one pass.
pub fn assemble<'a>(rows: impl IntoIterator<Item = &'a GraphRow>) -> VisGraph {
    let mut assembler = GraphAssembler::new();
    for row in rows {
        assembler.push_row(row);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lending_core::{EntityLabel, GraphRelationship};

    fn borrower(name: &str) -> GraphNode {
        GraphNode::new(EntityLabel::Borrower, name)
    }

    fn deal(name: &str) -> GraphNode {
        GraphNode::new(EntityLabel::Deal, name)
    }

    fn borrowed() -> GraphRelationship {
        GraphRelationship::new("BORROWED")
    }

    #[test]
    fn repeated_subject_yields_one_node() {
        for n in [1, 2, 7] {
            let rows: Vec<GraphRow> = (0..n).map(|_| GraphRow::node(borrower("A"))).collect();
            let graph = assemble(&rows);
            assert_eq!(graph.nodes.len(), 1, "n = {n}");
            assert!(graph.edges.is_empty());
        }
    }

    #[test]
    fn nodes_keep_first_seen_order() {
        let rows = vec![
            GraphRow::link(borrower("Zeta"), borrowed(), deal("Zeta TL")),
            GraphRow::node(borrower("Alpha")),
            GraphRow::link(borrower("Zeta"), borrowed(), deal("Alpha TL")),
        ];
        let graph = assemble(&rows);
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["Borrower:Zeta", "Deal:Zeta TL", "Borrower:Alpha", "Deal:Alpha TL"]
        );
    }

    #[test]
    fn repeated_relationship_yields_one_edge() {
        let row = GraphRow::link(borrower("A"), borrowed(), deal("D"));
        let graph = assemble(&[row.clone(), row.clone(), row]);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn edge_identity_includes_type_and_direction() {
        let rows = vec![
            GraphRow::link(borrower("A"), borrowed(), deal("D")),
            GraphRow::link(borrower("A"), GraphRelationship::new("GUARANTEED"), deal("D")),
            GraphRow::link(deal("D"), borrowed(), borrower("A")),
        ];
        let graph = assemble(&rows);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 3);
    }

    #[test]
    fn incomplete_rows_contribute_only_the_subject() {
        let rel_only = GraphRow {
            subject: borrower("A"),
            relationship: Some(borrowed()),
            object: None,
        };
        let object_only = GraphRow {
            subject: borrower("B"),
            relationship: None,
            object: Some(deal("D")),
        };
        let graph = assemble(&[rel_only, object_only]);
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.node(&NodeId::new(&EntityLabel::Deal, "D")).is_none());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn push_row_reports_touched_ids() {
        let mut assembler = GraphAssembler::new();
        let (from, to) = assembler.push_row(&GraphRow::link(borrower("A"), borrowed(), deal("D")));
        assert_eq!(from, NodeId::new(&EntityLabel::Borrower, "A"));
        assert_eq!(to, Some(NodeId::new(&EntityLabel::Deal, "D")));

        let (_, to) = assembler.push_row(&GraphRow::node(borrower("B")));
        assert!(to.is_none());
        assert!(assembler.finish().node(&from).is_some());
    }

    #[test]
    fn edges_reference_existing_nodes() {
        let graph = assemble(&[
            GraphRow::link(borrower("A"), borrowed(), deal("D1")),
            GraphRow::link(borrower("B"), borrowed(), deal("D2")),
        ]);
        for edge in &graph.edges {
            assert!(graph.node(&edge.from).is_some());
            assert!(graph.node(&edge.to).is_some());
        }
    }
}
