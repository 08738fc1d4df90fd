//! Two-hop ego networks around a borrower or lender.
//!
//! The inner tier is the focal entity, its deals, and the counterparts on
//! those deals. The outer tier is the counterparts' other deals and the
//! second-order parties on them. Outer nodes are rendered muted so the focal
//! neighborhood stays readable on large books.
//!
//! Tier assignment is a one-way promotion: a node seen in the inner tier
//! stays inner no matter how often the outer traversal reaches it.

use std::collections::{BTreeSet, HashMap};

use lending_core::error::Result;
use lending_core::{EgoRole, EntityLabel, GraphNode, GraphRow, GraphSource, LendingError};

use crate::assemble::{GraphAssembler, VisGraph};
use crate::identity::NodeId;
use crate::project::{NodeFont, VisColor, VisNode};

/// Outer nodes keep this fraction of their preset size.
pub const OUTER_SIZE_FACTOR: f64 = 0.6;
pub const OUTER_OPACITY: f64 = 0.35;
pub const OUTER_FONT_COLOR: &str = "#bbbbbb";

/// Emphasis tier of a node in an ego network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Inner,
    Outer,
}

/// An assembled ego network together with its tier assignment.
#[derive(Debug, Clone)]
pub struct EgoNetwork {
    pub focal: NodeId,
    pub graph: VisGraph,
    tiers: HashMap<NodeId, Tier>,
}

impl EgoNetwork {
    pub fn tier_of(&self, id: &NodeId) -> Option<Tier> {
        self.tiers.get(id).copied()
    }

    pub fn into_graph(self) -> VisGraph {
        self.graph
    }
}

#[derive(Debug, Default)]
struct TierMap(HashMap<NodeId, Tier>);

impl TierMap {
    fn mark_inner(&mut self, id: NodeId) {
        self.0.insert(id, Tier::Inner);
    }

    fn mark_outer(&mut self, id: NodeId) {
        self.0.entry(id).or_insert(Tier::Outer);
    }
}

/// Build the ego network for `label`/`name`.
///
/// Fails with `InvalidArgument` unless `label` is Borrower or Lender, and with
/// `NotFound` when no such entity exists. Any source failure aborts the whole
/// expansion.
pub async fn expand_ego<S>(source: &S, label: &EntityLabel, name: &str) -> Result<EgoNetwork>
where
    S: GraphSource + ?Sized,
{
    let role = EgoRole::try_from(label)?;
    let focal = source
        .find_node(label, name)
        .await?
        .ok_or_else(|| LendingError::not_found(label.as_str(), name))?;

    let mut assembler = GraphAssembler::new();
    let mut tiers = TierMap::default();

    let focal_id = assembler.push_node(&focal);
    tiers.mark_inner(focal_id.clone());

    // ── Inner hop ────────────────────────────────────────────────
    let counterpart_label = role.counterpart_label();
    let mut focal_deals = BTreeSet::new();
    let mut counterparts = BTreeSet::new();

    let inner_rows = source.inner_hop(role, name).await?;
    for row in &inner_rows {
        let (subject, object) = assembler.push_row(row);
        tiers.mark_inner(subject.clone());
        if let Some(object) = object {
            tiers.mark_inner(object);
        }

        if subject == focal_id {
            if let Some((_, deal)) = row.segment() {
                if deal.label == EntityLabel::Deal {
                    focal_deals.insert(deal.name.clone());
                }
            }
        } else if row.subject.label == counterpart_label {
            counterparts.insert(row.subject.name.clone());
        }
    }

    // ── Outer hop ────────────────────────────────────────────────
    let mut outer_rows_used = 0usize;
    if !counterparts.is_empty() {
        let counterparts: Vec<String> = counterparts.into_iter().collect();
        let exclude: Vec<String> = focal_deals.iter().cloned().collect();

        let outer_rows = source.outer_hop(role, &counterparts, &exclude).await?;
        for row in &outer_rows {
            if touches_deal(row, &focal_deals) {
                continue;
            }
            let (subject, object) = assembler.push_row(row);
            tiers.mark_outer(subject);
            if let Some(object) = object {
                tiers.mark_outer(object);
            }
            outer_rows_used += 1;
        }
    }

    let mut graph = assembler.finish();
    for node in &mut graph.nodes {
        if tiers.0.get(&node.id) == Some(&Tier::Outer) {
            fade(node);
        }
    }

    tracing::debug!(
        focal = %focal_id,
        inner_rows = inner_rows.len(),
        outer_rows = outer_rows_used,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Expanded ego network"
    );

    Ok(EgoNetwork {
        focal: focal_id,
        graph,
        tiers: tiers.0,
    })
}

/// Whether either end of the row is one of `deals`.
fn touches_deal(row: &GraphRow, deals: &BTreeSet<String>) -> bool {
    let is_listed = |node: &GraphNode| {
        node.label == EntityLabel::Deal && deals.contains(&node.name)
    };
    is_listed(&row.subject) || row.segment().map_or(false, |(_, object)| is_listed(object))
}

/// Mute a node for the outer tier.
fn fade(node: &mut VisNode) {
    node.size = (node.size as f64 * OUTER_SIZE_FACTOR).round() as u32;
    let base = match &node.color {
        VisColor::Solid(c) => c.clone(),
        VisColor::Muted { background, .. } => background.clone(),
    };
    node.color = VisColor::Muted {
        background: base.clone(),
        border: base,
    };
    node.opacity = Some(OUTER_OPACITY);
    node.font = Some(NodeFont {
        color: OUTER_FONT_COLOR.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lending_core::source::{BorrowerSummary, GraphStats, LenderSummary};
    use lending_core::GraphRelationship;
    use lending_graph::MemoryGraph;

    fn id(label: EntityLabel, name: &str) -> NodeId {
        NodeId::new(&label, name)
    }

    #[tokio::test]
    async fn medtech_ego_network() {
        let graph = MemoryGraph::demo().unwrap();
        let ego = expand_ego(&graph, &EntityLabel::Borrower, "MedTech Solutions")
            .await
            .unwrap();

        let inner = [
            id(EntityLabel::Borrower, "MedTech Solutions"),
            id(EntityLabel::Deal, "MedTech Term Loan A"),
            id(EntityLabel::Deal, "MedTech Revolver"),
            id(EntityLabel::Lender, "Ares Capital"),
            id(EntityLabel::Lender, "HPS Investment"),
        ];
        for node_id in &inner {
            assert_eq!(ego.tier_of(node_id), Some(Tier::Inner), "{node_id}");
            let node = ego.graph.node(node_id).unwrap();
            assert!(node.opacity.is_none());
        }
        let inner_count = ego
            .graph
            .nodes
            .iter()
            .filter(|n| ego.tier_of(&n.id) == Some(Tier::Inner))
            .count();
        assert_eq!(inner_count, inner.len());

        let ares = id(EntityLabel::Lender, "Ares Capital");
        assert_eq!(ego.graph.nodes.iter().filter(|n| n.id == ares).count(), 1);

        for node_id in [
            id(EntityLabel::Deal, "PrecisionMfg TL-B"),
            id(EntityLabel::Deal, "Apex Logistics Refi"),
            id(EntityLabel::Deal, "Apex Revolver"),
            id(EntityLabel::Deal, "DataFlow Growth Facility"),
            id(EntityLabel::Borrower, "PrecisionMfg Corp"),
            id(EntityLabel::Borrower, "Apex Logistics"),
            id(EntityLabel::Borrower, "DataFlow Analytics"),
        ] {
            assert_eq!(ego.tier_of(&node_id), Some(Tier::Outer), "{node_id}");
            let node = ego.graph.node(&node_id).unwrap();
            assert_eq!(node.opacity, Some(OUTER_OPACITY));
            assert!(matches!(node.color, VisColor::Muted { .. }));
        }

        // Sectors and unrelated syndicates stay out.
        assert!(ego.graph.node(&id(EntityLabel::Sector, "Healthcare")).is_none());
        assert!(ego.graph.node(&id(EntityLabel::Borrower, "CloudSecure Inc")).is_none());
    }

    #[tokio::test]
    async fn outer_nodes_are_shrunk_and_muted() {
        let graph = MemoryGraph::demo().unwrap();
        let ego = expand_ego(&graph, &EntityLabel::Borrower, "MedTech Solutions")
            .await
            .unwrap();

        let deal = ego.graph.node(&id(EntityLabel::Deal, "PrecisionMfg TL-B")).unwrap();
        assert_eq!(deal.size, 12);
        assert_eq!(
            deal.color,
            VisColor::Muted {
                background: "#F0AD4E".to_string(),
                border: "#F0AD4E".to_string(),
            }
        );
        assert_eq!(deal.font.as_ref().unwrap().color, OUTER_FONT_COLOR);

        let borrower = ego.graph.node(&id(EntityLabel::Borrower, "Apex Logistics")).unwrap();
        assert_eq!(borrower.size, 15);

        let focal = ego.graph.node(&ego.focal).unwrap();
        assert_eq!(focal.size, 25);
        assert!(focal.font.is_none());
    }

    #[tokio::test]
    async fn edges_are_not_duplicated_across_tiers() {
        let graph = MemoryGraph::demo().unwrap();
        let ego = expand_ego(&graph, &EntityLabel::Borrower, "MedTech Solutions")
            .await
            .unwrap();

        let mut keys: Vec<(String, String, String)> = ego
            .graph
            .edges
            .iter()
            .map(|e| (e.from.to_string(), e.label.clone(), e.to.to_string()))
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);

        for edge in &ego.graph.edges {
            assert!(ego.graph.node(&edge.from).is_some());
            assert!(ego.graph.node(&edge.to).is_some());
        }
    }

    #[tokio::test]
    async fn lender_focus_swaps_roles() {
        let graph = MemoryGraph::demo().unwrap();
        let ego = expand_ego(&graph, &EntityLabel::Lender, "HPS Investment")
            .await
            .unwrap();

        for node_id in [
            id(EntityLabel::Lender, "HPS Investment"),
            id(EntityLabel::Deal, "MedTech Term Loan A"),
            id(EntityLabel::Deal, "PrecisionMfg TL-B"),
            id(EntityLabel::Deal, "DataFlow Growth Facility"),
            id(EntityLabel::Borrower, "MedTech Solutions"),
            id(EntityLabel::Borrower, "PrecisionMfg Corp"),
            id(EntityLabel::Borrower, "DataFlow Analytics"),
        ] {
            assert_eq!(ego.tier_of(&node_id), Some(Tier::Inner), "{node_id}");
        }

        // MedTech's revolver and its sole lender are outer.
        assert_eq!(
            ego.tier_of(&id(EntityLabel::Deal, "MedTech Revolver")),
            Some(Tier::Outer)
        );
        assert_eq!(
            ego.tier_of(&id(EntityLabel::Lender, "Ares Capital")),
            Some(Tier::Outer)
        );
        // Co-lenders on HPS's own deals are not part of a lender's inner tier.
        assert!(ego.graph.node(&id(EntityLabel::Lender, "Golub Capital")).is_none());
    }

    #[tokio::test]
    async fn focal_without_deals_is_a_lone_inner_node() {
        let mut graph = MemoryGraph::new();
        graph.insert_node(GraphNode::new(EntityLabel::Borrower, "Quiet Co"));
        let ego = expand_ego(&graph, &EntityLabel::Borrower, "Quiet Co")
            .await
            .unwrap();
        assert_eq!(ego.graph.nodes.len(), 1);
        assert!(ego.graph.edges.is_empty());
        assert_eq!(ego.tier_of(&ego.focal), Some(Tier::Inner));
    }

    #[tokio::test]
    async fn invalid_label_and_missing_entity() {
        let graph = MemoryGraph::demo().unwrap();

        let err = expand_ego(&graph, &EntityLabel::Sector, "Healthcare")
            .await
            .unwrap_err();
        assert!(matches!(err, LendingError::InvalidArgument(_)));

        let err = expand_ego(&graph, &EntityLabel::Borrower, "NoSuchCompany")
            .await
            .unwrap_err();
        assert!(matches!(err, LendingError::NotFound { .. }));
    }

    /// A source whose outer hop ignores the exclusion list and re-reports
    /// inner-tier nodes and relationships.
    struct LeakySource {
        inner: MemoryGraph,
        outer: Vec<GraphRow>,
    }

    #[async_trait]
    impl GraphSource for LeakySource {
        async fn all_rows(&self) -> Result<Vec<GraphRow>> {
            self.inner.all_rows().await
        }
        async fn find_node(&self, label: &EntityLabel, name: &str) -> Result<Option<GraphNode>> {
            self.inner.find_node(label, name).await
        }
        async fn neighbors(&self, label: &EntityLabel, name: &str) -> Result<Vec<GraphRow>> {
            self.inner.neighbors(label, name).await
        }
        async fn inner_hop(&self, role: EgoRole, name: &str) -> Result<Vec<GraphRow>> {
            self.inner.inner_hop(role, name).await
        }
        async fn outer_hop(&self, _: EgoRole, _: &[String], _: &[String]) -> Result<Vec<GraphRow>> {
            Ok(self.outer.clone())
        }
        async fn borrower_summaries(&self) -> Result<Vec<BorrowerSummary>> {
            self.inner.borrower_summaries().await
        }
        async fn lender_summaries(&self) -> Result<Vec<LenderSummary>> {
            self.inner.lender_summaries().await
        }
        async fn stats(&self) -> Result<GraphStats> {
            self.inner.stats().await
        }
    }

    fn lent_to(commitment: i64) -> GraphRelationship {
        GraphRelationship::new("LENT_TO").with_property("commitment_mm", commitment)
    }

    #[tokio::test]
    async fn inner_classification_survives_outer_rediscovery() {
        let ares = GraphNode::new(EntityLabel::Lender, "Ares Capital");
        let other_deal = GraphNode::new(EntityLabel::Deal, "Apex Revolver");
        let source = LeakySource {
            inner: MemoryGraph::demo().unwrap(),
            outer: vec![
                // Inner counterpart reached again through an outer deal.
                GraphRow::link(ares.clone(), lent_to(25), other_deal.clone()),
                GraphRow::link(ares.clone(), lent_to(25), other_deal),
                // A focal deal leaking through: must be dropped.
                GraphRow::link(
                    ares,
                    lent_to(40),
                    GraphNode::new(EntityLabel::Deal, "MedTech Term Loan A"),
                ),
            ],
        };

        let ego = expand_ego(&source, &EntityLabel::Borrower, "MedTech Solutions")
            .await
            .unwrap();

        let ares_id = id(EntityLabel::Lender, "Ares Capital");
        assert_eq!(ego.tier_of(&ares_id), Some(Tier::Inner));
        assert!(ego.graph.node(&ares_id).unwrap().opacity.is_none());
        assert_eq!(
            ego.tier_of(&id(EntityLabel::Deal, "MedTech Term Loan A")),
            Some(Tier::Inner)
        );
        assert_eq!(
            ego.tier_of(&id(EntityLabel::Deal, "Apex Revolver")),
            Some(Tier::Outer)
        );

        let ares_edges = ego
            .graph
            .edges
            .iter()
            .filter(|e| e.from == ares_id)
            .count();
        // TL-A and Revolver from the inner hop, Apex Revolver once from the outer hop.
        assert_eq!(ares_edges, 3);
    }
}
