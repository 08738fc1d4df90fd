//! In-memory `GraphSource` for running without Neo4j.
//!
//! Holds a fixed node list and adjacency of directed links, and answers the
//! facade queries with the same row shapes and orientation the Cypher
//! implementation produces. Backs `serve --in-memory` and the test suites.

use std::collections::HashSet;

use async_trait::async_trait;

use lending_core::error::Result;
use lending_core::source::{BorrowerSummary, EgoRole, GraphStats, LenderSummary};
use lending_core::{EntityLabel, GraphNode, GraphRelationship, GraphRow, GraphSource, LendingError};

use crate::fixture;

#[derive(Debug, Clone)]
struct MemoryLink {
    start: usize,
    relationship: GraphRelationship,
    end: usize,
}

/// A small immutable graph held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    nodes: Vec<GraphNode>,
    links: Vec<MemoryLink>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo lending book from `fixture`.
    pub fn demo() -> Result<Self> {
        let mut graph = Self::new();
        for node in fixture::nodes() {
            graph.insert_node(node);
        }
        for link in fixture::links() {
            graph.insert_link(
                (&link.start.0, link.start.1),
                link.relationship,
                (&link.end.0, link.end.1),
            )?;
        }
        Ok(graph)
    }

    /// Add a node. A node with the same label and name replaces the old one.
    pub fn insert_node(&mut self, node: GraphNode) {
        match self.index_of(&node.label, &node.name) {
            Some(i) => self.nodes[i] = node,
            None => self.nodes.push(node),
        }
    }

    /// Add a directed relationship between two existing nodes.
    pub fn insert_link(
        &mut self,
        start: (&EntityLabel, &str),
        relationship: GraphRelationship,
        end: (&EntityLabel, &str),
    ) -> Result<()> {
        let start_idx = self
            .index_of(start.0, start.1)
            .ok_or_else(|| LendingError::not_found(start.0.as_str(), start.1))?;
        let end_idx = self
            .index_of(end.0, end.1)
            .ok_or_else(|| LendingError::not_found(end.0.as_str(), end.1))?;
        self.links.push(MemoryLink {
            start: start_idx,
            relationship,
            end: end_idx,
        });
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    fn index_of(&self, label: &EntityLabel, name: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| &n.label == label && n.name == name)
    }

    fn row(&self, link: &MemoryLink) -> GraphRow {
        GraphRow::link(
            self.nodes[link.start].clone(),
            link.relationship.clone(),
            self.nodes[link.end].clone(),
        )
    }

    fn outgoing(&self, idx: usize) -> impl Iterator<Item = &MemoryLink> {
        self.links.iter().filter(move |l| l.start == idx)
    }

    fn incoming(&self, idx: usize) -> impl Iterator<Item = &MemoryLink> {
        self.links.iter().filter(move |l| l.end == idx)
    }

    fn has_label(&self, idx: usize, label: &EntityLabel) -> bool {
        &self.nodes[idx].label == label
    }

    fn sum_property<'a>(props: impl Iterator<Item = &'a lending_core::Properties>, key: &str) -> f64 {
        props
            .filter_map(|p| p.get(key).and_then(|v| v.as_f64()))
            .fold(0.0, |total, v| total + v)
    }
}

#[async_trait]
impl GraphSource for MemoryGraph {
    async fn all_rows(&self) -> Result<Vec<GraphRow>> {
        let mut rows = Vec::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            let before = rows.len();
            rows.extend(self.outgoing(idx).map(|l| self.row(l)));
            if rows.len() == before {
                rows.push(GraphRow::node(node.clone()));
            }
        }
        Ok(rows)
    }

    async fn find_node(&self, label: &EntityLabel, name: &str) -> Result<Option<GraphNode>> {
        Ok(self.index_of(label, name).map(|i| self.nodes[i].clone()))
    }

    async fn neighbors(&self, label: &EntityLabel, name: &str) -> Result<Vec<GraphRow>> {
        let Some(idx) = self.index_of(label, name) else {
            return Ok(Vec::new());
        };
        let node = &self.nodes[idx];

        let mut rows = Vec::new();
        for link in self.links.iter() {
            let other = if link.start == idx {
                link.end
            } else if link.end == idx {
                link.start
            } else {
                continue;
            };
            rows.push(GraphRow::link(
                node.clone(),
                link.relationship.clone(),
                self.nodes[other].clone(),
            ));
        }
        if rows.is_empty() {
            rows.push(GraphRow::node(node.clone()));
        }
        Ok(rows)
    }

    async fn inner_hop(&self, role: EgoRole, name: &str) -> Result<Vec<GraphRow>> {
        let Some(focal) = self.index_of(&role.focal_label(), name) else {
            return Ok(Vec::new());
        };
        let counterpart = role.counterpart_label();

        let focal_links: Vec<&MemoryLink> = self
            .outgoing(focal)
            .filter(|l| self.has_label(l.end, &EntityLabel::Deal))
            .collect();

        let mut rows: Vec<GraphRow> = focal_links.iter().map(|l| self.row(l)).collect();
        for link in &focal_links {
            rows.extend(
                self.incoming(link.end)
                    .filter(|l| self.has_label(l.start, &counterpart))
                    .map(|l| self.row(l)),
            );
        }
        Ok(rows)
    }

    async fn outer_hop(
        &self,
        role: EgoRole,
        counterparts: &[String],
        exclude_deals: &[String],
    ) -> Result<Vec<GraphRow>> {
        let counterpart = role.counterpart_label();
        let focal = role.focal_label();
        let wanted: HashSet<&str> = counterparts.iter().map(String::as_str).collect();
        let excluded: HashSet<&str> = exclude_deals.iter().map(String::as_str).collect();

        let other_links: Vec<&MemoryLink> = self
            .links
            .iter()
            .filter(|l| {
                self.has_label(l.start, &counterpart)
                    && wanted.contains(self.nodes[l.start].name.as_str())
                    && self.has_label(l.end, &EntityLabel::Deal)
                    && !excluded.contains(self.nodes[l.end].name.as_str())
            })
            .collect();

        let mut rows: Vec<GraphRow> = other_links.iter().map(|l| self.row(l)).collect();
        for link in &other_links {
            rows.extend(
                self.incoming(link.end)
                    .filter(|l| self.has_label(l.start, &focal))
                    .map(|l| self.row(l)),
            );
        }
        Ok(rows)
    }

    async fn borrower_summaries(&self) -> Result<Vec<BorrowerSummary>> {
        let mut results: Vec<BorrowerSummary> = (0..self.nodes.len())
            .filter(|&i| self.has_label(i, &EntityLabel::Borrower))
            .map(|i| {
                let sector = self
                    .outgoing(i)
                    .find(|l| {
                        l.relationship.rel_type == "IN_SECTOR"
                            && self.has_label(l.end, &EntityLabel::Sector)
                    })
                    .map(|l| self.nodes[l.end].name.clone());
                let deals: Vec<usize> = self
                    .outgoing(i)
                    .filter(|l| {
                        l.relationship.rel_type == "BORROWED"
                            && self.has_label(l.end, &EntityLabel::Deal)
                    })
                    .map(|l| l.end)
                    .collect();
                BorrowerSummary {
                    name: self.nodes[i].name.clone(),
                    sector,
                    deal_count: deals.len() as i64,
                    total_funded_mm: Self::sum_property(
                        deals.iter().map(|&d| &self.nodes[d].properties),
                        "amount_mm",
                    ),
                }
            })
            .collect();
        results.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(results)
    }

    async fn lender_summaries(&self) -> Result<Vec<LenderSummary>> {
        let mut results: Vec<LenderSummary> = (0..self.nodes.len())
            .filter(|&i| self.has_label(i, &EntityLabel::Lender))
            .map(|i| {
                let lent: Vec<&MemoryLink> = self
                    .outgoing(i)
                    .filter(|l| {
                        l.relationship.rel_type == "LENT_TO"
                            && self.has_label(l.end, &EntityLabel::Deal)
                    })
                    .collect();
                LenderSummary {
                    name: self.nodes[i].name.clone(),
                    lender_type: self.nodes[i]
                        .property("type")
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                    deal_count: lent.len() as i64,
                    total_commitment_mm: Self::sum_property(
                        lent.iter().map(|l| &l.relationship.properties),
                        "commitment_mm",
                    ),
                }
            })
            .collect();
        results.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(results)
    }

    async fn stats(&self) -> Result<GraphStats> {
        let count = |label: EntityLabel| self.nodes.iter().filter(|n| n.label == label).count() as i64;
        let deals = self.nodes.iter().filter(|n| n.label == EntityLabel::Deal);

        Ok(GraphStats {
            borrowers: count(EntityLabel::Borrower),
            lenders: count(EntityLabel::Lender),
            deals: count(EntityLabel::Deal),
            sectors: count(EntityLabel::Sector),
            total_deal_volume_mm: Self::sum_property(deals.map(|n| &n.properties), "amount_mm"),
        })
    }
}
