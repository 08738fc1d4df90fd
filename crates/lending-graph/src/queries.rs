//! Read operations: the Cypher side of the `GraphSource` facade.
//!
//! Every traversal returns `subject`, `rel`, `object` columns so rows decode
//! the same way regardless of the query. Labels that arrive from callers are
//! passed as parameters; labels interpolated into Cypher come only from
//! `EgoRole`.

use async_trait::async_trait;
use neo4rs::query;
use serde::de::DeserializeOwned;

use lending_core::error::Result;
use lending_core::source::{BorrowerSummary, EgoRole, GraphStats, LenderSummary};
use lending_core::{
    EntityLabel, GraphNode, GraphRelationship, GraphRow, GraphSource, Properties, PropertyValue,
};

use crate::client::{GraphClient, GraphError};

const ALL_ROWS: &str = "MATCH (n)
     OPTIONAL MATCH (n)-[r]->(m)
     RETURN n AS subject, r AS rel, m AS object";

const FIND_NODE: &str = "MATCH (n)
     WHERE $label IN labels(n) AND n.name = $name
     RETURN n
     LIMIT 1";

const NEIGHBORS: &str = "MATCH (n)
     WHERE $label IN labels(n) AND n.name = $name
     OPTIONAL MATCH (n)-[r]-(m)
     RETURN n AS subject, r AS rel, m AS object";

const BORROWER_SUMMARIES: &str = "MATCH (b:Borrower)
     OPTIONAL MATCH (b)-[:IN_SECTOR]->(s:Sector)
     WITH b, collect(s.name)[0] AS sector
     OPTIONAL MATCH (b)-[:BORROWED]->(d:Deal)
     RETURN b.name AS name, sector,
            count(d) AS deal_count,
            toFloat(coalesce(sum(d.amount_mm), 0)) AS total_funded_mm
     ORDER BY name";

const LENDER_SUMMARIES: &str = "MATCH (l:Lender)
     OPTIONAL MATCH (l)-[r:LENT_TO]->(d:Deal)
     RETURN l.name AS name, l.type AS lender_type,
            count(d) AS deal_count,
            toFloat(coalesce(sum(r.commitment_mm), 0)) AS total_commitment_mm
     ORDER BY name";

const STATS: &str = "CALL { MATCH (b:Borrower) RETURN count(b) AS borrowers }
     CALL { MATCH (l:Lender) RETURN count(l) AS lenders }
     CALL { MATCH (s:Sector) RETURN count(s) AS sectors }
     CALL { MATCH (d:Deal)
            RETURN count(d) AS deals,
                   toFloat(coalesce(sum(d.amount_mm), 0)) AS total_deal_volume_mm }
     RETURN borrowers, lenders, deals, sectors, total_deal_volume_mm";

fn inner_hop_cypher(role: EgoRole) -> String {
    let focal = role.focal_label();
    let counterpart = role.counterpart_label();
    format!(
        "MATCH (f:{focal} {{name: $name}})-[r]->(d:Deal)
         RETURN f AS subject, r AS rel, d AS object
         UNION ALL
         MATCH (f:{focal} {{name: $name}})-->(d:Deal)<-[r]-(c:{counterpart})
         RETURN c AS subject, r AS rel, d AS object"
    )
}

fn outer_hop_cypher(role: EgoRole) -> String {
    let focal = role.focal_label();
    let counterpart = role.counterpart_label();
    format!(
        "MATCH (c:{counterpart})-[r]->(d:Deal)
         WHERE c.name IN $counterparts AND NOT d.name IN $exclude
         RETURN c AS subject, r AS rel, d AS object
         UNION ALL
         MATCH (c:{counterpart})-->(d:Deal)<-[r]-(p:{focal})
         WHERE c.name IN $counterparts AND NOT d.name IN $exclude
         RETURN p AS subject, r AS rel, d AS object"
    )
}

impl GraphClient {
    /// Run a `subject, rel, object` query and decode its rows.
    async fn traversal_rows(&self, q: neo4rs::Query) -> std::result::Result<Vec<GraphRow>, GraphError> {
        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(graph_row) = neo4j_row_to_graph_row(row)? {
                results.push(graph_row);
            }
        }
        Ok(results)
    }
}

#[async_trait]
impl GraphSource for GraphClient {
    async fn all_rows(&self) -> Result<Vec<GraphRow>> {
        let rows = self.traversal_rows(query(ALL_ROWS)).await?;
        tracing::debug!(rows = rows.len(), "Fetched whole graph");
        Ok(rows)
    }

    async fn find_node(&self, label: &EntityLabel, name: &str) -> Result<Option<GraphNode>> {
        let q = query(FIND_NODE)
            .param("label", label.as_str())
            .param("name", name);

        match self.query_one(q).await? {
            Some(row) => {
                let node: neo4rs::Node = field(&row, "n")?;
                Ok(neo4j_node_to_graph_node(&node))
            }
            None => Ok(None),
        }
    }

    async fn neighbors(&self, label: &EntityLabel, name: &str) -> Result<Vec<GraphRow>> {
        let q = query(NEIGHBORS)
            .param("label", label.as_str())
            .param("name", name);
        Ok(self.traversal_rows(q).await?)
    }

    async fn inner_hop(&self, role: EgoRole, name: &str) -> Result<Vec<GraphRow>> {
        let q = query(&inner_hop_cypher(role)).param("name", name);
        let rows = self.traversal_rows(q).await?;
        tracing::debug!(?role, name, rows = rows.len(), "Fetched inner hop");
        Ok(rows)
    }

    async fn outer_hop(
        &self,
        role: EgoRole,
        counterparts: &[String],
        exclude_deals: &[String],
    ) -> Result<Vec<GraphRow>> {
        let q = query(&outer_hop_cypher(role))
            .param("counterparts", counterparts.to_vec())
            .param("exclude", exclude_deals.to_vec());
        let rows = self.traversal_rows(q).await?;
        tracing::debug!(?role, counterparts = counterparts.len(), rows = rows.len(), "Fetched outer hop");
        Ok(rows)
    }

    async fn borrower_summaries(&self) -> Result<Vec<BorrowerSummary>> {
        let rows = self.query_rows(query(BORROWER_SUMMARIES)).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(BorrowerSummary {
                name: field(&row, "name")?,
                sector: field(&row, "sector")?,
                deal_count: field(&row, "deal_count")?,
                total_funded_mm: field(&row, "total_funded_mm")?,
            });
        }
        Ok(results)
    }

    async fn lender_summaries(&self) -> Result<Vec<LenderSummary>> {
        let rows = self.query_rows(query(LENDER_SUMMARIES)).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(LenderSummary {
                name: field(&row, "name")?,
                lender_type: field(&row, "lender_type")?,
                deal_count: field(&row, "deal_count")?,
                total_commitment_mm: field(&row, "total_commitment_mm")?,
            });
        }
        Ok(results)
    }

    async fn stats(&self) -> Result<GraphStats> {
        let row = self
            .query_one(query(STATS))
            .await?
            .ok_or_else(|| GraphError::Serialization("Stats query returned no rows".to_string()))?;

        Ok(GraphStats {
            borrowers: field(&row, "borrowers")?,
            lenders: field(&row, "lenders")?,
            deals: field(&row, "deals")?,
            sectors: field(&row, "sectors")?,
            total_deal_volume_mm: field(&row, "total_deal_volume_mm")?,
        })
    }
}

// ── Row Decoding ─────────────────────────────────────────────────

fn field<T: DeserializeOwned>(row: &neo4rs::Row, key: &str) -> std::result::Result<T, GraphError> {
    row.get::<T>(key)
        .map_err(|e| GraphError::Serialization(format!("Failed to deserialize column {key}: {e}")))
}

/// Decode a `subject, rel, object` row. Rows whose subject has no name are
/// dropped.
fn neo4j_row_to_graph_row(row: &neo4rs::Row) -> std::result::Result<Option<GraphRow>, GraphError> {
    let subject: neo4rs::Node = field(row, "subject")?;
    let rel: Option<neo4rs::Relation> = field(row, "rel")?;
    let object: Option<neo4rs::Node> = field(row, "object")?;

    let Some(subject) = neo4j_node_to_graph_node(&subject) else {
        return Ok(None);
    };

    Ok(Some(GraphRow {
        subject,
        relationship: rel.as_ref().map(neo4j_relation_to_graph_relationship),
        object: object.as_ref().and_then(neo4j_node_to_graph_node),
    }))
}

/// Convert a neo4rs::Node into a `GraphNode`.
///
/// Returns `None` for nodes without a string `name`, since the name is the
/// identity key.
fn neo4j_node_to_graph_node(node: &neo4rs::Node) -> Option<GraphNode> {
    let label = EntityLabel::primary(node.labels());
    let name: String = match node.get("name") {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!(%label, error = %e, "Skipping node without a name");
            return None;
        }
    };

    let mut properties = Properties::new();
    for key in node.keys() {
        if key == "name" {
            continue;
        }
        match node.get::<PropertyValue>(key) {
            Ok(value) => {
                properties.insert(key.to_string(), value);
            }
            Err(e) => tracing::warn!(%label, %name, key, error = %e, "Skipping non-scalar property"),
        }
    }

    Some(GraphNode {
        label,
        name,
        properties,
    })
}

fn neo4j_relation_to_graph_relationship(rel: &neo4rs::Relation) -> GraphRelationship {
    let mut properties = Properties::new();
    for key in rel.keys() {
        match rel.get::<PropertyValue>(key) {
            Ok(value) => {
                properties.insert(key.to_string(), value);
            }
            Err(e) => tracing::warn!(rel_type = rel.typ(), key, error = %e, "Skipping non-scalar property"),
        }
    }

    GraphRelationship {
        rel_type: rel.typ().to_string(),
        properties,
    }
}
