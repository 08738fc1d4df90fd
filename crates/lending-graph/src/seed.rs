//! Write path for loading the demo fixture into Neo4j.
//!
//! This is the only code that mutates the graph. It clears the database and
//! recreates every fixture node and relationship inside one transaction, so a
//! failed seed leaves the previous contents untouched.

use neo4rs::query;

use crate::client::{GraphClient, GraphError};
use crate::fixture::{BORROWERS, DEALS, LENDERS, PARTICIPATIONS, SECTORS};

/// Counts of what a seed run created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub nodes: usize,
    pub relationships: usize,
}

impl GraphClient {
    /// Replace the database contents with the demo fixture.
    pub async fn seed(&self) -> Result<SeedReport, GraphError> {
        let mut txn = self.start_txn().await?;

        txn.run(query("MATCH (n) DETACH DELETE n")).await?;

        // ── Sectors ──────────────────────────────────────────────
        for name in SECTORS {
            txn.run(query("CREATE (:Sector {name: $name})").param("name", *name))
                .await?;
        }
        tracing::info!(count = SECTORS.len(), "Created sectors");

        // ── Borrowers + IN_SECTOR ────────────────────────────────
        for b in BORROWERS {
            let q = query(
                "CREATE (b:Borrower {name: $name, revenue_mm: $revenue_mm,
                   ebitda_mm: $ebitda_mm, hq: $hq})
                 WITH b
                 MATCH (s:Sector {name: $sector})
                 CREATE (b)-[:IN_SECTOR]->(s)",
            )
            .param("name", b.name)
            .param("revenue_mm", b.revenue_mm)
            .param("ebitda_mm", b.ebitda_mm)
            .param("hq", b.hq)
            .param("sector", b.sector);
            txn.run(q).await?;
        }
        tracing::info!(count = BORROWERS.len(), "Created borrowers with IN_SECTOR links");

        // ── Lenders ──────────────────────────────────────────────
        for l in LENDERS {
            let q = query("CREATE (:Lender {name: $name, type: $type, aum_bn: $aum_bn})")
                .param("name", l.name)
                .param("type", l.lender_type)
                .param("aum_bn", l.aum_bn);
            txn.run(q).await?;
        }
        tracing::info!(count = LENDERS.len(), "Created lenders");

        // ── Deals + BORROWED ─────────────────────────────────────
        for d in DEALS {
            let q = query(
                "CREATE (deal:Deal {name: $name, type: $type, amount_mm: $amount_mm,
                   spread_bps: $spread_bps, maturity: $maturity})
                 WITH deal
                 MATCH (b:Borrower {name: $borrower})
                 CREATE (b)-[:BORROWED]->(deal)",
            )
            .param("name", d.name)
            .param("type", d.deal_type)
            .param("amount_mm", d.amount_mm)
            .param("spread_bps", d.spread_bps)
            .param("maturity", d.maturity)
            .param("borrower", d.borrower);
            txn.run(q).await?;
        }
        tracing::info!(count = DEALS.len(), "Created deals with BORROWED links");

        // ── LENT_TO ──────────────────────────────────────────────
        for p in PARTICIPATIONS {
            let q = query(
                "MATCH (l:Lender {name: $lender}), (d:Deal {name: $deal})
                 CREATE (l)-[:LENT_TO {commitment_mm: $commitment_mm, role: $role}]->(d)",
            )
            .param("lender", p.lender)
            .param("deal", p.deal)
            .param("commitment_mm", p.commitment_mm)
            .param("role", p.role);
            txn.run(q).await?;
        }
        tracing::info!(count = PARTICIPATIONS.len(), "Created LENT_TO relationships");

        txn.commit().await?;

        let report = SeedReport {
            nodes: SECTORS.len() + BORROWERS.len() + LENDERS.len() + DEALS.len(),
            relationships: BORROWERS.len() + DEALS.len() + PARTICIPATIONS.len(),
        };
        tracing::info!(nodes = report.nodes, relationships = report.relationships, "Seed complete");
        Ok(report)
    }
}
