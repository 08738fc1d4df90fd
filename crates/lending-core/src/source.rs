//! The query facade consumed by the projection layer.
//!
//! Implementations execute parameterized queries against a graph store and
//! return raw rows; all projection, deduplication, and tiering happens on top
//! of this contract. Implementations are shared read-only across requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{LendingError, Result};
use crate::types::{EntityLabel, GraphNode, GraphRow};

/// Which side of a deal an ego-network is centered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EgoRole {
    Borrower,
    Lender,
}

impl EgoRole {
    /// Label of the focal entity (and of second-order parties).
    pub fn focal_label(self) -> EntityLabel {
        match self {
            Self::Borrower => EntityLabel::Borrower,
            Self::Lender => EntityLabel::Lender,
        }
    }

    /// Label of the parties sitting across the table on the focal deals.
    pub fn counterpart_label(self) -> EntityLabel {
        match self {
            Self::Borrower => EntityLabel::Lender,
            Self::Lender => EntityLabel::Borrower,
        }
    }
}

impl TryFrom<&EntityLabel> for EgoRole {
    type Error = LendingError;

    fn try_from(label: &EntityLabel) -> Result<Self> {
        match label {
            EntityLabel::Borrower => Ok(Self::Borrower),
            EntityLabel::Lender => Ok(Self::Lender),
            other => Err(LendingError::InvalidArgument(format!(
                "ego network requires a Borrower or Lender, got '{other}'"
            ))),
        }
    }
}

/// Listing entry for a borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerSummary {
    pub name: String,
    pub sector: Option<String>,
    pub deal_count: i64,
    /// Sum of `amount_mm` over the borrower's deals.
    pub total_funded_mm: f64,
}

/// Listing entry for a lender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub lender_type: Option<String>,
    pub deal_count: i64,
    /// Sum of `commitment_mm` over the lender's LENT_TO relationships.
    pub total_commitment_mm: f64,
}

/// Aggregate counts across the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub borrowers: i64,
    pub lenders: i64,
    pub deals: i64,
    pub sectors: i64,
    pub total_deal_volume_mm: f64,
}

/// Read-only access to the lending graph.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Every node, each joined to its outgoing relationships.
    ///
    /// Nodes without outgoing relationships appear once with no relationship.
    async fn all_rows(&self) -> Result<Vec<GraphRow>>;

    /// Look up a single node by label and name.
    async fn find_node(&self, label: &EntityLabel, name: &str) -> Result<Option<GraphNode>>;

    /// The node joined to every neighbor in either direction.
    ///
    /// The subject of every row is the requested node. An empty result means
    /// the node does not exist; an existing node without neighbors yields one
    /// row with no relationship.
    async fn neighbors(&self, label: &EntityLabel, name: &str) -> Result<Vec<GraphRow>>;

    /// First hop of an ego network: the focal entity's links to its deals,
    /// followed by every counterpart's links to those same deals.
    ///
    /// Rows are oriented `party -[rel]-> deal`.
    async fn inner_hop(&self, role: EgoRole, name: &str) -> Result<Vec<GraphRow>>;

    /// Second hop of an ego network: the counterparts' links to deals outside
    /// `exclude_deals`, followed by the links of focal-kind parties to those
    /// deals.
    ///
    /// Rows are oriented `party -[rel]-> deal`.
    async fn outer_hop(
        &self,
        role: EgoRole,
        counterparts: &[String],
        exclude_deals: &[String],
    ) -> Result<Vec<GraphRow>>;

    async fn borrower_summaries(&self) -> Result<Vec<BorrowerSummary>>;

    async fn lender_summaries(&self) -> Result<Vec<LenderSummary>>;

    async fn stats(&self) -> Result<GraphStats>;
}
