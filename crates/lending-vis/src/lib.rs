//! lending-vis: Projection of raw graph rows into vis.js Network data.
//!
//! Takes rows from a `GraphSource`, projects nodes and relationships into
//! styled `VisNode`/`VisEdge` values, deduplicates them, and (for ego views)
//! splits the result into a full-emphasis inner tier and a faded outer tier.

pub mod assemble;
pub mod detail;
pub mod ego;
pub mod identity;
pub mod project;
pub mod style;

pub use assemble::{assemble, GraphAssembler, VisGraph};
pub use detail::{node_detail, Connection, NodeDetail};
pub use ego::{expand_ego, EgoNetwork, Tier};
pub use identity::NodeId;
pub use project::{project_edge, project_node, VisEdge, VisNode};
pub use style::{style_for, NodeStyle};
