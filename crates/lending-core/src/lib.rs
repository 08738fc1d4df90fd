//! lending-core: Shared types and contracts for the direct lending graph.
//!
//! This crate provides the foundational pieces used across all lending crates:
//! - Entity labels and the closed property value type
//! - Raw graph nodes, relationships, and query rows
//! - The `GraphSource` query facade trait
//! - Common error types

pub mod error;
pub mod source;
pub mod types;

pub use error::LendingError;
pub use source::{EgoRole, GraphSource};
pub use types::{EntityLabel, GraphNode, GraphRelationship, GraphRow, PropertyValue, Properties};
