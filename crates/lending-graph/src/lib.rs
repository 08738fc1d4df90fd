//! lending-graph: Neo4j client and query facade for the lending graph.
//!
//! All graph reads flow through `GraphClient`, which implements
//! `lending_core::GraphSource`. The demo fixture can be written to Neo4j
//! with `GraphClient::seed` or served directly from memory by `MemoryGraph`.

pub mod client;
pub mod fixture;
pub mod memory;
pub mod queries;
pub mod seed;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use memory::MemoryGraph;
