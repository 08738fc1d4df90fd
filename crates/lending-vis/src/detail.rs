//! Node detail: one entity and its direct neighbors.

use std::collections::HashSet;

use serde::Serialize;

use lending_core::error::Result;
use lending_core::{EntityLabel, GraphSource, LendingError, Properties};

/// A neighbor reached over one relationship type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub relationship: String,
    pub relationship_props: Properties,
    pub node_label: EntityLabel,
    pub node_name: String,
    /// Includes `name`.
    pub node_props: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetail {
    pub label: EntityLabel,
    pub name: String,
    /// Includes `name`.
    pub properties: Properties,
    pub connections: Vec<Connection>,
}

/// Fetch a node and its neighbors in both directions.
///
/// Connections are unique on (relationship type, neighbor label, neighbor
/// name) and keep first-seen order. `label` is passed through to the source
/// as is and echoed in the response, even when the stored node renders under
/// a different primary label.
pub async fn node_detail<S>(source: &S, label: &EntityLabel, name: &str) -> Result<NodeDetail>
where
    S: GraphSource + ?Sized,
{
    let rows = source.neighbors(label, name).await?;
    let Some(first) = rows.first() else {
        return Err(LendingError::not_found(label.as_str(), name));
    };

    let mut seen = HashSet::new();
    let mut connections = Vec::new();
    for (rel, neighbor) in rows.iter().filter_map(|r| r.segment()) {
        let key = (rel.rel_type.clone(), neighbor.label.clone(), neighbor.name.clone());
        if !seen.insert(key) {
            continue;
        }
        connections.push(Connection {
            relationship: rel.rel_type.clone(),
            relationship_props: rel.properties.clone(),
            node_label: neighbor.label.clone(),
            node_name: neighbor.name.clone(),
            node_props: neighbor.all_properties(),
        });
    }

    Ok(NodeDetail {
        label: label.clone(),
        name: first.subject.name.clone(),
        properties: first.subject.all_properties(),
        connections,
    })
}
