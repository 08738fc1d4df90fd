//! Stable identifiers for visualization nodes.

use std::fmt;

use serde::Serialize;

use lending_core::EntityLabel;

/// Separator between label and name. Labels never contain it.
pub const ID_SEPARATOR: char = ':';

/// Identifier of a visualization node: `"<Label>:<name>"`.
///
/// Two graph nodes with the same label and name always map to the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(label: &EntityLabel, name: &str) -> Self {
        Self(format!("{label}{ID_SEPARATOR}{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
