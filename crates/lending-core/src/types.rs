//! Core domain types for the lending knowledge graph.
//!
//! These mirror what the graph database hands back: single-labeled nodes keyed
//! by `name`, typed directed relationships, and query rows pairing the two.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Labels ────────────────────────────────────────────────────────

/// The type label of a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Borrower,
    Lender,
    Deal,
    Sector,
    /// Any label outside the modeled vocabulary.
    Other(String),
}

impl EntityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Borrower => "Borrower",
            Self::Lender => "Lender",
            Self::Deal => "Deal",
            Self::Sector => "Sector",
            Self::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Pick the rendering label for a node that may carry several labels.
    ///
    /// The first label (in database order) from the known vocabulary wins.
    /// Failing that, the lexicographically smallest label is used, so the
    /// choice never depends on set iteration order.
    pub fn primary<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut fallback: Option<&str> = None;
        for raw in labels {
            let label = Self::from(raw);
            if label.is_known() {
                return label;
            }
            if fallback.map_or(true, |f| raw < f) {
                fallback = Some(raw);
            }
        }
        Self::from(fallback.unwrap_or_default())
    }
}

impl From<&str> for EntityLabel {
    fn from(s: &str) -> Self {
        match s {
            "Borrower" => Self::Borrower,
            "Lender" => Self::Lender,
            "Deal" => Self::Deal,
            "Sector" => Self::Sector,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EntityLabel {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        match label {
            EntityLabel::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Properties ────────────────────────────────────────────────────

/// A scalar property value stored on a node or relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Null,
}

impl PropertyValue {
    /// Numeric view used by aggregate computations.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            // Integral floats keep a trailing `.0` so `21.0` stays distinguishable from `21`.
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Property mapping. Keys iterate in sorted order.
pub type Properties = BTreeMap<String, PropertyValue>;

// ── Nodes and Relationships ───────────────────────────────────────

/// A node as returned by the graph database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub label: EntityLabel,
    /// Unique within its label.
    pub name: String,
    /// Every property except `name`.
    #[serde(default)]
    pub properties: Properties,
}

impl GraphNode {
    pub fn new(label: impl Into<EntityLabel>, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// The full property mapping as stored in the database, `name` included.
    pub fn all_properties(&self) -> Properties {
        let mut props = self.properties.clone();
        props.insert("name".to_string(), PropertyValue::String(self.name.clone()));
        props
    }
}

/// A directed, typed relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRelationship {
    /// Relationship type, e.g. `LENT_TO`.
    pub rel_type: String,
    #[serde(default)]
    pub properties: Properties,
}

impl GraphRelationship {
    pub fn new(rel_type: impl Into<String>) -> Self {
        Self {
            rel_type: rel_type.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

/// One row of a query result: a subject node, optionally joined to an
/// object node through a relationship.
///
/// For directed traversals the subject is the relationship's start node.
/// `relationship` and `object` are `None` for optional-match misses.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphRow {
    pub subject: GraphNode,
    pub relationship: Option<GraphRelationship>,
    pub object: Option<GraphNode>,
}

impl GraphRow {
    /// A row carrying a node with no outgoing relationship.
    pub fn node(subject: GraphNode) -> Self {
        Self {
            subject,
            relationship: None,
            object: None,
        }
    }

    /// A row carrying `subject -[relationship]-> object`.
    pub fn link(subject: GraphNode, relationship: GraphRelationship, object: GraphNode) -> Self {
        Self {
            subject,
            relationship: Some(relationship),
            object: Some(object),
        }
    }

    /// The relationship and object, only when both are present.
    pub fn segment(&self) -> Option<(&GraphRelationship, &GraphNode)> {
        match (&self.relationship, &self.object) {
            (Some(rel), Some(obj)) => Some((rel, obj)),
            _ => None,
        }
    }
}
