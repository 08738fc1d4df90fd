//! Projection of single graph nodes and relationships into vis.js shapes.

use serde::Serialize;

use lending_core::{EntityLabel, GraphNode, GraphRelationship, Properties};

use crate::identity::NodeId;
use crate::style::style_for;

/// Node color: a plain CSS color, or a background/border pair once muted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VisColor {
    Solid(String),
    Muted { background: String, border: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeFont {
    pub color: String,
}

/// A node in vis.js Network format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisNode {
    pub id: NodeId,
    /// Display label: the entity name.
    pub label: String,
    pub group: EntityLabel,
    /// Hover HTML.
    pub title: String,
    pub color: VisColor,
    pub shape: &'static str,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<NodeFont>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeFont {
    pub size: u32,
    pub align: &'static str,
}

/// An edge in vis.js Network format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
    pub title: String,
    pub arrows: &'static str,
    pub font: EdgeFont,
}

/// Build the visualization node for a graph node.
///
/// The hover title is a bold `Label: name` header followed by one
/// `key: value` line per property, in key order.
pub fn project_node(node: &GraphNode) -> VisNode {
    let style = style_for(&node.label);
    let header = format!("<b>{}: {}</b>", node.label, node.name);

    VisNode {
        id: NodeId::new(&node.label, &node.name),
        label: node.name.clone(),
        group: node.label.clone(),
        title: hover_text(header, &node.properties),
        color: VisColor::Solid(style.color.to_string()),
        shape: style.shape,
        size: style.size,
        opacity: None,
        font: None,
    }
}

/// Build the visualization edge for a relationship between two projected nodes.
pub fn project_edge(rel: &GraphRelationship, from: NodeId, to: NodeId) -> VisEdge {
    let mut label = rel.rel_type.replace('_', " ");
    if let Some(commitment) = rel.property("commitment_mm") {
        label.push_str(&format!("\n${commitment}MM"));
    }

    VisEdge {
        from,
        to,
        label,
        title: hover_text(format!("<b>{}</b>", rel.rel_type), &rel.properties),
        arrows: "to",
        font: EdgeFont {
            size: 10,
            align: "middle",
        },
    }
}

fn hover_text(header: String, properties: &Properties) -> String {
    let mut lines = vec![header];
    lines.extend(properties.iter().map(|(k, v)| format!("{k}: {v}")));
    lines.join("<br>")
}
