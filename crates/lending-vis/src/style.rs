//! Fixed visual presets per node label.

use lending_core::EntityLabel;

/// Color, shape, and size for a vis.js node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub color: &'static str,
    pub shape: &'static str,
    pub size: u32,
}

pub const BORROWER_STYLE: NodeStyle = NodeStyle { color: "#4A90D9", shape: "dot", size: 25 };
pub const LENDER_STYLE: NodeStyle = NodeStyle { color: "#5CB85C", shape: "diamond", size: 25 };
pub const DEAL_STYLE: NodeStyle = NodeStyle { color: "#F0AD4E", shape: "square", size: 20 };
pub const SECTOR_STYLE: NodeStyle = NodeStyle { color: "#9B59B6", shape: "triangle", size: 20 };
pub const DEFAULT_STYLE: NodeStyle = NodeStyle { color: "#999", shape: "dot", size: 15 };

/// Style preset for a label. Labels outside the vocabulary get `DEFAULT_STYLE`.
pub fn style_for(label: &EntityLabel) -> NodeStyle {
    match label {
        EntityLabel::Borrower => BORROWER_STYLE,
        EntityLabel::Lender => LENDER_STYLE,
        EntityLabel::Deal => DEAL_STYLE,
        EntityLabel::Sector => SECTOR_STYLE,
        EntityLabel::Other(_) => DEFAULT_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_have_distinct_presets() {
        assert_eq!(style_for(&EntityLabel::Borrower).shape, "dot");
        assert_eq!(style_for(&EntityLabel::Lender).shape, "diamond");
        assert_eq!(style_for(&EntityLabel::Deal).color, "#F0AD4E");
        assert_eq!(style_for(&EntityLabel::Sector).size, 20);
    }

    #[test]
    fn unknown_labels_fall_back() {
        for raw in ["", "Fund", "borrower", "Borrower "] {
            assert_eq!(style_for(&EntityLabel::from(raw)), DEFAULT_STYLE, "label {raw:?}");
        }
    }
}
