//! DOM inspection helpers
//!
//! Navigation tree nodes are ephemeral snapshots: they are re-queried on every
//! traversal pass because each click can mutate the tree. This module provides:
//! - NavNode: tag name, attributes and a generation-scoped handle
//! - class-set predicates over a node
//! - has_any_visible_text: text detection on serialized markup

pub mod element;
pub mod text;

pub use element::{NavNode, NodeHandle};
pub use text::has_any_visible_text;

/// Check whether a node carries `name` as an exact class token
pub fn has_class(node: &NavNode, name: &str) -> bool {
    node.has_class(name)
}

/// Check whether a node carries every class in `names`
pub fn has_all_classes(node: &NavNode, names: &[&str]) -> bool {
    node.has_all_classes(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_function_exports() {
        let node = NavNode::new("span", NodeHandle::new(1, 0)).with_class("collapsible has-children");
        assert!(has_class(&node, "collapsible"));
        assert!(!has_class(&node, "has"));
        assert!(has_all_classes(&node, &["collapsible", "has-children"]));
        assert!(has_any_visible_text("<b>x</b>"));
    }
}
