use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifies a DOM node inside one session generation.
///
/// A handle is only meaningful between the query that produced it and the
/// next navigation of the session that issued it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    /// CDP node id
    pub node_id: u32,

    /// Session generation the node id belongs to
    pub generation: u64,
}

impl NodeHandle {
    pub fn new(node_id: u32, generation: u64) -> Self {
        Self { node_id, generation }
    }
}

/// Point-in-time view of a navigation tree element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavNode {
    /// HTML tag name (e.g., "span", "div")
    pub tag_name: String,

    /// Element attributes (e.g., id, class)
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Handle used to act on the node
    pub handle: NodeHandle,
}

impl NavNode {
    /// Create a new NavNode
    pub fn new(tag_name: impl Into<String>, handle: NodeHandle) -> Self {
        Self { tag_name: tag_name.into(), attributes: HashMap::new(), handle }
    }

    /// Build a node from the flat `name1, value1, name2, value2, ...` list CDP reports
    pub fn from_flat_attributes(tag_name: impl Into<String>, flat: &[String], handle: NodeHandle) -> Self {
        let attributes = flat
            .chunks_exact(2)
            .map(|pair| (pair[0].to_ascii_lowercase(), pair[1].clone()))
            .collect();

        Self { tag_name: tag_name.into(), attributes, handle }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: set the class attribute
    pub fn with_class(mut self, classes: impl Into<String>) -> Self {
        self.attributes.insert("class".to_string(), classes.into());
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Check if element has a specific class (exact, case-sensitive token match)
    pub fn has_class(&self, class_name: &str) -> bool {
        if let Some(classes) = self.attributes.get("class") {
            classes.split_whitespace().any(|c| c == class_name)
        } else {
            false
        }
    }

    /// Check if element carries every one of the given classes
    pub fn has_all_classes(&self, class_names: &[&str]) -> bool {
        class_names.iter().all(|c| self.has_class(c))
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with_class(class: &str) -> NavNode {
        NavNode::new("span", NodeHandle::new(1, 0)).with_class(class)
    }

    #[test]
    fn test_has_class_exact_token() {
        assert!(!node_with_class("foobar").has_class("foo"));
        assert!(node_with_class("foo bar").has_class("foo"));
        assert!(node_with_class("foo bar").has_class("bar"));
        assert!(!node_with_class("Foo").has_class("foo"));
    }

    #[test]
    fn test_has_class_without_attribute() {
        let node = NavNode::new("div", NodeHandle::new(7, 0));
        assert!(!node.has_class("anything"));
    }

    #[test]
    fn test_has_all_classes() {
        let node = node_with_class("inactiveDot isHavingChildren");
        assert!(node.has_all_classes(&["inactiveDot", "isHavingChildren"]));
        assert!(!node.has_all_classes(&["inactiveDot", "isHavingChildren", "isHavingChildrenAndOpen"]));
        assert!(node.has_all_classes(&[]));
    }

    #[test]
    fn test_from_flat_attributes() {
        let flat = vec!["id".to_string(), "foo".to_string(), "CLASS".to_string(), "a b c".to_string()];
        let node = NavNode::from_flat_attributes("DIV", &flat, NodeHandle::new(3, 2));

        assert_eq!(node.get_attribute("id"), Some(&"foo".to_string()));
        assert_eq!(node.get_attribute("class"), Some(&"a b c".to_string()));
        assert!(node.get_attribute("href").is_none());
        assert!(node.is_tag("div"));
        assert_eq!(node.handle, NodeHandle::new(3, 2));
    }

    #[test]
    fn test_from_flat_attributes_ignores_dangling_name() {
        let flat = vec!["class".to_string(), "x".to_string(), "hidden".to_string()];
        let node = NavNode::from_flat_attributes("span", &flat, NodeHandle::new(1, 0));
        assert_eq!(node.attributes.len(), 1);
    }
}
