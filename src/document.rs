use serde::{Deserialize, Serialize};

/// A crawled documentation page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// `postId` of the page, when the crawl identifies pages by it
    #[serde(rename = "postId", default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,

    pub title: String,

    /// URL the click resolved to
    pub url: String,

    /// Markup of the page's content container
    pub content: String,
}

impl Document {
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self { post_id: None, title: title.into(), url: url.into(), content: content.into() }
    }

    /// Builder method: set post id
    pub fn with_post_id(mut self, post_id: impl Into<String>) -> Self {
        self.post_id = Some(post_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_field_names() {
        let doc = Document::new("Hello", "https://example.com?a=1", "<p>x</p>").with_post_id("1");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["postId"], "1");
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["url"], "https://example.com?a=1");
        assert_eq!(json["content"], "<p>x</p>");
    }

    #[test]
    fn test_post_id_absent() {
        let doc = Document::new("T", "https://example.com/api/T", "");
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("postId"));

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.post_id, None);
    }
}
