use crate::crawl::policy::{IdentityStrategy, UrlPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of the MapleStory Worlds creators documentation site
pub const SITE_ORIGIN: &str = "https://maplestoryworlds-creators.nexon.com";

/// Selectors and class names describing the documentation page structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteLayout {
    /// Region holding the collapsible document tree
    pub nav_container: String,

    /// Container whose inner markup is a document's content
    pub content_container: String,

    /// Document title element
    pub title: String,

    /// Container read by isolated fetches
    pub isolated_content: String,

    /// Tag of expand/collapse markers
    pub toggle_tag: String,

    /// Classes a closed marker with children carries
    pub toggle_classes: Vec<String>,

    /// Class a marker carries once expanded
    pub toggle_open_class: String,

    /// Selector (relative to the nav container) for leaf-depth nodes
    pub leaf_selector: String,

    /// Class marking a leaf-depth node that is really a branch header
    pub branch_class: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            nav_container: "#App > main > div.contents_wrap > div.tree_view_container".to_string(),
            content_container:
                "#App > main > div.contents_wrap > div.renderContent > div.text_content_container > div.text_content"
                    .to_string(),
            title: "#App > main > div.contents_wrap > div.renderContent h1".to_string(),
            isolated_content: "div.text_content_container".to_string(),
            toggle_tag: "span".to_string(),
            toggle_classes: vec!["inactiveDot".to_string(), "isHavingChildren".to_string()],
            toggle_open_class: "isHavingChildrenAndOpen".to_string(),
            leaf_selector: "div.inactiveDepth".to_string(),
            branch_class: "activeParent".to_string(),
        }
    }
}

impl SiteLayout {
    /// Selector matching every descendant of the nav container
    pub fn nav_descendants(&self) -> String {
        format!("{} *", self.nav_container)
    }

    /// Selector matching leaf-depth nodes under the nav container
    pub fn nav_leaves(&self) -> String {
        format!("{} {}", self.nav_container, self.leaf_selector)
    }
}

/// Where a document's content markup is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStrategy {
    /// The content container of the primary tab after the click
    Inline,
    /// A disposable child tab opened at the resolved URL
    Isolated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Language {
    Ko,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which documentation tree a target crawls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SiteKind {
    /// Reference guides, addressed by `postId`
    Reference,
    /// API reference, addressed by path
    Api,
}

impl SiteKind {
    /// File stem used for this kind's output
    pub fn file_stem(&self) -> &'static str {
        match self {
            SiteKind::Reference => "reference",
            SiteKind::Api => "api",
        }
    }
}

/// Everything that varies between crawls of different documentation trees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlTarget {
    pub start_url: String,
    pub layout: SiteLayout,
    pub identity: IdentityStrategy,
    pub content: ContentStrategy,
    pub policy: UrlPolicy,
}

impl CrawlTarget {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            layout: SiteLayout::default(),
            identity: IdentityStrategy::post_id(),
            content: ContentStrategy::Inline,
            policy: UrlPolicy::new("nexon.com").require_path("/docs"),
        }
    }

    /// Reference guides: `postId` identity, inline content, `/docs` paths only
    pub fn reference(lang: Language) -> Self {
        Self::new(format!("{}/{}/docs/?postId=472", SITE_ORIGIN, lang))
    }

    /// API reference: URL identity, isolated content, `/apiReference` paths of the same language
    pub fn api_reference(lang: Language) -> Self {
        Self {
            identity: IdentityStrategy::Url,
            content: ContentStrategy::Isolated,
            policy: UrlPolicy::new("nexon.com").require_path("/apiReference").require_path(format!("/{}/", lang)),
            ..Self::new(format!("{}/{}/apiReference/How-to-use-API-Reference", SITE_ORIGIN, lang))
        }
    }

    pub fn preset(kind: SiteKind, lang: Language) -> Self {
        match kind {
            SiteKind::Reference => Self::reference(lang),
            SiteKind::Api => Self::api_reference(lang),
        }
    }

    /// Builder method: override the start URL
    pub fn with_start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = url.into();
        self
    }

    /// Builder method: set the identity strategy
    pub fn with_identity(mut self, identity: IdentityStrategy) -> Self {
        self.identity = identity;
        self
    }

    /// Builder method: set the content strategy
    pub fn with_content(mut self, content: ContentStrategy) -> Self {
        self.content = content;
        self
    }

    /// Builder method: set the URL policy
    pub fn with_policy(mut self, policy: UrlPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder method: set the page layout
    pub fn with_layout(mut self, layout: SiteLayout) -> Self {
        self.layout = layout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_preset() {
        let target = CrawlTarget::reference(Language::Ko);
        assert_eq!(target.start_url, "https://maplestoryworlds-creators.nexon.com/ko/docs/?postId=472");
        assert_eq!(target.identity, IdentityStrategy::post_id());
        assert_eq!(target.content, ContentStrategy::Inline);
        assert!(target.policy.allows(&target.start_url));
    }

    #[test]
    fn test_api_preset() {
        let target = CrawlTarget::api_reference(Language::En);
        assert_eq!(
            target.start_url,
            "https://maplestoryworlds-creators.nexon.com/en/apiReference/How-to-use-API-Reference"
        );
        assert_eq!(target.identity, IdentityStrategy::Url);
        assert_eq!(target.content, ContentStrategy::Isolated);
        assert_eq!(target.policy.required_path_segments, vec!["/apiReference".to_string(), "/en/".to_string()]);
        assert!(target.policy.allows(&target.start_url));
    }

    #[test]
    fn test_layout_selectors() {
        let layout = SiteLayout::default();
        assert_eq!(layout.nav_descendants(), "#App > main > div.contents_wrap > div.tree_view_container *");
        assert_eq!(layout.nav_leaves(), "#App > main > div.contents_wrap > div.tree_view_container div.inactiveDepth");
    }

    #[test]
    fn test_preset_dispatch() {
        assert_eq!(CrawlTarget::preset(SiteKind::Api, Language::Ko), CrawlTarget::api_reference(Language::Ko));
        assert_eq!(SiteKind::Reference.file_stem(), "reference");
    }
}
