use serde::{Deserialize, Serialize};
use url::Url;

/// How a document's canonical identity is derived from the URL a click lands on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStrategy {
    /// Use the value of a query parameter (e.g., `postId`)
    QueryParam(String),
    /// Use the URL verbatim
    Url,
}

impl IdentityStrategy {
    /// The `postId` query parameter
    pub fn post_id() -> Self {
        IdentityStrategy::QueryParam("postId".to_string())
    }

    /// Resolve the identity of `url`, or `None` when it cannot be derived
    pub fn resolve(&self, url: &str) -> Option<String> {
        match self {
            IdentityStrategy::QueryParam(name) => query_param(url, name),
            IdentityStrategy::Url => {
                let trimmed = url.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    /// Whether the identity doubles as the document's post id
    pub fn is_post_id(&self) -> bool {
        matches!(self, IdentityStrategy::QueryParam(_))
    }
}

/// Extract a non-empty query parameter value from `url`
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Which URLs a click may land on and still yield a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPolicy {
    /// Host must end with this suffix (e.g., "nexon.com")
    pub host_suffix: String,

    /// Every segment must occur in the URL path (e.g., "/docs")
    pub required_path_segments: Vec<String>,
}

impl UrlPolicy {
    pub fn new(host_suffix: impl Into<String>) -> Self {
        Self { host_suffix: host_suffix.into(), required_path_segments: Vec::new() }
    }

    /// Builder method: require a path segment
    pub fn require_path(mut self, segment: impl Into<String>) -> Self {
        self.required_path_segments.push(segment.into());
        self
    }

    pub fn allows(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        if !host.ends_with(&self.host_suffix) {
            return false;
        }
        let path = parsed.path();
        self.required_path_segments.iter().all(|segment| path.contains(segment.as_str()))
    }
}

/// Normalize an incomplete URL by adding a missing scheme
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    // If already has a protocol, return as-is
    if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("file://")
        || trimmed.starts_with("data:")
        || trimmed.starts_with("about:")
    {
        return trimmed.to_string();
    }

    // localhost special case - use http by default
    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        return format!("http://{}", trimmed);
    }

    format!("https://{}", trimmed)
}
