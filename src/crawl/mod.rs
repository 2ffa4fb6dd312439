//! Tree-walk crawl engine and its retry machinery

pub mod backoff;
pub mod config;
pub mod deadline;
pub mod engine;
pub mod policy;
pub mod retry;
pub mod target;

pub use backoff::{Backoff, BackoffConfig};
pub use config::{CrawlConfig, ScrollConfig};
pub use deadline::Deadline;
pub use engine::Crawler;
pub use policy::{IdentityStrategy, UrlPolicy, normalize_url};
pub use retry::RetryPolicy;
pub use target::{ContentStrategy, CrawlTarget, Language, SITE_ORIGIN, SiteKind, SiteLayout};
