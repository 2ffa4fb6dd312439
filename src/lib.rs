//! # docs-crawler
//!
//! Crawls a JavaScript-rendered documentation site through headless Chrome (CDP):
//! fully expands its collapsible navigation tree, clicks every leaf page once,
//! and extracts the rendered content.
//!
//! ## Features
//!
//! - **Tree expansion**: clicks closed branch markers until a whole pass finds none
//! - **Leaf collection**: visits genuine leaves only, deduplicated by post id or URL
//! - **Retry with backoff**: flaky content reads are retried with jittered exponential backoff
//! - **Isolated fetches**: pages can be read in a disposable child tab that
//!   leaves the crawling tab untouched
//! - **Sinks and converters**: JSON, CSV and raw-markup output; markdown via mdream or html2md
//!
//! ## Command Line
//!
//! ```bash
//! # Crawl the Korean reference docs into JSON
//! cargo run -- crawl --site reference --lang ko --format json --output docs.json
//!
//! # Crawl all four default targets and convert to markdown under docs/
//! cargo run -- build --converter mdream
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use docs_crawler::{CrawlConfig, CrawlTarget, Crawler, Language, LaunchOptions, LogEvents};
//! use docs_crawler::output::{self, OutputFormat};
//!
//! # fn main() -> docs_crawler::Result<()> {
//! let mut crawler = Crawler::launch(
//!     LaunchOptions::default(),
//!     CrawlConfig::default().limit(10),
//!     Box::new(LogEvents),
//! )?;
//!
//! let docs = crawler.run(&CrawlTarget::reference(Language::En))?;
//! output::save("docs.json", OutputFormat::Json, &docs)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: browser session, the [`PageDriver`] seam and isolated fetches
//! - [`dom`]: navigation node snapshots and class/text predicates
//! - [`crawl`]: backoff, retry policy, targets and the [`Crawler`] engine
//! - [`output`]: document sinks
//! - [`convert`]: markup-to-markdown converters
//! - [`events`]: structured crawl events
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod convert;
pub mod crawl;
pub mod document;
pub mod dom;
pub mod error;
pub mod events;
pub mod output;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions, PageDriver, ScrollState};
pub use crawl::{BackoffConfig, ContentStrategy, CrawlConfig, CrawlTarget, Crawler, IdentityStrategy, Language,
                SiteKind, SiteLayout, UrlPolicy};
pub use document::Document;
pub use dom::{NavNode, NodeHandle};
pub use error::{CrawlError, Result};
pub use events::{CrawlEvents, LogEvents, NoopEvents, SkipReason};
