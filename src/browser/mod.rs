//! Browser session management
//!
//! - [`BrowserSession`]: the primary headless_chrome session a crawl runs in
//! - [`PageDriver`]: the operations the crawl engine needs from a session
//! - [`isolated`]: one-off reads in a disposable child tab

pub mod config;
pub mod driver;
pub mod isolated;
pub mod session;

pub use config::{ConnectionOptions, DEFAULT_USER_AGENT, LaunchOptions};
pub use driver::{PageDriver, ScrollState};
pub use session::BrowserSession;
