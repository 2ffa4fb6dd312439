use crate::{browser::{BrowserSession, LaunchOptions, PageDriver},
            crawl::{config::CrawlConfig, deadline::Deadline, retry::RetryPolicy, target::{ContentStrategy, CrawlTarget, SiteLayout}},
            document::Document,
            dom::{NavNode, has_any_visible_text},
            error::{CrawlError, Result},
            events::{CrawlEvents, SkipReason}};
use indexmap::IndexSet;

/// What visiting one leaf-depth node produced
enum Visit {
    /// Branch header or empty placeholder, not a leaf candidate
    NotCandidate,
    Skipped(SkipReason, Option<String>),
    Collected { identity: String, document: Document },
}

/// Walks a collapsible navigation tree and collects every leaf document.
///
/// A run goes through three phases on the primary session:
/// 1. navigate to the start URL and wait for the navigation container
/// 2. click closed branch markers until a full pass finds none
/// 3. click each leaf candidate once and read the page it opens
///
/// Node handles are re-queried every pass; nothing is kept across clicks
/// except the visited identities and the collected documents.
pub struct Crawler<D: PageDriver> {
    driver: D,
    config: CrawlConfig,
    events: Box<dyn CrawlEvents>,
    retry: RetryPolicy,
    visited: IndexSet<String>,
}

impl Crawler<BrowserSession> {
    /// Launch a browser and build a crawler that owns it
    pub fn launch(options: LaunchOptions, config: CrawlConfig, events: Box<dyn CrawlEvents>) -> Result<Self> {
        let session = BrowserSession::launch(options)?;
        Ok(Self::new(session, config, events))
    }
}

impl<D: PageDriver> Crawler<D> {
    pub fn new(driver: D, config: CrawlConfig, events: Box<dyn CrawlEvents>) -> Self {
        let retry = RetryPolicy::new(config.backoff, config.content_attempts);
        Self { driver, config, events, retry, visited: IndexSet::new() }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Identities collected by the latest run, in collection order
    pub fn visited(&self) -> &IndexSet<String> {
        &self.visited
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Crawl `target` and return its documents in collection order.
    ///
    /// Failing to reach the navigation tree aborts the run with no documents.
    /// Individual leaves that fail are skipped.
    pub fn run(&mut self, target: &CrawlTarget) -> Result<Vec<Document>> {
        self.visited.clear();
        let deadline = Deadline::after(self.config.overall_timeout);

        self.initialize(target, &deadline)?;
        let passes = self.expand(&target.layout, &deadline)?;
        log::info!("Expanded navigation tree in {} passes", passes);

        let docs = self.collect(target, &deadline)?;
        log::info!("Collected {} documents from {}", docs.len(), target.start_url);
        Ok(docs)
    }

    fn initialize(&self, target: &CrawlTarget, deadline: &Deadline) -> Result<()> {
        deadline.check()?;
        self.driver.navigate(&target.start_url)?;

        let nav = &target.layout.nav_container;
        self.driver
            .wait_visible(nav, deadline.clamp(self.config.nav_wait))
            .map_err(|e| CrawlError::NavContainerNotVisible(format!("{}: {}", nav, e)))
    }

    /// Scroll the navigation container until its offset stops moving
    fn scroll_to_end(&self, layout: &SiteLayout) -> Result<()> {
        let scroll = self.config.scroll;
        let mut last_top = None;
        for _ in 0..scroll.max_attempts {
            let state = self
                .driver
                .scroll_by(&layout.nav_container, scroll.step)?
                .ok_or_else(|| CrawlError::ElementNotFound(format!("'{}' not in page", layout.nav_container)))?;
            if last_top == Some(state.top) {
                break;
            }
            last_top = Some(state.top);
            std::thread::sleep(scroll.pause);
        }
        Ok(())
    }

    fn is_closed_branch(node: &NavNode, layout: &SiteLayout) -> bool {
        let classes: Vec<&str> = layout.toggle_classes.iter().map(String::as_str).collect();
        node.is_tag(&layout.toggle_tag) && node.has_all_classes(&classes) && !node.has_class(&layout.toggle_open_class)
    }

    /// Click closed branch markers until a full pass makes no progress. Returns the number of passes.
    fn expand(&self, layout: &SiteLayout, deadline: &Deadline) -> Result<usize> {
        let max_passes = self.config.max_expand_passes.max(1);
        let selector = layout.nav_descendants();

        for pass in 1..=max_passes {
            deadline.check()?;
            if let Err(e) = self.scroll_to_end(layout) {
                log::debug!("Scroll to end failed: {}", e);
            }

            let nodes = self.driver.query_all(&selector)?;

            let mut progressed = false;
            for node in nodes.iter().filter(|n| Self::is_closed_branch(n, layout)) {
                let _ = self.driver.scroll_into_view(node);
                if let Err(e) = self.driver.click(node) {
                    log::debug!("Failed to expand node {}: {}", node.handle.node_id, e);
                    continue;
                }
                std::thread::sleep(self.config.click_delay);
                progressed = true;
            }

            if !progressed {
                return Ok(pass);
            }
        }

        log::warn!("Navigation tree still had closed branches after {} passes", max_passes);
        Ok(max_passes)
    }

    fn collect(&mut self, target: &CrawlTarget, deadline: &Deadline) -> Result<Vec<Document>> {
        let layout = &target.layout;
        if let Err(e) = self.scroll_to_end(layout) {
            log::debug!("Scroll to end failed: {}", e);
        }

        let leaves = self.driver.query_all(&layout.nav_leaves())?;
        log::debug!("Found {} leaf-depth nodes", leaves.len());

        let mut docs = Vec::new();
        let mut stale = 0;
        for node in &leaves {
            if deadline.is_expired() {
                log::warn!("Crawl deadline reached; stopping with {} documents", docs.len());
                break;
            }

            match self.visit(node, target, deadline) {
                Visit::NotCandidate => {}
                Visit::Skipped(reason, url) => {
                    if reason == SkipReason::Stale {
                        stale += 1;
                    }
                    self.events.skipped(reason, url.as_deref());
                }
                Visit::Collected { identity, document } => {
                    self.events.parsed_doc(&document.title, &document.url);
                    self.visited.insert(identity);
                    docs.push(document);

                    if self.config.limit_reached(self.visited.len()) {
                        log::info!("Reached limit of {} documents", self.config.limit);
                        break;
                    }
                }
            }
        }

        if stale > 0 {
            log::warn!("Abandoned {} candidates whose handles went stale after returning to the start page", stale);
        }
        Ok(docs)
    }

    fn visit(&mut self, node: &NavNode, target: &CrawlTarget, deadline: &Deadline) -> Visit {
        let layout = &target.layout;

        if node.has_class(&layout.branch_class) {
            return Visit::NotCandidate;
        }
        match self.driver.outer_html(node) {
            Ok(html) if has_any_visible_text(&html) => {}
            Ok(_) => return Visit::NotCandidate,
            Err(CrawlError::StaleNode { .. }) => return Visit::Skipped(SkipReason::Stale, None),
            Err(e) => {
                log::debug!("Failed to read leaf {}: {}", node.handle.node_id, e);
                return Visit::NotCandidate;
            }
        }

        let _ = self.driver.scroll_into_view(node);
        if let Err(e) = self.driver.click(node) {
            log::debug!("Failed to click leaf {}: {}", node.handle.node_id, e);
            return Visit::Skipped(SkipReason::ClickFailed, None);
        }
        std::thread::sleep(self.config.click_delay);

        let url = match self.driver.current_url() {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Failed to read current URL: {}", e);
                return Visit::Skipped(SkipReason::NoIdentity, None);
            }
        };
        let Some(identity) = target.identity.resolve(&url) else {
            return Visit::Skipped(SkipReason::NoIdentity, Some(url));
        };
        if self.visited.contains(&identity) {
            return Visit::Skipped(SkipReason::Duplicate, Some(url));
        }

        let (title, inline_content) = match self.read_page(layout, target.content, deadline) {
            Ok(read) => read,
            Err(e) => {
                log::warn!("Giving up on {}: {}", url, e);
                return Visit::Skipped(SkipReason::ContentUnavailable, Some(url));
            }
        };

        if !target.policy.allows(&url) {
            log::debug!("{} is outside the allowed URLs; returning to {}", url, target.start_url);
            self.recover(target, deadline);
            return Visit::Skipped(SkipReason::Disallowed, Some(url));
        }

        let content = match target.content {
            ContentStrategy::Inline => inline_content,
            ContentStrategy::Isolated => self
                .driver
                .fetch_isolated(&url, &layout.isolated_content, deadline.clamp(self.config.isolated_timeout))
                .unwrap_or_else(|e| {
                    log::warn!("{}; keeping empty content", e);
                    String::new()
                }),
        };

        let mut document = Document::new(title, url, content);
        if target.identity.is_post_id() {
            document.post_id = Some(identity.clone());
        }
        Visit::Collected { identity, document }
    }

    /// Read the title and, for inline content, the content container markup, retrying with backoff
    fn read_page(&mut self, layout: &SiteLayout, content: ContentStrategy, deadline: &Deadline) -> Result<(String, String)> {
        let driver = &self.driver;
        let config = &self.config;

        self.retry.run(deadline, |_| {
            deadline.check()?;
            driver.wait_visible(&layout.content_container, deadline.clamp(config.content_wait))?;
            driver.wait_visible(&layout.title, deadline.clamp(config.title_wait))?;

            let title = driver.inner_text(&layout.title)?.trim().to_string();
            let html = match content {
                ContentStrategy::Inline => driver.inner_html(&layout.content_container)?,
                ContentStrategy::Isolated => String::new(),
            };
            Ok((title, html))
        })
    }

    /// Return to the start page after a click led somewhere unexpected
    fn recover(&self, target: &CrawlTarget, deadline: &Deadline) {
        if let Err(e) = self.driver.navigate(&target.start_url) {
            log::warn!("Failed to return to {}: {}", target.start_url, e);
            return;
        }
        if let Err(e) = self.driver.wait_visible(&target.layout.nav_container, deadline.clamp(self.config.recover_wait)) {
            log::warn!("Navigation container did not come back: {}", e);
        }
    }
}
