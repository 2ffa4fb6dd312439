use crate::{browser::{config::{ConnectionOptions, LaunchOptions},
                      driver::{PageDriver, ScrollState},
                      isolated},
            dom::{NavNode, NodeHandle},
            error::{CrawlError, Result}};
use headless_chrome::{Browser, Element, Tab, util::Wait};
use serde::Deserialize;
use std::{ffi::{OsStr, OsString},
          sync::{Arc,
                 atomic::{AtomicU64, Ordering}},
          time::Duration};

/// Interval between visibility checks
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Browser session that owns a Chrome/Chromium instance and the primary tab the crawl runs in
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// The primary tab; every engine command targets it
    tab: Arc<Tab>,

    /// Bumped on every navigation, invalidating earlier node handles
    generation: AtomicU64,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        // Set on the command line so child tabs report the same agent
        let user_agent_arg = options.user_agent.as_ref().map(|ua| OsString::from(format!("--user-agent={}", ua)));

        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));
        launch_opts.args.push(OsStr::new("--disable-gpu"));
        if options.ignore_certificate_errors {
            launch_opts.args.push(OsStr::new("--ignore-certificate-errors"));
        }

        if let Some(arg) = &user_agent_arg {
            launch_opts.args.push(arg.as_os_str());
        }

        launch_opts.idle_browser_timeout = options.idle_timeout;
        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser = Browser::new(launch_opts).map_err(|e| CrawlError::LaunchFailed(e.to_string()))?;

        let tab = browser.new_tab().map_err(|e| CrawlError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::debug!("Launched browser (headless: {})", options.headless);

        Ok(Self { browser, tab, generation: AtomicU64::new(0) })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser =
            Browser::connect(options.ws_url.clone()).map_err(|e| CrawlError::ConnectionFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| CrawlError::ConnectionFailed(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(Duration::from_millis(options.timeout));

        log::debug!("Connected to browser at {}", options.ws_url);

        Ok(Self { browser, tab, generation: AtomicU64::new(0) })
    }

    /// Get the primary tab
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Current handle generation
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Resolve a node handle back into a live element, rejecting handles from earlier generations
    fn element(&self, node: &NavNode) -> Result<Element<'_>> {
        let current = self.generation();
        if node.handle.generation != current {
            return Err(CrawlError::StaleNode {
                node_id: node.handle.node_id,
                handle_generation: node.handle.generation,
                current_generation: current,
            });
        }

        Element::new(&self.tab, node.handle.node_id)
            .map_err(|e| CrawlError::ElementNotFound(format!("Node {} is gone: {}", node.handle.node_id, e)))
    }

    /// Close the primary tab. The browser process exits when the session is dropped.
    pub fn close(&self) -> Result<()> {
        self.tab
            .close(true)
            .map_err(|e| CrawlError::TabOperationFailed(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}

impl PageDriver for BrowserSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.generation.fetch_add(1, Ordering::SeqCst);

        self.tab
            .navigate_to(url)
            .map_err(|e| CrawlError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| CrawlError::NavigationFailed(format!("Navigation to {} did not complete: {}", url, e)))?;

        Ok(())
    }

    fn wait_visible(&self, selector: &str, timeout: Duration) -> Result<()> {
        wait_visible(&self.tab, selector, timeout)
    }

    fn query_all(&self, selector: &str) -> Result<Vec<NavNode>> {
        // find_elements fails on an empty match, which is not an error here
        let count_js = format!("document.querySelectorAll({}).length", js_string(selector));
        let count = self
            .tab
            .evaluate(&count_js, false)
            .map_err(|e| CrawlError::EvaluationFailed(e.to_string()))?
            .value
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        if count == 0 {
            return Ok(Vec::new());
        }

        let generation = self.generation();
        let elements = self
            .tab
            .find_elements(selector)
            .map_err(|e| CrawlError::ElementNotFound(format!("Elements '{}' not found: {}", selector, e)))?;

        let mut nodes = Vec::with_capacity(elements.len());
        for element in elements {
            let attributes = element
                .get_attributes()
                .map_err(|e| CrawlError::EvaluationFailed(format!("Failed to read attributes: {}", e)))?
                .unwrap_or_default();
            nodes.push(NavNode::from_flat_attributes(
                element.tag_name.to_ascii_lowercase(),
                &attributes,
                NodeHandle::new(element.node_id, generation),
            ));
        }

        Ok(nodes)
    }

    fn outer_html(&self, node: &NavNode) -> Result<String> {
        self.element(node)?
            .get_content()
            .map_err(|e| CrawlError::EvaluationFailed(format!("Failed to read outer HTML: {}", e)))
    }

    fn scroll_into_view(&self, node: &NavNode) -> Result<()> {
        self.element(node)?
            .scroll_into_view()
            .map_err(|e| CrawlError::TabOperationFailed(format!("Failed to scroll into view: {}", e)))?;
        Ok(())
    }

    fn click(&self, node: &NavNode) -> Result<()> {
        self.element(node)?.click().map_err(|e| CrawlError::ClickFailed(e.to_string()))?;
        Ok(())
    }

    fn scroll_by(&self, selector: &str, delta: i64) -> Result<Option<ScrollState>> {
        let js = format!(
            r#"(() => {{
                const el = document.querySelector({});
                if (!el) return JSON.stringify({{ ok: false, top: 0, height: 0 }});
                el.scrollBy(0, {});
                return JSON.stringify({{ ok: true, top: Math.round(el.scrollTop), height: el.scrollHeight }});
            }})()"#,
            js_string(selector),
            delta
        );

        let json_str = evaluate_string(&self.tab, &js)?;
        let state: ScrollResult = serde_json::from_str(&json_str)
            .map_err(|e| CrawlError::EvaluationFailed(format!("Failed to parse scroll state: {}", e)))?;

        Ok(state.ok.then_some(ScrollState { top: state.top, height: state.height }))
    }

    fn current_url(&self) -> Result<String> {
        // SPA route changes do not always reach the target info, so ask the page
        evaluate_string(&self.tab, "window.location.href")
    }

    fn inner_text(&self, selector: &str) -> Result<String> {
        read_property(&self.tab, selector, "innerText")
    }

    fn inner_html(&self, selector: &str) -> Result<String> {
        inner_html(&self.tab, selector)
    }

    fn fetch_isolated(&self, url: &str, selector: &str, timeout: Duration) -> Result<String> {
        isolated::fetch_inner_html(&self.browser, url, selector, timeout)
    }
}

#[derive(Deserialize)]
struct ScrollResult {
    ok: bool,
    top: i64,
    height: i64,
}

/// Quote a value as a JavaScript string literal
pub(crate) fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn evaluate_string(tab: &Tab, js: &str) -> Result<String> {
    let value = tab
        .evaluate(js, false)
        .map_err(|e| CrawlError::EvaluationFailed(e.to_string()))?
        .value
        .ok_or_else(|| CrawlError::EvaluationFailed("No value returned".to_string()))?;

    serde_json::from_value(value).map_err(|e| CrawlError::EvaluationFailed(format!("Expected a string: {}", e)))
}

fn read_property(tab: &Tab, selector: &str, property: &str) -> Result<String> {
    let js = format!(
        "(() => {{ const el = document.querySelector({}); return el ? el.{} : null; }})()",
        js_string(selector),
        property
    );

    let value = tab.evaluate(&js, false).map_err(|e| CrawlError::EvaluationFailed(e.to_string()))?.value;

    match value {
        Some(serde_json::Value::String(s)) => Ok(s),
        _ => Err(CrawlError::ElementNotFound(format!("Element '{}' not found", selector))),
    }
}

pub(crate) fn inner_html(tab: &Tab, selector: &str) -> Result<String> {
    read_property(tab, selector, "innerHTML")
}

/// Poll until the first element matching `selector` has a rendered box and is not hidden by style
pub(crate) fn wait_visible(tab: &Tab, selector: &str, timeout: Duration) -> Result<()> {
    let js = format!(
        r#"(() => {{
            const el = document.querySelector({});
            if (!el) return false;
            const style = window.getComputedStyle(el);
            if (style.display === 'none' || style.visibility === 'hidden') return false;
            const rect = el.getBoundingClientRect();
            return rect.width > 0 || rect.height > 0;
        }})()"#,
        js_string(selector)
    );

    Wait::new(timeout, POLL_INTERVAL)
        .until(|| {
            matches!(
                tab.evaluate(&js, false).map(|r| r.value),
                Ok(Some(serde_json::Value::Bool(true)))
            )
            .then_some(())
        })
        .map_err(|_| CrawlError::Timeout(format!("'{}' not visible after {:?}", selector, timeout)))
}
