use std::path::PathBuf;
use std::time::Duration;

/// User agent reported by launched browsers unless overridden
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Options for launching a new browser instance
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run without a visible window
    pub headless: bool,

    pub window_width: u32,

    pub window_height: u32,

    /// Custom Chrome/Chromium binary
    pub chrome_path: Option<PathBuf>,

    /// Persistent profile directory
    pub user_data_dir: Option<PathBuf>,

    pub sandbox: bool,

    /// User agent override; `None` keeps the browser's own
    pub user_agent: Option<String>,

    pub ignore_certificate_errors: bool,

    /// How long the browser may sit without CDP traffic before it is torn down
    pub idle_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 900,
            chrome_path: None,
            user_data_dir: None,
            sandbox: true,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            ignore_certificate_errors: true,
            idle_timeout: Duration::from_secs(60 * 60),
        }
    }
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set Chrome binary path
    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builder method: set user data directory
    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    /// Builder method: set sandbox mode
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Builder method: set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Options for attaching to a browser that is already running
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// DevTools websocket URL (e.g., ws://127.0.0.1:9222/devtools/browser/<id>)
    pub ws_url: String,

    /// Connection timeout in milliseconds
    pub timeout: u64,
}

impl ConnectionOptions {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self { ws_url: ws_url.into(), timeout: 30_000 }
    }

    /// Builder method: set connection timeout in milliseconds
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_defaults() {
        let opts = LaunchOptions::default();
        assert!(opts.headless);
        assert!(opts.sandbox);
        assert!(opts.ignore_certificate_errors);
        assert_eq!(opts.user_agent.as_deref(), Some(DEFAULT_USER_AGENT));
    }

    #[test]
    fn test_launch_options_builder() {
        let opts = LaunchOptions::new()
            .headless(false)
            .window_size(800, 600)
            .chrome_path("/usr/bin/chromium")
            .user_agent("test-agent");

        assert!(!opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
        assert_eq!(opts.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(opts.user_agent.as_deref(), Some("test-agent"));
    }

    #[test]
    fn test_connection_options() {
        let opts = ConnectionOptions::new("ws://localhost:9222").timeout(5000);

        assert_eq!(opts.ws_url, "ws://localhost:9222");
        assert_eq!(opts.timeout, 5000);
    }
}
