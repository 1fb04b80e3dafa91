//! Headless browser tier for JS-heavy or bot-guarded pages.
//!
//! Uses chromiumoxide (feature `render`). The browser is launched per call and
//! torn down before `attempt` returns, whatever the outcome.

use async_trait::async_trait;
use pagesift_core::Error;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::fetch::agents::{random_user_agent, random_window_size};
use crate::fetch::{FetchConfig, FetchStrategy, FetchTier};

/// Scroll step run 1-3 times to trigger lazy-loaded content.
pub const SCROLL_STEP_JS: &str = "window.scrollBy(0, window.innerHeight * 0.7);";

/// Return to the top before capturing markup.
pub const SCROLL_TOP_JS: &str = "window.scrollTo(0, 0);";

/// Hides the most common automation fingerprint before any page script runs.
pub const MASK_WEBDRIVER_JS: &str = "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });";

/// Launcher defaults kept when chromiumoxide's own list is disabled.
///
/// Same as chromiumoxide's defaults minus `--enable-automation`, which shows
/// the automation infobar and sets `navigator.webdriver`.
pub const BASE_CHROME_ARGS: &[&str] = &[
    "--disable-background-networking",
    "--enable-features=NetworkService,NetworkServiceInProcess",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-breakpad",
    "--disable-client-side-phishing-detection",
    "--disable-component-extensions-with-background-pages",
    "--disable-default-apps",
    "--disable-extensions",
    "--disable-features=TranslateUI",
    "--disable-hang-monitor",
    "--disable-ipc-flooding-protection",
    "--disable-popup-blocking",
    "--disable-prompt-on-repost",
    "--disable-renderer-backgrounding",
    "--disable-sync",
    "--force-color-profile=srgb",
    "--metrics-recording-only",
    "--no-first-run",
    "--password-store=basic",
    "--use-mock-keychain",
];

/// Errors that can occur during page rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to launch or connect to browser.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Failed to navigate to URL.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Failed to get page content.
    #[error("content retrieval failed: {0}")]
    ContentRetrieval(String),
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        Error::RenderFailed(err.to_string())
    }
}

/// Options for one browser session.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Run without a window.
    pub headless: bool,

    /// User-Agent passed on the command line.
    pub user_agent: String,

    /// Window and viewport dimensions.
    pub window: (u32, u32),

    /// Bound on waiting for `<body>`.
    pub max_wait: Duration,

    /// Fixed delay after the body appears.
    pub js_wait: Duration,

    /// Whether to run the lazy-load scroll pass.
    pub scroll: bool,
}

impl RenderOptions {
    /// Options with a random User-Agent and window size.
    pub fn randomized(config: &FetchConfig) -> Self {
        Self {
            headless: config.headless,
            user_agent: random_user_agent().to_string(),
            window: random_window_size(),
            max_wait: config.render_max_wait,
            js_wait: config.js_wait,
            scroll: true,
        }
    }

    /// Chrome command-line switches for this session.
    ///
    /// Headless mode itself is selected on the launch config.
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args: Vec<String> = BASE_CHROME_ARGS.iter().map(|arg| arg.to_string()).collect();
        args.extend([
            "--remote-allow-origins=*".to_string(),
            "--disable-gpu".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-blink-features=AutomationControlled".to_string(),
            "--disable-infobars".to_string(),
            format!("--user-agent={}", self.user_agent),
            format!("--window-size={},{}", self.window.0, self.window.1),
        ]);
        if self.headless {
            args.push("--hide-scrollbars".to_string());
        }
        args
    }
}

/// Browser-render fetch tier.
pub struct BrowserRender;

#[async_trait]
impl FetchStrategy for BrowserRender {
    fn tier(&self) -> FetchTier {
        FetchTier::Browser
    }

    fn is_available(&self, config: &FetchConfig) -> bool {
        config.render_enabled && cfg!(feature = "render")
    }

    fn retries_blocked(&self) -> bool {
        true
    }

    async fn attempt(&self, url: &Url, config: &FetchConfig) -> Result<String, Error> {
        let opts = RenderOptions::randomized(config);
        tracing::debug!(window = ?opts.window, headless = opts.headless, "rendering {url}");
        render(url, &opts).await
    }
}

#[cfg(feature = "render")]
async fn render(url: &Url, opts: &RenderOptions) -> Result<String, Error> {
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::handler::viewport::Viewport;
    use futures_util::StreamExt;

    let (width, height) = opts.window;
    let mut builder = BrowserConfig::builder()
        .disable_default_args()
        .no_sandbox()
        .window_size(width, height)
        .viewport(Viewport { width, height, ..Default::default() })
        .args(opts.chrome_args());
    builder = if opts.headless { builder.new_headless_mode() } else { builder.with_head() };
    let browser_config = builder.build().map_err(RenderError::BrowserLaunch)?;

    let (mut browser, mut handler) = Browser::launch(browser_config)
        .await
        .map_err(|e| RenderError::BrowserLaunch(e.to_string()))?;

    let events = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::debug!("browser handler event error: {e}");
                break;
            }
        }
    });

    let result = capture(&browser, url, opts).await;

    if let Err(e) = browser.close().await {
        tracing::debug!("browser close failed: {e}");
    }
    browser.wait().await.ok();
    events.abort();

    result
}

#[cfg(feature = "render")]
async fn capture(browser: &chromiumoxide::Browser, url: &Url, opts: &RenderOptions) -> Result<String, Error> {
    use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
    use rand::Rng;

    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| RenderError::Navigation(e.to_string()))?;

    page.execute(AddScriptToEvaluateOnNewDocumentParams::new(MASK_WEBDRIVER_JS))
        .await
        .ok();

    page.goto(url.as_str())
        .await
        .map_err(|e| RenderError::Navigation(e.to_string()))?;

    let body = tokio::time::timeout(opts.max_wait, async {
        loop {
            if page.find_element("body").await.is_ok() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    })
    .await;
    if body.is_err() {
        tracing::debug!("no <body> after {:?}, continuing", opts.max_wait);
    }

    tokio::time::sleep(opts.js_wait).await;

    if opts.scroll {
        let steps = rand::thread_rng().gen_range(1..=3);
        for _ in 0..steps {
            page.evaluate(SCROLL_STEP_JS).await.ok();
            let pause = rand::thread_rng().gen_range(600..=1400);
            tokio::time::sleep(Duration::from_millis(pause)).await;
        }
        page.evaluate(SCROLL_TOP_JS).await.ok();
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    let html = page
        .content()
        .await
        .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?;

    page.close().await.ok();
    Ok(html)
}

#[cfg(not(feature = "render"))]
async fn render(_url: &Url, _opts: &RenderOptions) -> Result<String, Error> {
    Err(Error::RenderDisabled)
}
