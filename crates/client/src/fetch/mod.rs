//! Tiered page fetching.
//!
//! ### Tiers
//! Strategies are tried in registry order, each exactly once:
//! 1. Plain HTTP GET with a rotated desktop User-Agent.
//! 2. Browser-mimicking HTTP session (only while no HTML has been obtained).
//! 3. Headless browser render (also retried when the HTML so far looks blocked).
//!
//! ### Outcome
//! - The first HTML that does not look blocked ends the chain.
//! - If the last tier attempted failed, the whole fetch fails with its detail.

pub mod agents;
pub mod denial;
pub mod plain;
pub mod stealth;
pub mod url;

use async_trait::async_trait;
use reqwest::Url;
use pagesift_core::{AppConfig, Error};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

pub use denial::{is_access_denied, looks_blocked};
pub use plain::PlainHttp;
pub use stealth::StealthHttp;
pub use self::url::{UrlError, parse_page_url, title_fallback};

use crate::render::BrowserRender;

/// Settings shared by every fetch tier.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Skip TLS certificate verification.
    pub ignore_ssl: bool,
    /// Plain tier timeout (default: 15s).
    pub request_timeout: Duration,
    /// Stealth tier timeout (default: 20s).
    pub stealth_timeout: Duration,
    /// Whether the stealth tier may be used.
    pub stealth_enabled: bool,
    /// Whether the browser tier may be used.
    pub render_enabled: bool,
    /// Run the browser without a window.
    pub headless: bool,
    /// Fixed delay after the body appears (default: 5s).
    pub js_wait: Duration,
    /// Bound on waiting for the body element (default: 20s).
    pub render_max_wait: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            ignore_ssl: config.ignore_ssl,
            request_timeout: config.request_timeout(),
            stealth_timeout: config.stealth_timeout(),
            stealth_enabled: config.stealth_enabled,
            render_enabled: config.render_enabled,
            headless: config.headless,
            js_wait: config.js_wait(),
            render_max_wait: config.render_max_wait(),
        }
    }
}

/// Which strategy produced the HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchTier {
    Plain,
    Stealth,
    Browser,
}

impl fmt::Display for FetchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchTier::Plain => "plain",
            FetchTier::Stealth => "stealth",
            FetchTier::Browser => "browser",
        };
        f.write_str(name)
    }
}

/// HTML obtained for one URL.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Raw markup, possibly empty.
    pub html: String,
    /// Tier that produced it.
    pub tier: FetchTier,
}

/// One tier of the fetch chain.
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Tier reported on success.
    fn tier(&self) -> FetchTier;

    /// Whether this tier may run under the given configuration.
    fn is_available(&self, _config: &FetchConfig) -> bool {
        true
    }

    /// Whether this tier is retried when earlier HTML looks blocked.
    fn retries_blocked(&self) -> bool {
        false
    }

    /// Fetch the page once.
    async fn attempt(&self, url: &Url, config: &FetchConfig) -> Result<String, Error>;
}

/// Ordered fetch chain.
pub struct Fetcher {
    strategies: Vec<Box<dyn FetchStrategy>>,
    config: FetchConfig,
}

impl Fetcher {
    /// Fetcher with the standard plain → stealth → browser registry.
    pub fn new(config: FetchConfig) -> Self {
        Self::with_strategies(config, vec![Box::new(PlainHttp), Box::new(StealthHttp), Box::new(BrowserRender)])
    }

    /// Fetcher over a custom ordered registry.
    pub fn with_strategies(config: FetchConfig, strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        Self { strategies, config }
    }

    /// Run the chain for `url`.
    pub async fn fetch(&self, url: &Url) -> Result<FetchResult, Error> {
        let mut current: Option<FetchResult> = None;
        let mut last_error: Option<Error> = None;

        for strategy in &self.strategies {
            let tier = strategy.tier();

            if !strategy.is_available(&self.config) {
                tracing::debug!(%tier, "fetch tier unavailable, skipping");
                continue;
            }

            if let Some(found) = &current {
                if !looks_blocked(&found.html) {
                    break;
                }
                if !strategy.retries_blocked() {
                    continue;
                }
                tracing::info!(%tier, from = %found.tier, "page looks blocked, escalating");
            }

            let start = Instant::now();
            match strategy.attempt(url, &self.config).await {
                Ok(html) => {
                    tracing::debug!(
                        %tier,
                        bytes = html.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "fetched {url}"
                    );
                    current = Some(FetchResult { html, tier });
                    last_error = None;
                }
                Err(e) => {
                    tracing::warn!(%tier, error = %e, "fetch tier failed for {url}");
                    last_error = Some(e);
                }
            }
        }

        match (current, last_error) {
            (_, Some(e)) => Err(Error::FetchFailed(e.detail())),
            (Some(found), None) => Ok(found),
            (None, None) => Err(Error::FetchFailed("no fetch tier available".into())),
        }
    }
}

/// Map a reqwest failure onto the unified error type.
pub(crate) fn transport_error(err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout(err.to_string())
    } else {
        Error::HttpError(format!("network error: {err}"))
    }
}
