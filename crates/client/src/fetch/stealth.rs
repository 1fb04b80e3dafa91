//! Browser-mimicking HTTP tier.
//!
//! A fresh cookie-keeping session per call that sends the header set a desktop
//! Chrome sends on a top-level navigation. It does not execute JavaScript
//! challenges; pages that need that fall through to the browser tier.

use async_trait::async_trait;
use pagesift_core::Error;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Url};

use super::agents::{ACCEPT_LANGUAGE, REFERER, random_user_agent};
use super::{FetchConfig, FetchStrategy, FetchTier, transport_error};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Fresh browser-like session per call.
pub struct StealthHttp;

impl StealthHttp {
    fn navigation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));
        headers.insert(header::REFERER, HeaderValue::from_static(REFERER));
        headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
        headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
        headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
        headers.insert("sec-fetch-site", HeaderValue::from_static("cross-site"));
        headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
        headers
    }

    fn session(config: &FetchConfig) -> Result<Client, Error> {
        Client::builder()
            .user_agent(random_user_agent())
            .default_headers(Self::navigation_headers())
            .cookie_store(true)
            .timeout(config.stealth_timeout)
            .danger_accept_invalid_certs(config.ignore_ssl)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build stealth session: {e}")))
    }
}

#[async_trait]
impl FetchStrategy for StealthHttp {
    fn tier(&self) -> FetchTier {
        FetchTier::Stealth
    }

    fn is_available(&self, config: &FetchConfig) -> bool {
        config.stealth_enabled
    }

    async fn attempt(&self, url: &Url, config: &FetchConfig) -> Result<String, Error> {
        let session = Self::session(config)?;

        let response = session.get(url.clone()).send().await.map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {}", status.as_u16())));
        }

        response.text().await.map_err(|e| transport_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_follows_config() {
        let enabled = FetchConfig { stealth_enabled: true, ..Default::default() };
        let disabled = FetchConfig { stealth_enabled: false, ..Default::default() };
        assert!(StealthHttp.is_available(&enabled));
        assert!(!StealthHttp.is_available(&disabled));
    }

    #[test]
    fn test_navigation_headers() {
        let headers = StealthHttp::navigation_headers();
        assert_eq!(headers.get(header::REFERER).unwrap(), REFERER);
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "navigate");
        assert!(headers.contains_key(header::ACCEPT));
    }

    #[test]
    fn test_session_builds() {
        assert!(StealthHttp::session(&FetchConfig::default()).is_ok());
    }
}
