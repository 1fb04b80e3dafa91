//! Plain HTTP tier.

use async_trait::async_trait;
use pagesift_core::Error;
use reqwest::{Client, Url, header};

use super::agents::{ACCEPT_LANGUAGE, REFERER, random_user_agent};
use super::{FetchConfig, FetchStrategy, FetchTier, transport_error};

/// Single GET with a rotated User-Agent and a fixed referer.
///
/// Any non-2xx status or transport error fails the tier; nothing is retried.
pub struct PlainHttp;

impl PlainHttp {
    fn client(config: &FetchConfig) -> Result<Client, Error> {
        Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.ignore_ssl)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {e}")))
    }
}

#[async_trait]
impl FetchStrategy for PlainHttp {
    fn tier(&self) -> FetchTier {
        FetchTier::Plain
    }

    async fn attempt(&self, url: &Url, config: &FetchConfig) -> Result<String, Error> {
        let client = Self::client(config)?;

        let response = client
            .get(url.clone())
            .header(header::USER_AGENT, random_user_agent())
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(header::REFERER, REFERER)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

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
    fn test_plain_tier() {
        assert_eq!(PlainHttp.tier(), FetchTier::Plain);
        assert!(PlainHttp.is_available(&FetchConfig::default()));
        assert!(!PlainHttp.retries_blocked());
    }

    #[test]
    fn test_client_builds_with_ssl_bypass() {
        let config = FetchConfig { ignore_ssl: true, ..Default::default() };
        assert!(PlainHttp::client(&config).is_ok());
    }

    #[tokio::test]
    #[ignore = "requires network"]
    async fn test_fetch_example_com() {
        let url = Url::parse("https://example.com").unwrap();
        let html = PlainHttp.attempt(&url, &FetchConfig::default()).await.unwrap();
        assert!(html.contains("Example Domain"));
    }
}
