//! Page image harvesting.
//!
//! Every `<img>` is considered in page order. The source is `src`, then
//! `data-src`, then `data-lazy-src`; only absolute http(s) sources are
//! downloaded. A file that does not decode as an image is deleted. One bad
//! image never aborts the page.

use pagesift_core::{AppConfig, Error};
use reqwest::{Client, header};
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::fetch::agents::{REFERER, random_user_agent};
use crate::fetch::transport_error;

static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").expect("invalid selector"));

/// Attributes read for an image source, in order.
const SOURCE_ATTRS: [&str; 3] = ["src", "data-src", "data-lazy-src"];

/// Extension used when the URL path has none or an implausible one.
const DEFAULT_EXTENSION: &str = ".jpg";

/// Longest accepted extension, dot included.
const MAX_EXTENSION_LEN: usize = 6;

/// Image download settings.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Skip TLS certificate verification.
    pub ignore_ssl: bool,
    /// Per-request timeout (default: 20s).
    pub timeout: Duration,
    /// Stop after this many saved images.
    pub max_images: usize,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ImageConfig {
    fn from(config: &AppConfig) -> Self {
        Self { ignore_ssl: config.ignore_ssl, timeout: config.image_timeout(), max_images: config.max_images }
    }
}

/// Absolute http(s) image sources in page order.
pub fn image_sources(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&IMG)
        .filter_map(|img| {
            SOURCE_ATTRS
                .iter()
                .filter_map(|attr| img.value().attr(attr))
                .find(|value| !value.is_empty())
        })
        .map(str::trim)
        .filter(|src| !src.is_empty() && src.to_lowercase().starts_with("http"))
        .map(str::to_string)
        .collect()
}

/// File extension for an image URL, dot included.
pub fn image_extension(src: &str) -> String {
    let extension = url::Url::parse(src).ok().and_then(|url| {
        Path::new(url.path())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
    });

    match extension {
        Some(ext)
            if ext.len() > 1
                && ext.len() <= MAX_EXTENSION_LEN
                && ext[1..].chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Downloads and validates page images.
pub struct ImageHarvester {
    config: ImageConfig,
}

impl ImageHarvester {
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<Client, Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::REFERER, header::HeaderValue::from_static(REFERER));

        Client::builder()
            .user_agent(random_user_agent())
            .default_headers(headers)
            .timeout(self.config.timeout)
            .danger_accept_invalid_certs(self.config.ignore_ssl)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::ImageFailed(format!("failed to build HTTP client: {e}")))
    }

    /// Save up to `max_images` valid images from `html` into `folder`.
    ///
    /// Returns the saved paths in page order.
    pub async fn harvest(&self, html: &str, folder: &Path) -> Vec<PathBuf> {
        let sources = image_sources(html);
        if sources.is_empty() || self.config.max_images == 0 {
            return Vec::new();
        }

        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "skipping images");
                return Vec::new();
            }
        };

        let mut saved = Vec::new();
        for src in sources {
            if saved.len() >= self.config.max_images {
                break;
            }

            let path = folder.join(format!("img_{}{}", saved.len() + 1, image_extension(&src)));
            match save_image(&client, &src, &path).await {
                Ok(()) => saved.push(path),
                Err(e) => tracing::debug!(error = %e, "skipped image {src}"),
            }
        }

        tracing::debug!(count = saved.len(), "saved images into {}", folder.display());
        saved
    }
}

/// Download `src` to `path` and check it decodes; no file is left behind on failure.
async fn save_image(client: &Client, src: &str, path: &Path) -> Result<(), Error> {
    let result = match download(client, src, path).await {
        Ok(()) => validate(path.to_path_buf()).await,
        Err(e) => Err(e),
    };

    if result.is_err() {
        tokio::fs::remove_file(path).await.ok();
    }
    result
}

async fn download(client: &Client, src: &str, path: &Path) -> Result<(), Error> {
    let mut response = client.get(src).send().await.map_err(|e| transport_error(&e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::ImageFailed(format!("status {}", status.as_u16())));
    }

    let mut file = tokio::fs::File::create(path).await?;
    while let Some(chunk) = response.chunk().await.map_err(|e| transport_error(&e))? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

async fn validate(path: PathBuf) -> Result<(), Error> {
    tokio::task::spawn_blocking(move || decode_check(&path))
        .await
        .map_err(|e| Error::ImageFailed(format!("validation task failed: {e}")))?
}

fn decode_check(path: &Path) -> Result<(), Error> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map(|_| ())
        .map_err(|e| Error::ImageFailed(format!("not a decodable image: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_sources_order_and_fallbacks() {
        let html = r#"
            <html><body>
                <img src="https://cdn.example.com/a.png">
                <img data-src="https://cdn.example.com/b.jpg">
                <img src="" data-lazy-src=" https://cdn.example.com/c.gif ">
                <img src="/relative.png">
                <img src="data:image/png;base64,AAAA">
                <img>
                <img src="HTTP://cdn.example.com/d.webp">
            </body></html>
        "#;

        assert_eq!(
            image_sources(html),
            vec![
                "https://cdn.example.com/a.png",
                "https://cdn.example.com/b.jpg",
                "https://cdn.example.com/c.gif",
                "HTTP://cdn.example.com/d.webp",
            ]
        );
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("https://x.com/img/photo.png"), ".png");
        assert_eq!(image_extension("https://x.com/img/photo.jpeg?w=200"), ".jpeg");
        assert_eq!(image_extension("https://x.com/img/photo"), ".jpg");
        assert_eq!(image_extension("https://x.com/img/file.verylongext"), ".jpg");
        assert_eq!(image_extension("https://x.com/img/photo."), ".jpg");
        assert_eq!(image_extension("not a url"), ".jpg");
    }

    #[test]
    fn test_image_config_from_app_config() {
        let app = AppConfig { max_images: 3, ignore_ssl: true, ..Default::default() };
        let config = ImageConfig::from(&app);
        assert_eq!(config.max_images, 3);
        assert!(config.ignore_ssl);
        assert_eq!(config.timeout, Duration::from_millis(20_000));
    }

    #[tokio::test]
    async fn test_harvest_without_images_makes_no_requests() {
        let dir = tempfile::tempdir().unwrap();
        let harvester = ImageHarvester::new(ImageConfig::default());
        let saved = harvester.harvest("<p>no images</p>", dir.path()).await;
        assert!(saved.is_empty());
    }

    #[test]
    fn test_decode_check_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img_1.jpg");
        std::fs::write(&path, b"<html>not an image</html>").unwrap();
        assert!(decode_check(&path).is_err());
    }
}
