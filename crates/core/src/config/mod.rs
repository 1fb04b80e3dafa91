//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PAGESIFT_*)
//! 2. TOML config file (if PAGESIFT_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The binary applies its command-line flags on top of the loaded value.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Default download location for the Unicode PDF font.
pub const DEFAULT_FONT_URL: &str =
    "https://github.com/googlefonts/noto-fonts/raw/main/hinted/ttf/NotoSans/NotoSans-Regular.ttf";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PAGESIFT_*)
/// 2. TOML config file (if PAGESIFT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root directory under which one folder per processed URL is created.
    ///
    /// Set via PAGESIFT_OUTPUT_ROOT environment variable.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Whether the fallback browser runs headless.
    ///
    /// Set via PAGESIFT_HEADLESS environment variable.
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Seconds to wait for client-side rendering after the page body appears.
    ///
    /// Set via PAGESIFT_JS_WAIT_SECS environment variable.
    #[serde(default = "default_js_wait_secs")]
    pub js_wait_secs: u64,

    /// Maximum number of sentences kept in the summary.
    ///
    /// Set via PAGESIFT_SUMMARY_SENTENCES environment variable.
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,

    /// Whether the dictionary paraphraser runs over the summary.
    ///
    /// Set via PAGESIFT_PARAPHRASE environment variable.
    #[serde(default = "default_true")]
    pub paraphrase: bool,

    /// Skip TLS certificate verification for page and image requests.
    ///
    /// Set via PAGESIFT_IGNORE_SSL environment variable.
    #[serde(default)]
    pub ignore_ssl: bool,

    /// Maximum number of images saved per page.
    ///
    /// Set via PAGESIFT_MAX_IMAGES environment variable.
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// Whether the browser-mimicking HTTP tier is tried.
    ///
    /// Set via PAGESIFT_STEALTH_ENABLED environment variable.
    #[serde(default = "default_true")]
    pub stealth_enabled: bool,

    /// Whether the headless browser tier is tried.
    ///
    /// Set via PAGESIFT_RENDER_ENABLED environment variable.
    #[serde(default = "default_true")]
    pub render_enabled: bool,

    /// Plain HTTP tier timeout in milliseconds.
    ///
    /// Set via PAGESIFT_REQUEST_TIMEOUT_MS environment variable.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Browser-mimicking HTTP tier timeout in milliseconds.
    ///
    /// Set via PAGESIFT_STEALTH_TIMEOUT_MS environment variable.
    #[serde(default = "default_stealth_timeout_ms")]
    pub stealth_timeout_ms: u64,

    /// Per-image download timeout in milliseconds.
    ///
    /// Set via PAGESIFT_IMAGE_TIMEOUT_MS environment variable.
    #[serde(default = "default_image_timeout_ms")]
    pub image_timeout_ms: u64,

    /// Upper bound on waiting for the rendered page body, in milliseconds.
    ///
    /// Set via PAGESIFT_RENDER_MAX_WAIT_MS environment variable.
    #[serde(default = "default_render_max_wait_ms")]
    pub render_max_wait_ms: u64,

    /// TrueType font used for PDF output when present.
    ///
    /// Set via PAGESIFT_PDF_FONT_PATH environment variable.
    #[serde(default = "default_pdf_font_path")]
    pub pdf_font_path: PathBuf,

    /// Where to download the PDF font from when it is missing.
    ///
    /// Set via PAGESIFT_FONT_URL environment variable.
    #[serde(default = "default_font_url")]
    pub font_url: String,

    /// Whether to try downloading the PDF font at startup.
    ///
    /// Set via PAGESIFT_FETCH_FONT environment variable.
    #[serde(default = "default_true")]
    pub fetch_font: bool,
}

fn default_output_root() -> PathBuf {
    PathBuf::from("outputs_final")
}

fn default_true() -> bool {
    true
}

fn default_js_wait_secs() -> u64 {
    5
}

fn default_summary_sentences() -> usize {
    50
}

fn default_max_images() -> usize {
    50
}

fn default_request_timeout_ms() -> u64 {
    15_000
}

fn default_stealth_timeout_ms() -> u64 {
    20_000
}

fn default_image_timeout_ms() -> u64 {
    20_000
}

fn default_render_max_wait_ms() -> u64 {
    20_000
}

fn default_pdf_font_path() -> PathBuf {
    PathBuf::from("NotoSans-Regular.ttf")
}

fn default_font_url() -> String {
    DEFAULT_FONT_URL.into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            headless: true,
            js_wait_secs: default_js_wait_secs(),
            summary_sentences: default_summary_sentences(),
            paraphrase: true,
            ignore_ssl: false,
            max_images: default_max_images(),
            stealth_enabled: true,
            render_enabled: true,
            request_timeout_ms: default_request_timeout_ms(),
            stealth_timeout_ms: default_stealth_timeout_ms(),
            image_timeout_ms: default_image_timeout_ms(),
            render_max_wait_ms: default_render_max_wait_ms(),
            pdf_font_path: default_pdf_font_path(),
            font_url: default_font_url(),
            fetch_font: true,
        }
    }
}

impl AppConfig {
    /// Plain HTTP tier timeout as Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Browser-mimicking tier timeout as Duration.
    pub fn stealth_timeout(&self) -> Duration {
        Duration::from_millis(self.stealth_timeout_ms)
    }

    /// Per-image timeout as Duration.
    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }

    /// Body-presence wait bound as Duration.
    pub fn render_max_wait(&self) -> Duration {
        Duration::from_millis(self.render_max_wait_ms)
    }

    /// Post-load rendering delay as Duration.
    pub fn js_wait(&self) -> Duration {
        Duration::from_secs(self.js_wait_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `PAGESIFT_`
    /// 2. TOML file from `PAGESIFT_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PAGESIFT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PAGESIFT_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
