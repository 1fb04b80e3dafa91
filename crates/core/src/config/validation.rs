//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn check_range(field: &str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Invalid { field: field.into(), reason: format!("must be between {min} and {max}") });
    }
    Ok(())
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `js_wait_secs` is outside 2..=12
    /// - `summary_sentences` is outside 1..=200
    /// - `max_images` is outside 1..=500
    /// - any timeout is below 100ms or above 5 minutes
    /// - `output_root` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("js_wait_secs", self.js_wait_secs, 2, 12)?;
        check_range("summary_sentences", self.summary_sentences as u64, 1, 200)?;
        check_range("max_images", self.max_images as u64, 1, 500)?;

        for (field, value) in [
            ("request_timeout_ms", self.request_timeout_ms),
            ("stealth_timeout_ms", self.stealth_timeout_ms),
            ("image_timeout_ms", self.image_timeout_ms),
            ("render_max_wait_ms", self.render_max_wait_ms),
        ] {
            check_range(field, value, 100, 300_000)?;
        }

        if self.output_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "output_root".into(), reason: "must not be empty".into() });
        }

        if self.ignore_ssl {
            tracing::warn!("TLS certificate verification is disabled for page and image requests");
        }

        if !self.stealth_enabled && !self.render_enabled {
            tracing::warn!("stealth and render tiers are both disabled; only plain HTTP will be tried");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_summary_sentences_zero() {
        let config = AppConfig { summary_sentences: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "summary_sentences"));
    }

    #[test]
    fn test_validate_max_images_exceeds_limit() {
        let config = AppConfig { max_images: 501, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_images"));
    }

    #[test]
    fn test_validate_js_wait_out_of_range() {
        let config = AppConfig { js_wait_secs: 1, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "js_wait_secs"));

        let config = AppConfig { js_wait_secs: 13, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "js_wait_secs"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { image_timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "image_timeout_ms"));
    }

    #[test]
    fn test_validate_empty_output_root() {
        let config = AppConfig { output_root: std::path::PathBuf::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "output_root"));
    }

    #[test]
    fn test_validate_edge_values() {
        let config = AppConfig {
            js_wait_secs: 12,
            summary_sentences: 200,
            max_images: 1,
            request_timeout_ms: 100,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
