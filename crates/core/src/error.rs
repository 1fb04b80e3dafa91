//! Unified error types for pagesift.
//!
//! Every stage of the pipeline reports failures through [`Error`]; the pipeline
//! folds them into a [`crate::RunStatus`] before anything reaches the operator.

/// Unified error types for the pagesift pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response or transport failure in one fetch tier.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Every applicable fetch tier failed.
    #[error("FETCH_FAILED: {0}")]
    FetchFailed(String),

    /// Render mode is disabled.
    #[error("RENDER_DISABLED")]
    RenderDisabled,

    /// Render failed.
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(String),

    /// A single image could not be downloaded or validated.
    #[error("IMAGE_FAILED: {0}")]
    ImageFailed(String),

    /// Writing one of the output documents failed.
    #[error("SAVE_FAILED: {0}")]
    SaveFailed(String),

    /// Filesystem error.
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Message without the error-code prefix, used for operator-facing status strings.
    pub fn detail(&self) -> String {
        match self {
            Error::InvalidUrl(msg)
            | Error::HttpError(msg)
            | Error::FetchTimeout(msg)
            | Error::FetchFailed(msg)
            | Error::RenderFailed(msg)
            | Error::ImageFailed(msg)
            | Error::SaveFailed(msg) => msg.clone(),
            Error::RenderDisabled => "render mode is disabled".to_string(),
            Error::Io(e) => e.to_string(),
        }
    }
}
