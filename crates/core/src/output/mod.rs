//! Result records produced by one pipeline run.
//!
//! A [`RunReport`] is returned for every URL. It carries an [`OutputBundle`]
//! only when the status is [`RunStatus::Ok`].

pub mod folder;

pub use folder::{fallback_folder, hash_suffix, short_safe_folder, timestamp_slug};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Outcome of processing a single URL.
///
/// `Display` renders the operator-facing status string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum RunStatus {
    /// Documents written.
    Ok,
    /// Input URL was blank.
    Empty,
    /// Final fetch tier failed.
    FetchError(String),
    /// Fetch produced an empty document.
    NoHtml,
    /// Page matched the access-denied heuristic.
    AccessDenied,
    /// One of the document writes failed.
    SaveError(String),
}

impl RunStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, RunStatus::Ok)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Ok => write!(f, "ok"),
            RunStatus::Empty => write!(f, "empty"),
            RunStatus::FetchError(detail) => write!(f, "fetch_error:{detail}"),
            RunStatus::NoHtml => write!(f, "no_html"),
            RunStatus::AccessDenied => write!(f, "access_denied"),
            RunStatus::SaveError(detail) => write!(f, "save_error:{detail}"),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.to_string()
    }
}

/// Paths of the three generated documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPaths {
    pub docx: PathBuf,
    pub pdf: PathBuf,
    pub txt: PathBuf,
}

/// Final artifact of one successfully processed URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputBundle {
    /// Source URL as entered (trimmed).
    pub url: String,
    /// Extracted or substituted title.
    pub title: String,
    /// Folder holding documents and images.
    pub folder: PathBuf,
    /// Saved images in page order.
    pub images: Vec<PathBuf>,
    /// Generated documents.
    #[serde(flatten)]
    pub documents: DocumentPaths,
    /// Summary text written to every document.
    pub summary: String,
}

/// Per-URL report handed back to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub url: String,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<OutputBundle>,
}

impl RunReport {
    /// Report for a run that ended without output.
    pub fn failed(url: impl Into<String>, status: RunStatus) -> Self {
        Self { url: url.into(), status, bundle: None }
    }

    /// Report for a run that produced a bundle.
    pub fn ok(bundle: OutputBundle) -> Self {
        Self { url: bundle.url.clone(), status: RunStatus::Ok, bundle: Some(bundle) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(RunStatus::Ok.to_string(), "ok");
        assert_eq!(RunStatus::Empty.to_string(), "empty");
        assert_eq!(RunStatus::NoHtml.to_string(), "no_html");
        assert_eq!(RunStatus::AccessDenied.to_string(), "access_denied");
        assert_eq!(RunStatus::FetchError("timeout".into()).to_string(), "fetch_error:timeout");
        assert_eq!(RunStatus::SaveError("denied".into()).to_string(), "save_error:denied");
    }

    #[test]
    fn test_status_serializes_as_string() {
        let json = serde_json::to_string(&RunStatus::FetchError("x".into())).unwrap();
        assert_eq!(json, "\"fetch_error:x\"");
    }

    #[test]
    fn test_failed_report_has_no_bundle() {
        let report = RunReport::failed("https://example.com", RunStatus::AccessDenied);
        assert!(report.bundle.is_none());
        assert!(!report.status.is_ok());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("bundle").is_none());
        assert_eq!(json["status"], "access_denied");
    }

    #[test]
    fn test_ok_report_carries_url() {
        let bundle = OutputBundle {
            url: "https://example.com/a".into(),
            title: "A".into(),
            folder: PathBuf::from("out/A"),
            images: vec![],
            documents: DocumentPaths {
                docx: PathBuf::from("out/A/summary.docx"),
                pdf: PathBuf::from("out/A/summary.pdf"),
                txt: PathBuf::from("out/A/summary.txt"),
            },
            summary: "Text.".into(),
        };
        let report = RunReport::ok(bundle);
        assert!(report.status.is_ok());
        assert_eq!(report.url, "https://example.com/a");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["bundle"]["txt"], "out/A/summary.txt");
    }
}
