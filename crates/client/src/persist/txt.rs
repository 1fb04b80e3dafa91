//! Plain-text output.

use pagesift_core::Error;
use std::path::Path;

use super::SummaryDoc;

/// Text layout shared with the operator preview.
pub fn render_txt(doc: &SummaryDoc<'_>) -> String {
    format!("Title: {}\nURL: {}\n\nSummary:\n{}", doc.title, doc.url, doc.summary)
}

pub fn write_txt(doc: &SummaryDoc<'_>, path: &Path) -> Result<(), Error> {
    std::fs::write(path, render_txt(doc)).map_err(|e| Error::SaveFailed(format!("txt: {e}")))
}
