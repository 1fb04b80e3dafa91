//! DOCX output.

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use pagesift_core::Error;
use std::fs::File;
use std::path::Path;

use super::SummaryDoc;

const HEADING_STYLE: &str = "Heading1";

/// Heading (title or "Summary"), URL line, then the summary paragraph.
pub fn write_docx(doc: &SummaryDoc<'_>, path: &Path) -> Result<(), Error> {
    let heading = if doc.title.is_empty() { "Summary" } else { doc.title };

    let file = File::create(path).map_err(|e| Error::SaveFailed(format!("docx: {e}")))?;

    Docx::new()
        .add_style(Style::new(HEADING_STYLE, StyleType::Paragraph).name("Heading 1").size(32).bold())
        .add_paragraph(Paragraph::new().style(HEADING_STYLE).add_run(Run::new().add_text(heading)))
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(format!("URL: {}", doc.url))))
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(doc.summary)))
        .build()
        .pack(file)
        .map_err(|e| Error::SaveFailed(format!("docx: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_docx_is_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.docx");
        let doc = SummaryDoc { title: "", url: "https://x.com", summary: "Body." };
        write_docx(&doc, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_write_docx_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let doc = SummaryDoc { title: "t", url: "u", summary: "s" };
        let result = write_docx(&doc, &dir.path().join("missing").join("x.docx"));
        assert!(matches!(result, Err(Error::SaveFailed(_))));
    }
}
