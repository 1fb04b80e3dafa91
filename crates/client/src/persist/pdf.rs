//! PDF output with an optional Unicode TTF font.
//!
//! Devanagari needs an embedded font. When the configured TTF is missing the
//! writer falls back to built-in Helvetica, which only covers Latin text.

use pagesift_core::Error;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use super::SummaryDoc;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const FONT_SIZE: f32 = 12.0;
const WRAP_CHARS: usize = 85;
const FONT_TIMEOUT: Duration = Duration::from_secs(20);

/// Greedy word wrap on character count. Words longer than `width` get their own line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        let mut line = String::new();
        for word in raw.split_whitespace() {
            let needed = if line.is_empty() { word.chars().count() } else { line.chars().count() + 1 + word.chars().count() };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines
}

fn pdf_err(e: impl std::fmt::Display) -> Error {
    Error::SaveFailed(format!("pdf: {e}"))
}

fn load_font(doc: &PdfDocumentReference, font_path: &Path) -> Result<IndirectFontRef, Error> {
    if font_path.is_file() {
        match File::open(font_path).map_err(pdf_err).and_then(|f| doc.add_external_font(f).map_err(pdf_err)) {
            Ok(font) => return Ok(font),
            Err(e) => tracing::warn!("font {} unusable, using Helvetica: {e}", font_path.display()),
        }
    }
    doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)
}

/// Lay out title, URL, and summary on A4 pages, blank line between each.
pub fn write_pdf(doc: &SummaryDoc<'_>, path: &Path, font_path: &Path) -> Result<(), Error> {
    let title = if doc.title.is_empty() { "Summary" } else { doc.title };
    let (pdf, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = load_font(&pdf, font_path)?;

    let mut lines = wrap_text(title, WRAP_CHARS);
    lines.push(String::new());
    lines.extend(wrap_text(&format!("URL: {}", doc.url), WRAP_CHARS));
    lines.push(String::new());
    lines.extend(wrap_text(doc.summary, WRAP_CHARS));

    let top = PAGE_HEIGHT.0 - MARGIN_MM;
    let mut current = pdf.get_page(page).get_layer(layer);
    let mut y = top;

    for line in &lines {
        if y < MARGIN_MM {
            let (next_page, next_layer) = pdf.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            current = pdf.get_page(next_page).get_layer(next_layer);
            y = top;
        }
        if !line.is_empty() {
            current.use_text(line.as_str(), FONT_SIZE, Mm(MARGIN_MM), Mm(y), &font);
        }
        y -= LINE_HEIGHT_MM;
    }

    let file = File::create(path).map_err(pdf_err)?;
    pdf.save(&mut BufWriter::new(file)).map_err(pdf_err)
}

/// Make sure the Unicode font exists locally, downloading it once if needed.
///
/// Best effort: returns false when the font is still missing.
pub async fn ensure_unicode_font(path: &Path, url: &str) -> bool {
    if path.is_file() {
        return true;
    }

    match download_font(path, url).await {
        Ok(()) => {
            tracing::info!("downloaded font to {}", path.display());
            true
        }
        Err(e) => {
            tracing::warn!("font download failed, PDFs may not render Devanagari: {e}");
            false
        }
    }
}

async fn download_font(path: &Path, url: &str) -> Result<(), Error> {
    let client = reqwest::Client::builder()
        .timeout(FONT_TIMEOUT)
        .build()
        .map_err(|e| Error::HttpError(e.to_string()))?;

    let response = client.get(url).send().await.map_err(|e| crate::fetch::transport_error(&e))?;
    if !response.status().is_success() {
        return Err(Error::HttpError(format!("status {}", response.status().as_u16())));
    }
    let bytes = response.bytes().await.map_err(|e| crate::fetch::transport_error(&e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_width() {
        let text = "word ".repeat(60);
        let lines = wrap_text(&text, 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
    }

    #[test]
    fn test_wrap_text_keeps_long_word() {
        let lines = wrap_text("short averyveryverylongword end", 10);
        assert_eq!(lines, vec!["short", "averyveryverylongword", "end"]);
    }

    #[test]
    fn test_wrap_text_preserves_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_write_pdf_paginates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.pdf");
        let summary = "A sentence that is long enough to wrap a little. ".repeat(200);
        let doc = SummaryDoc { title: "Long", url: "https://x.com", summary: &summary };

        write_pdf(&doc, &path, &dir.path().join("missing.ttf")).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_ensure_font_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        std::fs::write(&path, b"stub").unwrap();
        assert!(ensure_unicode_font(&path, "http://127.0.0.1:1/unused").await);
    }

    #[tokio::test]
    async fn test_ensure_font_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        assert!(!ensure_unicode_font(&path, "http://127.0.0.1:1/font.ttf").await);
        assert!(!path.exists());
    }
}
