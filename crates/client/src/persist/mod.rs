//! Output folder creation and document writing.
//!
//! The same title, URL, and summary go into a plain-text file, a DOCX
//! document, and a PDF. A failure in any writer fails the whole set.

pub mod docx;
pub mod pdf;
pub mod txt;

use pagesift_core::output::folder::MAX_FOLDER_LEN;
use pagesift_core::{AppConfig, DocumentPaths, Error, output::fallback_folder, short_safe_folder};
use std::path::{Path, PathBuf};

pub use pdf::ensure_unicode_font;

/// Content written to every document.
#[derive(Debug, Clone, Copy)]
pub struct SummaryDoc<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub summary: &'a str,
}

/// Writes run output below the configured root.
#[derive(Debug, Clone)]
pub struct Persister {
    output_root: PathBuf,
    pdf_font: PathBuf,
}

impl Persister {
    pub fn new(config: &AppConfig) -> Self {
        Self { output_root: config.output_root.clone(), pdf_font: config.pdf_font_path.clone() }
    }

    /// Create the folder for `title`, falling back to a hash-named folder.
    pub fn prepare_folder(&self, title: &str) -> Result<PathBuf, Error> {
        let folder = short_safe_folder(title, &self.output_root, MAX_FOLDER_LEN);
        match std::fs::create_dir_all(&folder) {
            Ok(()) => Ok(folder),
            Err(e) => {
                let fallback = fallback_folder(title, &self.output_root);
                tracing::warn!(error = %e, "cannot create {}, using {}", folder.display(), fallback.display());
                std::fs::create_dir_all(&fallback)?;
                Ok(fallback)
            }
        }
    }

    /// Write `summary_<stamp>.{docx,pdf,txt}` into `folder`.
    pub fn write_documents(&self, folder: &Path, doc: &SummaryDoc<'_>, stamp: &str) -> Result<DocumentPaths, Error> {
        let paths = DocumentPaths {
            docx: folder.join(format!("summary_{stamp}.docx")),
            pdf: folder.join(format!("summary_{stamp}.pdf")),
            txt: folder.join(format!("summary_{stamp}.txt")),
        };

        docx::write_docx(doc, &paths.docx)?;
        pdf::write_pdf(doc, &paths.pdf, &self.pdf_font)?;
        txt::write_txt(doc, &paths.txt)?;

        Ok(paths)
    }
}
