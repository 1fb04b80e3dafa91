//! Human-readable result output.

use pagesift_client::BatchReport;
use pagesift_core::RunReport;

const PREVIEW_CHARS: usize = 300;

/// First `max` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

pub fn print_report(report: &RunReport) {
    println!("[{}] {}", report.status, report.url);

    let Some(bundle) = &report.bundle else { return };
    println!("  title:   {}", bundle.title);
    println!("  folder:  {}", bundle.folder.display());
    println!("  images:  {}", bundle.images.len());
    println!("  docx:    {}", bundle.documents.docx.display());
    println!("  pdf:     {}", bundle.documents.pdf.display());
    println!("  txt:     {}", bundle.documents.txt.display());
    if !bundle.summary.is_empty() {
        println!("  summary: {}", preview(&bundle.summary, PREVIEW_CHARS));
    }
}

pub fn print_batch(batch: &BatchReport) {
    for report in &batch.reports {
        print_report(report);
    }
    println!(
        "processed {}: {} succeeded, {} failed",
        batch.summary.total, batch.summary.succeeded, batch.summary.failed
    );
}
