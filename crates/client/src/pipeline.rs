//! Per-URL processing and the batch runner.
//!
//! A run goes fetch → extract → summarize → images → persist. Every outcome,
//! including failures, comes back as a [`RunReport`]; nothing here returns an
//! error to the caller.

use pagesift_core::output::timestamp_slug;
use pagesift_core::{AppConfig, Error, OutputBundle, RunReport, RunStatus};
use serde::Serialize;

use crate::extract::PageContent;
use crate::fetch::{FetchConfig, Fetcher, is_access_denied, parse_page_url, title_fallback};
use crate::images::{ImageConfig, ImageHarvester};
use crate::persist::{Persister, SummaryDoc};
use crate::text::{detect_language, paraphrase, summarize};

/// Outcome counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Reports for every URL of a batch, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub reports: Vec<RunReport>,
    pub summary: BatchSummary,
}

/// Split batch input into URLs: one per line, blank lines dropped.
pub fn batch_urls(input: &str) -> Vec<&str> {
    input.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
}

/// Everything needed to process a URL end to end.
pub struct Pipeline {
    config: AppConfig,
    fetcher: Fetcher,
    persister: Persister,
    images: ImageHarvester,
}

impl Pipeline {
    /// Pipeline with the standard fetch chain.
    pub fn new(config: AppConfig) -> Self {
        let fetcher = Fetcher::new(FetchConfig::from(&config));
        Self::with_fetcher(config, fetcher)
    }

    /// Pipeline over a caller-built fetch chain.
    pub fn with_fetcher(config: AppConfig, fetcher: Fetcher) -> Self {
        let persister = Persister::new(&config);
        let images = ImageHarvester::new(ImageConfig::from(&config));
        Self { config, fetcher, persister, images }
    }

    /// Process one operator-entered URL.
    pub async fn process(&self, raw_url: &str) -> RunReport {
        let raw = raw_url.trim();
        if raw.is_empty() {
            return RunReport::failed(raw, RunStatus::Empty);
        }

        let url = match parse_page_url(raw) {
            Ok(url) => url,
            Err(e) => return RunReport::failed(raw, RunStatus::FetchError(Error::from(e).detail())),
        };

        let fetched = match self.fetcher.fetch(&url).await {
            Ok(fetched) => fetched,
            Err(e) => return RunReport::failed(raw, RunStatus::FetchError(e.detail())),
        };
        tracing::info!(tier = %fetched.tier, bytes = fetched.html.len(), "fetched {raw}");

        let html = fetched.html;
        if html.is_empty() {
            return RunReport::failed(raw, RunStatus::NoHtml);
        }
        if is_access_denied(&html) {
            return RunReport::failed(raw, RunStatus::AccessDenied);
        }

        let page = PageContent::parse(&html);
        let text = page.body_text();
        if page.is_empty() {
            tracing::warn!("no paragraph text extracted from {raw}");
        }

        let lang = detect_language(&text);
        let mut summary = summarize(&text, self.config.summary_sentences, &lang);
        if self.config.paraphrase {
            summary = paraphrase(&summary, &lang);
        }
        tracing::debug!(%lang, chars = summary.chars().count(), "summary ready");

        let title = if page.title.is_empty() { title_fallback(raw) } else { page.title };

        let folder = match self.persister.prepare_folder(&title) {
            Ok(folder) => folder,
            Err(e) => return RunReport::failed(raw, RunStatus::SaveError(e.detail())),
        };

        let images = self.images.harvest(&html, &folder).await;

        let doc = SummaryDoc { title: &title, url: raw, summary: &summary };
        let documents = match self.persister.write_documents(&folder, &doc, &timestamp_slug()) {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!(error = %e, "writing documents failed for {raw}");
                return RunReport::failed(raw, RunStatus::SaveError(e.detail()));
            }
        };

        tracing::info!(images = images.len(), "saved into {}", folder.display());

        RunReport::ok(OutputBundle { url: raw.to_string(), title, folder, images, documents, summary })
    }

    /// Process each non-blank line of `input` in order, one URL at a time.
    pub async fn run_batch(&self, input: &str) -> BatchReport {
        let mut reports = Vec::new();
        let mut summary = BatchSummary::default();

        for raw in batch_urls(input) {
            let report = self.process(raw).await;
            summary.total += 1;
            if report.status.is_ok() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
            reports.push(report);
        }

        tracing::info!(total = summary.total, succeeded = summary.succeeded, failed = summary.failed, "batch finished");
        BatchReport { reports, summary }
    }
}
