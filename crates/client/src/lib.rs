//! Client code for pagesift.
//!
//! This crate provides the tiered fetch chain, content extraction, text
//! processing, image harvesting, and document output, tied together by
//! [`Pipeline`].

pub mod extract;
pub mod fetch;
pub mod images;
pub mod persist;
pub mod pipeline;
pub mod render;
pub mod text;

pub use extract::{PageContent, extract_text, extract_title};
pub use fetch::{FetchConfig, FetchResult, FetchStrategy, FetchTier, Fetcher};
pub use images::{ImageConfig, ImageHarvester};
pub use persist::{Persister, SummaryDoc, ensure_unicode_font};
pub use pipeline::{BatchReport, BatchSummary, Pipeline, batch_urls};
pub use render::{BrowserRender, RenderOptions};
pub use text::{detect_language, paraphrase, summarize};
