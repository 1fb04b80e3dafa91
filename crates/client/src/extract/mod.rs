//! Main-text and title extraction from raw HTML.
//!
//! ### Body text
//! - Text inside `script`, `style`, `noscript`, and `iframe` is ignored.
//! - The first `<main>` (or, when absent, the first `<article>`) is used if it
//!   holds at least one non-empty paragraph; otherwise every `<p>` in the page.
//! - Whitespace inside a paragraph collapses to single spaces; paragraphs are
//!   joined with a blank line.
//!
//! ### Title
//! - `<title>`, then `og:title`, else empty.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static MAIN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("main").expect("invalid selector"));
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").expect("invalid selector"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").expect("invalid selector"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("invalid selector"));
static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).expect("invalid selector"));

/// Tags whose text never counts as page content.
const NON_CONTENT: [&str; 4] = ["script", "style", "noscript", "iframe"];

/// Text content of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Page title, empty when the page has none.
    pub title: String,
    /// Non-empty paragraphs in document order.
    pub paragraphs: Vec<String>,
}

impl PageContent {
    /// Parse `html` once and pull out title and paragraphs.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self { title: title_of(&document), paragraphs: paragraphs_of(&document) }
    }

    /// Paragraphs joined with a blank line.
    pub fn body_text(&self) -> String {
        self.paragraphs.join("\n\n")
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Extract the main body text from `html`.
pub fn extract_text(html: &str) -> String {
    paragraphs_of(&Html::parse_document(html)).join("\n\n")
}

/// Extract the page title from `html`, or an empty string.
pub fn extract_title(html: &str) -> String {
    title_of(&Html::parse_document(html))
}

fn is_non_content(element: &ElementRef<'_>) -> bool {
    NON_CONTENT.contains(&element.value().name())
}

fn inside_non_content(element: &ElementRef<'_>) -> bool {
    element.ancestors().filter_map(ElementRef::wrap).any(|a| is_non_content(&a))
}

/// Text of `element` with every whitespace run collapsed to one space.
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .descendants()
        .filter(|node| {
            !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| is_non_content(&a))
        })
        .filter_map(|node| node.value().as_text())
        .flat_map(|text| text.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn paragraphs_in(root: &ElementRef<'_>) -> Vec<String> {
    root.select(&PARAGRAPH)
        .filter(|p| !inside_non_content(p))
        .map(|p| element_text(&p))
        .filter(|text| !text.is_empty())
        .collect()
}

fn paragraphs_of(document: &Html) -> Vec<String> {
    let region = document
        .select(&MAIN)
        .next()
        .or_else(|| document.select(&ARTICLE).next());

    if let Some(region) = region {
        let paragraphs = paragraphs_in(&region);
        if !paragraphs.is_empty() {
            return paragraphs;
        }
    }

    paragraphs_in(&document.root_element())
}

fn title_of(document: &Html) -> String {
    if let Some(title) = document.select(&TITLE).next() {
        let text = title.text().collect::<String>();
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }

    document
        .select(&OG_TITLE)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}
