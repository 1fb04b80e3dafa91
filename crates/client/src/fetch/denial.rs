//! Hostile-response heuristics.

/// Whether HTML from an HTTP tier should be retried in the browser.
///
/// Matches "access denied" in any case or the literal "Request blocked".
pub fn looks_blocked(html: &str) -> bool {
    html.to_lowercase().contains("access denied") || html.contains("Request blocked")
}

/// Whether the final HTML is an access-denied page.
///
/// Both "access denied" and "reference" must appear, case-insensitively.
pub fn is_access_denied(html: &str) -> bool {
    let low = html.to_lowercase();
    low.contains("access denied") && low.contains("reference")
}
