//! Output folder naming.

use chrono::Local;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Longest folder name produced from a title.
pub const MAX_FOLDER_LEN: usize = 60;

/// First 8 hex characters of the SHA-256 of `text`.
pub fn hash_suffix(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    hex::encode(digest)[..8].to_string()
}

/// Local-time stamp used in folder and document names.
pub fn timestamp_slug() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Replace everything outside `[A-Za-z0-9_]` with `_`, collapse runs, trim the ends.
fn clean_title(title: &str) -> String {
    let mut clean = String::with_capacity(title.len());
    for c in title.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' };
        if c == '_' && clean.ends_with('_') {
            continue;
        }
        clean.push(c);
    }
    clean.trim_matches('_').to_string()
}

/// Derive the output folder for a title under `base_dir`.
///
/// Names longer than `max_len` are cut and suffixed with `_<8 hex>`; a title
/// with no usable characters falls back to `article_<timestamp>`.
pub fn short_safe_folder(title: &str, base_dir: &Path, max_len: usize) -> PathBuf {
    let title = if title.is_empty() { "article" } else { title };
    let clean = clean_title(title);

    let short = if clean.len() <= max_len {
        clean
    } else {
        // clean is pure ASCII, byte slicing is safe
        let prefix = clean[..max_len.saturating_sub(9)].trim_end_matches('_');
        format!("{prefix}_{}", hash_suffix(&clean))
    };

    let short = if short.is_empty() { format!("article_{}", timestamp_slug()) } else { short };

    base_dir.join(short)
}

/// Hash-named folder used when the title-derived folder cannot be created.
pub fn fallback_folder(title: &str, base_dir: &Path) -> PathBuf {
    base_dir.join(format!("article_{}", hash_suffix(title)))
}
