//! Word-processor markup: collects `<w:t>` text runs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::sanitize::sanitize_text;

static TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:t[^>]*>([^<]+)</w:t>").expect("valid text run regex"));

/// Joins the contents of every non-empty `<w:t …>` run with spaces and sanitizes the result.
pub fn extract_docx_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);

    let runs: Vec<&str> = TEXT_RUN
        .captures_iter(&decoded)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    sanitize_text(&runs.join(" "))
}
