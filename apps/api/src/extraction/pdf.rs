//! Heuristic PDF text recovery from uncompressed content streams.
//!
//! Bytes are decoded one byte per char so the `BT` / `ET` text-object markers stay
//! visible as ASCII. Only parenthesized string literals inside text objects are
//! considered, and each must pass the readability test on its own.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::extraction::sanitize::{is_readable_text, sanitize_text};

static TEXT_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)BT.*?ET").expect("valid text object regex"));

static STRING_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]*)\)").expect("valid string literal regex"));

/// Latin-1 decode: every byte maps to the code point of the same value.
fn decode_single_byte(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn unescape_literal(raw: &str) -> String {
    raw.replace("\\n", "\n")
        .replace("\\r", "")
        .replace("\\\\", "\\")
        .replace("\\(", "(")
        .replace("\\)", ")")
}

/// Returns readable text found in `BT … ET` regions, or an empty string.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    let decoded = decode_single_byte(bytes);

    let kept: Vec<String> = TEXT_OBJECT
        .find_iter(&decoded)
        .flat_map(|object| {
            STRING_LITERAL
                .captures_iter(object.as_str())
                .filter_map(|caps| caps.get(1).map(|m| unescape_literal(m.as_str())))
                .collect::<Vec<_>>()
        })
        .filter(|literal| !literal.trim().is_empty() && is_readable_text(literal))
        .collect();

    debug!("PDF heuristic kept {} string literals", kept.len());

    let result = sanitize_text(&kept.join(" "));
    if is_readable_text(&result) {
        result
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_readable_literals_from_text_objects() {
        let pdf = b"%PDF-1.4\n1 0 obj\n<< /Length 120 >>\nstream\n\
            BT /F1 12 Tf 72 712 Td (Jane Doe, Senior Python Developer) Tj ET\n\
            BT 72 690 Td (Skilled in React, Docker and SQL databases) Tj ET\n\
            endstream\nendobj\n%%EOF";
        let text = extract_pdf_text(pdf);
        assert_eq!(
            text,
            "Jane Doe, Senior Python Developer Skilled in React, Docker and SQL databases"
        );
    }

    #[test]
    fn test_short_literals_are_dropped() {
        let pdf = b"BT (Jane) Tj (Doe) Tj ET";
        assert_eq!(extract_pdf_text(pdf), "");
    }

    #[test]
    fn test_literals_outside_text_objects_are_ignored() {
        let pdf = b"(This string sits outside any text object) BT (Inside the text object we find this) Tj ET";
        assert_eq!(extract_pdf_text(pdf), "Inside the text object we find this");
    }

    #[test]
    fn test_unescape_sequences() {
        assert_eq!(unescape_literal(r"line one\nline two"), "line one\nline two");
        assert_eq!(unescape_literal(r"carriage\r return"), "carriage return");
        assert_eq!(unescape_literal(r"back\\slash"), "back\\slash");
        assert_eq!(unescape_literal(r"paren \( open"), "paren ( open");
    }

    #[test]
    fn test_newline_escape_becomes_space_after_sanitize() {
        let pdf = br"BT (Experienced engineer\nbuilding Rust services) Tj ET";
        assert_eq!(
            extract_pdf_text(pdf),
            "Experienced engineer building Rust services"
        );
    }

    #[test]
    fn test_random_binary_yields_empty_string() {
        let mut state: u32 = 0x9E37_79B9;
        let bytes: Vec<u8> = (0..4096)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state & 0xFF) as u8
            })
            .collect();
        assert_eq!(extract_pdf_text(&bytes), "");
    }

    #[test]
    fn test_high_bytes_decode_as_latin1() {
        assert_eq!(decode_single_byte(&[0x4A, 0xE9]), "Jé");
    }
}
