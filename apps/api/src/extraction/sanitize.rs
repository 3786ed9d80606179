//! Text hygiene shared by every extraction path: control-character stripping,
//! whitespace collapsing, and the readability heuristic that keeps binary
//! garbage away from the skill matcher.

/// Minimum length for a string to be considered readable.
pub const MIN_READABLE_CHARS: usize = 20;

/// Share of common printable characters a readable string must exceed.
pub const READABLE_RATIO: f64 = 0.7;

const COMMON_PUNCTUATION: &str = ",.;:!?@#$%&*()-_+='\"/";

fn is_stripped_control(c: char) -> bool {
    matches!(
        c,
        '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'..='\u{9F}'
    )
}

fn is_printable(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{7E}') || c >= '\u{A0}'
}

/// Removes control characters, blanks anything outside the printable range,
/// collapses whitespace runs to a single space and trims.
pub fn sanitize_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !is_stripped_control(*c))
        .map(|c| if is_printable(c) { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_common_printable(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || COMMON_PUNCTUATION.contains(c)
}

/// Rejects text shorter than `MIN_READABLE_CHARS`, otherwise requires more than
/// `READABLE_RATIO` of its characters to be letters, digits, whitespace or common punctuation.
pub fn is_readable_text(text: &str) -> bool {
    let total = text.chars().count();
    if total < MIN_READABLE_CHARS {
        return false;
    }
    let printable = text.chars().filter(|c| is_common_printable(*c)).count();
    printable as f64 / total as f64 > READABLE_RATIO
}

/// Truncates to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_controls_and_collapses_whitespace() {
        let input = "  Jane\u{0000} Doe\u{0008}\n\n\tSoftware\u{0085}   Engineer  ";
        assert_eq!(sanitize_text(input), "Jane Doe Software Engineer");
    }

    #[test]
    fn test_sanitize_keeps_latin1_and_unicode_letters() {
        assert_eq!(sanitize_text("José  Müller — Zürich"), "José Müller — Zürich");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_text(""), "");
        assert_eq!(sanitize_text("\u{0001}\u{0002}"), "");
    }

    #[test]
    fn test_short_text_is_not_readable() {
        assert!(!is_readable_text("Python developer"));
        assert!(!is_readable_text(""));
    }

    #[test]
    fn test_plain_prose_is_readable() {
        assert!(is_readable_text("Experienced Python developer skilled in React"));
    }

    #[test]
    fn test_symbol_soup_is_not_readable() {
        assert!(!is_readable_text("ÿØÿà\u{10}JFIF\u{1}\u{1}ÿÛC\u{8}\u{6}\u{6}~~~^^^|||{{{}}}"));
    }

    #[test]
    fn test_ratio_must_strictly_exceed_threshold() {
        // 14 readable of 20 = 0.7 exactly → rejected
        let text = format!("{}{}", "a".repeat(14), "~".repeat(6));
        assert!(!is_readable_text(&text));
        let text = format!("{}{}", "a".repeat(15), "~".repeat(5));
        assert!(is_readable_text(&text));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }
}
