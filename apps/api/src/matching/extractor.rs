//! Skill extraction: finds canonical dictionary skills mentioned in free text.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::sanitize::sanitize_text;
use crate::matching::dictionary::SkillDictionary;

static LITERAL_UNICODE_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\u[0-9a-fA-F]{4}").expect("valid unicode escape regex"));

/// Cleans pasted or previously extracted resume text before matching.
/// Applies the extraction sanitize pass and blanks literal `\uXXXX` escapes
/// left behind by upstream JSON encoders.
pub fn sanitize_resume_text(raw: &str) -> String {
    let without_escapes = LITERAL_UNICODE_ESCAPE.replace_all(raw, " ");
    sanitize_text(&without_escapes)
}

/// Extracts canonical skill names from `text` using the process-wide dictionary.
/// Output is sorted and deduplicated.
pub fn extract_skills(text: &str) -> Vec<String> {
    extract_skills_with(SkillDictionary::global(), text)
}

pub fn extract_skills_with(dictionary: &SkillDictionary, text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return Vec::new();
    }

    let found: BTreeSet<&'static str> = dictionary
        .skills()
        .iter()
        .filter(|skill| skill.is_present_in(&lowered))
        .map(|skill| skill.name)
        .collect();

    found.into_iter().map(String::from).collect()
}
