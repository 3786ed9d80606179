use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-/]+").expect("valid separator regex"));

/// Result of comparing extracted skills against a role's required skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// 0 – 100, two decimals
    pub match_percentage: f64,
    /// 0.0 – 1.0, four decimals
    pub similarity_score: f64,
}

/// Lower-cases and collapses whitespace, hyphen and slash runs into a single space.
/// Dots are kept, so `node.js` and `node js` stay distinct.
pub fn normalize_skill_name(skill: &str) -> String {
    SEPARATOR_RUN
        .replace_all(&skill.to_lowercase(), " ")
        .trim()
        .to_string()
}

fn normalized_set(skills: &[String]) -> BTreeSet<String> {
    skills.iter().map(|s| normalize_skill_name(s)).collect()
}

/// Scores `extracted` against `required` by normalized name.
pub fn score_match(extracted: &[String], required: &[String]) -> MatchResult {
    let normalized_extracted = normalized_set(extracted);
    let normalized_required = normalized_set(required);

    let matching_skills: Vec<String> = extracted
        .iter()
        .filter(|skill| normalized_required.contains(&normalize_skill_name(skill)))
        .cloned()
        .collect();

    let missing_skills: Vec<String> = required
        .iter()
        .filter(|skill| !normalized_extracted.contains(&normalize_skill_name(skill)))
        .cloned()
        .collect();

    let match_percentage = if required.is_empty() {
        0.0
    } else {
        round_to(
            100.0 * matching_skills.len() as f64 / required.len() as f64,
            2,
        )
    };

    let similarity_score = round_to(
        cosine_similarity(&normalized_extracted, &normalized_required),
        4,
    );

    MatchResult {
        matching_skills,
        missing_skills,
        match_percentage,
        similarity_score,
    }
}

/// Cosine similarity of two sets as binary vectors over their union.
/// Returns 0.0 when either set is empty.
pub fn cosine_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let mut dot = 0.0_f64;
    let mut mag_a = 0.0_f64;
    let mut mag_b = 0.0_f64;

    for dimension in a.union(b) {
        let x = if a.contains(dimension) { 1.0 } else { 0.0 };
        let y = if b.contains(dimension) { 1.0 } else { 0.0 };
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    (dot / (mag_a * mag_b).sqrt()).clamp(0.0, 1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
