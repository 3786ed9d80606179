//! Analysis pipeline: sanitize → extract skills → score → recommend → optional summary.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::llm_client::LlmError;
use crate::matching::extractor::{extract_skills, sanitize_resume_text};
use crate::matching::recommendations::{generate_recommendations, Recommendation};
use crate::matching::scoring::{score_match, MatchResult};
use crate::matching::summary::SummaryService;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub role_title: Option<String>,
}

/// A recommendation labelled with the missing skill it addresses.
#[derive(Debug, Clone, Serialize)]
pub struct SkillRecommendation {
    pub skill: String,
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub role_title: Option<String>,
    pub extracted_skills: Vec<String>,
    #[serde(flatten)]
    pub result: MatchResult,
    pub recommendations: Vec<SkillRecommendation>,
    /// Empty when no summary could be produced.
    pub ai_summary: String,
}

#[derive(Debug, Clone)]
pub struct AnalysisLimits {
    pub max_recommendations: usize,
    pub summary_timeout: Duration,
}

/// Recommendations for the first `limit` missing skills, in order.
pub fn recommend_for_missing(missing: &[String], limit: usize) -> Vec<SkillRecommendation> {
    missing
        .iter()
        .take(limit)
        .map(|skill| SkillRecommendation {
            skill: skill.clone(),
            recommendation: generate_recommendations(skill),
        })
        .collect()
}

pub async fn analyze_resume(
    request: &AnalyzeRequest,
    summarizer: &dyn SummaryService,
    limits: &AnalysisLimits,
) -> AnalysisReport {
    let resume_text = sanitize_resume_text(&request.resume_text);
    let extracted_skills = extract_skills(&resume_text);
    let result = score_match(&extracted_skills, &request.required_skills);
    let recommendations = recommend_for_missing(&result.missing_skills, limits.max_recommendations);

    info!(
        "Analysis: {} skills extracted, {}/{} required matched ({}%)",
        extracted_skills.len(),
        result.matching_skills.len(),
        request.required_skills.len(),
        result.match_percentage
    );

    let ai_summary = summarize_or_empty(
        summarizer,
        request.role_title.as_deref(),
        &result,
        limits.summary_timeout,
    )
    .await;

    AnalysisReport {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        role_title: request.role_title.clone(),
        extracted_skills,
        result,
        recommendations,
        ai_summary,
    }
}

async fn summarize_or_empty(
    summarizer: &dyn SummaryService,
    role_title: Option<&str>,
    result: &MatchResult,
    timeout: Duration,
) -> String {
    match tokio::time::timeout(timeout, summarizer.summarize(role_title, result)).await {
        Ok(Ok(summary)) => summary,
        Ok(Err(LlmError::Disabled)) => {
            debug!("AI summary disabled");
            String::new()
        }
        Ok(Err(e)) => {
            warn!("AI summary failed: {e}");
            String::new()
        }
        Err(_) => {
            warn!("AI summary timed out after {}s", timeout.as_secs());
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::matching::summary::NoopSummary;

    struct CannedSummary(&'static str);

    #[async_trait]
    impl SummaryService for CannedSummary {
        async fn summarize(
            &self,
            _role_title: Option<&str>,
            _result: &MatchResult,
        ) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSummary;

    #[async_trait]
    impl SummaryService for FailingSummary {
        async fn summarize(
            &self,
            _role_title: Option<&str>,
            _result: &MatchResult,
        ) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            })
        }
    }

    fn limits() -> AnalysisLimits {
        AnalysisLimits {
            max_recommendations: 10,
            summary_timeout: Duration::from_secs(5),
        }
    }

    fn request(text: &str, required: &[&str]) -> AnalyzeRequest {
        AnalyzeRequest {
            resume_text: text.to_string(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            role_title: Some("Full Stack Developer".to_string()),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let req = request(
            "Experienced Python developer skilled in React and Docker",
            &["python", "react", "kubernetes", "sql"],
        );
        let report = analyze_resume(&req, &NoopSummary, &limits()).await;

        assert_eq!(report.extracted_skills, vec!["docker", "python", "react"]);
        assert_eq!(report.result.matching_skills, vec!["python", "react"]);
        assert_eq!(report.result.missing_skills, vec!["kubernetes", "sql"]);
        assert_eq!(report.result.match_percentage, 50.0);
        assert_eq!(report.recommendations.len(), 2);
        assert_eq!(report.recommendations[0].skill, "kubernetes");
        assert_eq!(report.ai_summary, "");
    }

    #[tokio::test]
    async fn test_empty_resume_misses_everything() {
        let req = request("", &["Python", "SQL"]);
        let report = analyze_resume(&req, &NoopSummary, &limits()).await;
        assert!(report.extracted_skills.is_empty());
        assert_eq!(report.result.match_percentage, 0.0);
        assert_eq!(report.result.missing_skills, vec!["Python", "SQL"]);
    }

    #[tokio::test]
    async fn test_summary_is_included_when_available() {
        let req = request("rust and go engineer", &["rust"]);
        let report = analyze_resume(&req, &CannedSummary("Great fit."), &limits()).await;
        assert_eq!(report.ai_summary, "Great fit.");
    }

    #[tokio::test]
    async fn test_summary_failure_is_fail_open() {
        let req = request("rust and go engineer", &["rust", "java"]);
        let report = analyze_resume(&req, &FailingSummary, &limits()).await;
        assert_eq!(report.ai_summary, "");
        assert_eq!(report.result.match_percentage, 50.0);
    }

    #[test]
    fn test_recommendations_are_capped() {
        let missing: Vec<String> = (0..15).map(|i| format!("skill{i}")).collect();
        let recs = recommend_for_missing(&missing, 10);
        assert_eq!(recs.len(), 10);
        assert_eq!(recs[9].skill, "skill9");
    }

    #[tokio::test]
    async fn test_report_serializes_flat_camel_case() {
        let req = request("python developer", &["python", "haskell"]);
        let report = analyze_resume(&req, &NoopSummary, &limits()).await;
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["matchPercentage"], 50.0);
        assert_eq!(json["missingSkills"][0], "haskell");
        assert_eq!(json["extractedSkills"][0], "python");
        assert_eq!(json["roleTitle"], "Full Stack Developer");
        let rec = &json["recommendations"][0];
        assert_eq!(rec["skill"], "haskell");
        assert_eq!(rec["courses"].as_array().unwrap().len(), 2);
        assert_eq!(rec["roadmap"]["month1"], "Learn fundamentals of haskell");
    }
}
