//! Optional prose summary of an analysis, produced by the chat endpoint.
//!
//! `AppState` carries an `Arc<dyn SummaryService>`; `NoopSummary` is used when no
//! AI endpoint is configured. Summary failures never fail an analysis.

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};
use crate::matching::prompts::{SUMMARY_MAX_TOKENS, SUMMARY_PROMPT, SUMMARY_SYSTEM};
use crate::matching::scoring::MatchResult;

#[async_trait]
pub trait SummaryService: Send + Sync {
    async fn summarize(
        &self,
        role_title: Option<&str>,
        result: &MatchResult,
    ) -> Result<String, LlmError>;
}

pub struct NoopSummary;

#[async_trait]
impl SummaryService for NoopSummary {
    async fn summarize(
        &self,
        _role_title: Option<&str>,
        _result: &MatchResult,
    ) -> Result<String, LlmError> {
        Err(LlmError::Disabled)
    }
}

pub struct LlmSummary {
    llm: LlmClient,
    model: String,
}

impl LlmSummary {
    pub fn new(llm: LlmClient, model: String) -> Self {
        Self { llm, model }
    }
}

#[async_trait]
impl SummaryService for LlmSummary {
    async fn summarize(
        &self,
        role_title: Option<&str>,
        result: &MatchResult,
    ) -> Result<String, LlmError> {
        let prompt = build_summary_prompt(role_title, result);
        self.llm
            .complete_text(&self.model, SUMMARY_SYSTEM, &prompt, SUMMARY_MAX_TOKENS)
            .await
    }
}

fn join_or_none(skills: &[String]) -> String {
    if skills.is_empty() {
        "none".to_string()
    } else {
        skills.join(", ")
    }
}

pub fn build_summary_prompt(role_title: Option<&str>, result: &MatchResult) -> String {
    SUMMARY_PROMPT
        .replace("{role}", role_title.unwrap_or("Unspecified role"))
        .replace("{match}", &format!("{:.1}", result.match_percentage))
        .replace("{have}", &join_or_none(&result.matching_skills))
        .replace("{missing}", &join_or_none(&result.missing_skills))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_lists_skills() {
        let result = MatchResult {
            matching_skills: vec!["python".to_string(), "react".to_string()],
            missing_skills: vec!["kubernetes".to_string()],
            match_percentage: 66.67,
            similarity_score: 0.5,
        };
        let prompt = build_summary_prompt(Some("Backend Engineer"), &result);
        assert_eq!(
            prompt,
            "Role: Backend Engineer\nMatch: 66.7%\nHave: python, react\nMissing: kubernetes"
        );
    }

    #[test]
    fn test_summary_prompt_handles_empty_lists() {
        let result = MatchResult {
            matching_skills: vec![],
            missing_skills: vec![],
            match_percentage: 0.0,
            similarity_score: 0.0,
        };
        let prompt = build_summary_prompt(None, &result);
        assert!(prompt.contains("Role: Unspecified role"));
        assert!(prompt.contains("Have: none"));
        assert!(prompt.contains("Missing: none"));
    }
}
