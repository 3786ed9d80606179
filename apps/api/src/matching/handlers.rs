//! Axum route handlers for skill analysis.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::matching::analysis::{analyze_resume, AnalysisReport, AnalyzeRequest};
use crate::matching::dictionary::SkillDictionary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SkillListResponse {
    pub skills: Vec<&'static str>,
    pub count: usize,
}

/// POST /api/v1/analyze
///
/// Extracts skills from resume text, scores them against the required skills and
/// returns the gap analysis with recommendations for the first missing skills.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resumeText is required".to_string()));
    }

    let report = analyze_resume(
        &request,
        state.summarizer.as_ref(),
        &state.config.analysis_limits(),
    )
    .await;

    Ok(Json(report))
}

/// GET /api/v1/skills
///
/// Canonical skill names known to the dictionary, sorted.
pub async fn handle_list_skills() -> Json<SkillListResponse> {
    let skills = SkillDictionary::global().names();
    let count = skills.len();
    Json(SkillListResponse { skills, count })
}
