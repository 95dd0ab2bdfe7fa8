use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::{match_job_description, JobMatch};
use crate::errors::AppError;
use crate::screening::bias::{analyze_bias, BiasReport};
use crate::screening::profiles::ProfileEnrichment;
use crate::screening::ranking::{analyze_advanced_ranking, AdvancedRanking, RankingOptions};
use crate::screening::redaction::{create_blind_version, RedactionResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ResumeTextRequest {
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Deserialize)]
pub struct RankingRequest {
    #[serde(default)]
    pub resume_text: String,
    pub job_description: Option<String>,
    pub company_values: Option<Vec<String>>,
    pub years_experience: Option<u32>,
}

#[derive(Deserialize)]
pub struct JobMatchRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resume_text: String,
}

fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

/// POST /api/bias/analyze
pub async fn handle_bias_analyze(
    Json(req): Json<ResumeTextRequest>,
) -> Result<Json<BiasReport>, AppError> {
    let text = require_text("resume_text", &req.resume_text)?;
    Ok(Json(analyze_bias(text)))
}

/// POST /api/bias/blind
pub async fn handle_blind_resume(
    State(state): State<AppState>,
    Json(req): Json<ResumeTextRequest>,
) -> Result<Json<RedactionResult>, AppError> {
    let text = require_text("resume_text", &req.resume_text)?;
    Ok(Json(create_blind_version(
        text,
        state.config.address_redaction,
    )))
}

/// POST /api/ranking
pub async fn handle_ranking(
    Json(req): Json<RankingRequest>,
) -> Result<Json<AdvancedRanking>, AppError> {
    let text = require_text("resume_text", &req.resume_text)?;
    let ranking = analyze_advanced_ranking(
        text,
        RankingOptions {
            job_description: req.job_description.as_deref(),
            company_values: req.company_values.as_deref(),
            years_experience: req.years_experience.unwrap_or(0),
        },
    );
    Ok(Json(ranking))
}

/// POST /api/profiles/enrich
pub async fn handle_profile_enrichment(
    State(state): State<AppState>,
    Json(req): Json<ResumeTextRequest>,
) -> Result<Json<ProfileEnrichment>, AppError> {
    let text = require_text("resume_text", &req.resume_text)?;
    Ok(Json(state.profiles.enrich(text).await))
}

/// POST /api/jd-match
pub async fn handle_jd_match(
    State(state): State<AppState>,
    Json(req): Json<JobMatchRequest>,
) -> Result<Json<JobMatch>, AppError> {
    let job_description = require_text("job_description", &req.job_description)?;
    let resume_text = require_text("resume_text", &req.resume_text)?;
    let result = match_job_description(state.llm.as_ref(), job_description, resume_text).await;
    Ok(Json(result))
}
