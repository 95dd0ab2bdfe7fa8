use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates::models::{CandidateRow, CandidateSummary, NewCandidate};
use crate::errors::AppError;
use crate::extraction::{allowed_extension, extract_text};
use crate::hr::export::{export_candidate, ExportFormat};
use crate::screening::pipeline::{screen_resume, ScreeningInput, ScreeningOutcome};
use crate::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub candidate_id: Uuid,
    pub filename: String,
    #[serde(flatten)]
    pub outcome: ScreeningOutcome,
}

#[derive(Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateSummary>,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// Parsed multipart body of an upload.
#[derive(Default)]
struct UploadForm {
    file: Option<(String, Bytes)>,
    job_description: Option<String>,
    company_values: Option<Vec<String>>,
    years_experience: Option<u32>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
                    form.file = Some((filename, data));
                }
                "job_description" | "company_values" | "years_experience" => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid field '{name}': {e}")))?;
                    form.set_text_field(&name, value)?;
                }
                _ => {}
            }
        }

        Ok(form)
    }

    fn set_text_field(&mut self, name: &str, value: String) -> Result<(), AppError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }
        match name {
            "job_description" => self.job_description = Some(value.to_string()),
            "company_values" => {
                let values: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
                    .collect();
                self.company_values = (!values.is_empty()).then_some(values);
            }
            "years_experience" => {
                let years = value.parse::<u32>().map_err(|_| {
                    AppError::Validation(format!("years_experience must be a whole number, got '{value}'"))
                })?;
                self.years_experience = Some(years);
            }
            _ => {}
        }
        Ok(())
    }
}

/// POST /api/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = UploadForm::read(multipart).await?;

    let (filename, data) = form
        .file
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    if filename.trim().is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    allowed_extension(&filename)?;

    let resume_text = {
        let filename = filename.clone();
        let data = data.clone();
        tokio::task::spawn_blocking(move || extract_text(&filename, &data))
            .await
            .map_err(|e| anyhow::anyhow!("Extraction task failed: {e}"))??
    };
    info!(filename = %filename, chars = resume_text.len(), "Extracted resume text");

    let outcome = screen_resume(
        ScreeningInput {
            resume_text: &resume_text,
            job_description: form.job_description.as_deref(),
            company_values: form.company_values.as_deref(),
            years_experience: form.years_experience,
        },
        state.analyzer.as_ref(),
        state.config.screening_settings(),
    )
    .await?;

    let archive_key = match state.archive.store(&filename, data).await {
        Ok(key) => Some(key),
        Err(e) => {
            warn!(filename = %filename, "Resume archiving failed: {e}");
            None
        }
    };

    let row = state
        .store
        .save(NewCandidate {
            filename: filename.clone(),
            resume_text,
            archive_key,
            analysis_result: outcome.analysis.clone(),
            bias_analysis: outcome.bias_analysis.clone(),
            advanced_ranking: outcome.advanced_ranking.clone(),
            profile_links: outcome.profile_links.clone(),
            used_blind_text: outcome.used_blind_text,
        })
        .await?;

    info!(candidate_id = %row.id, "Candidate saved");
    Ok(Json(UploadResponse {
        success: true,
        candidate_id: row.id,
        filename,
        outcome,
    }))
}

/// GET /api/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let candidates = state.store.list().await?;
    Ok(Json(CandidateListResponse { candidates }))
}

/// GET /api/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    Ok(Json(find_candidate(&state, id).await?))
}

/// DELETE /api/candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let row = find_candidate(&state, id).await?;
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(format!("Candidate {id} not found")));
    }

    if let Some(key) = row.archive_key.as_deref() {
        if let Err(e) = state.archive.remove(key).await {
            warn!(candidate_id = %id, "Archived resume not removed: {e}");
        }
    }

    info!(candidate_id = %id, "Candidate deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/candidates/:id/export?format=json|csv
pub async fn handle_export_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };

    let row = find_candidate(&state, id).await?;
    let body = export_candidate(&row, format)?;
    let disposition = format!(
        "attachment; filename=\"candidate_{id}.{}\"",
        format.extension()
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

async fn find_candidate(state: &AppState, id: Uuid) -> Result<CandidateRow, AppError> {
    state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}
