use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::hr::client::{HrConnectionStatus, HrSendResult};
use crate::hr::{format_payload, HrCandidate, HrSystem};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SystemInfo {
    pub key: &'static str,
    pub name: &'static str,
}

#[derive(Serialize)]
pub struct SystemsResponse {
    pub systems: Vec<SystemInfo>,
}

#[derive(Deserialize)]
pub struct SendRequest {
    pub system: String,
    pub candidate_id: Uuid,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_url: String,
}

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub system: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_url: String,
}

/// GET /api/hr/systems
pub async fn handle_list_systems() -> Json<SystemsResponse> {
    let systems = HrSystem::ALL
        .into_iter()
        .map(|system| SystemInfo {
            key: system.key(),
            name: system.display_name(),
        })
        .collect();
    Json(SystemsResponse { systems })
}

/// POST /api/hr/send
///
/// An upstream rejection is reported in the body with `success: false`;
/// an unreachable system is a 502.
pub async fn handle_send_candidate(
    State(state): State<AppState>,
    Json(req): Json<SendRequest>,
) -> Result<Json<HrSendResult>, AppError> {
    let system: HrSystem = req.system.parse()?;

    let row = state
        .store
        .get(req.candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", req.candidate_id)))?;

    let candidate = HrCandidate::from_record(&row, state.config.address_redaction);
    let payload = format_payload(system, &candidate);

    let result = state
        .hr
        .send(system, &payload, &req.api_key, &req.api_url)
        .await?;

    if result.is_transport_failure() {
        return Err(AppError::Integration(format!(
            "Could not reach {}: {}",
            result.system,
            result.error.unwrap_or_default()
        )));
    }

    info!(
        candidate_id = %req.candidate_id,
        system = system.key(),
        success = result.success,
        "HR send completed"
    );
    Ok(Json(result))
}

/// POST /api/hr/validate
pub async fn handle_validate_connection(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<HrConnectionStatus>, AppError> {
    let system: HrSystem = req.system.parse()?;
    let status = state
        .hr
        .validate_connection(system, &req.api_key, &req.api_url)
        .await?;
    Ok(Json(status))
}
