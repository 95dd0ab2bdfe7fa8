pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::hr::handlers as hr;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/api/health", get(health::health_handler))
        // Candidates
        .route(
            "/api/upload",
            post(candidates::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/candidates", get(candidates::handle_list_candidates))
        .route(
            "/api/candidates/:id",
            get(candidates::handle_get_candidate).delete(candidates::handle_delete_candidate),
        )
        .route(
            "/api/candidates/:id/export",
            get(candidates::handle_export_candidate),
        )
        // Stateless analysis
        .route("/api/bias/analyze", post(screening::handle_bias_analyze))
        .route("/api/bias/blind", post(screening::handle_blind_resume))
        .route("/api/ranking", post(screening::handle_ranking))
        .route(
            "/api/profiles/enrich",
            post(screening::handle_profile_enrichment),
        )
        .route("/api/jd-match", post(screening::handle_jd_match))
        // HR integration
        .route("/api/hr/systems", get(hr::handle_list_systems))
        .route("/api/hr/send", post(hr::handle_send_candidate))
        .route("/api/hr/validate", post(hr::handle_validate_connection))
        .with_state(state)
}
