use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "screener",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
