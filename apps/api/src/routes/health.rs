use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, the active scoring tables version, and
/// whether the AI scoring path is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cvcoach-api",
        "scoringTablesVersion": state.lexicon.version(),
        "aiEnabled": state.ai.is_some()
    }))
}
