pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::cv::handlers as cv;
use crate::errors::AppError;
use crate::interview::handlers as interview;
use crate::state::AppState;

/// Room for multipart boundaries and the `jobDescription` field on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // CV analysis (raw text or uploaded document)
        .route("/api/v1/cv/analyze", post(analysis::handle_analyze))
        .route(
            "/api/v1/cv/analyze/upload",
            post(analysis::handle_analyze_upload),
        )
        // CV quality (structured blocks)
        .route("/api/v1/cv/score", post(cv::handle_score))
        // Interview
        .route(
            "/api/v1/interview/evaluate",
            post(interview::handle_evaluate),
        )
        .route(
            "/api/v1/interview/summary",
            post(interview::handle_summary),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
