//! Axum route handlers for CV quality scoring.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::cv::blocks::CvBlock;
use crate::cv::prompts::{build_quality_prompt, CV_QUALITY_ROLE};
use crate::cv::quality::{calculate_cv_scores, CvScores};
use crate::errors::{ApiJson, AppError};
use crate::llm_client::prompts::system_prompt;
use crate::scoring::{score_with_fallback, Scored};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub blocks: Vec<CvBlock>,
}

/// POST /api/v1/cv/score
pub async fn handle_score(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScoreRequest>,
) -> Result<Json<Scored<CvScores>>, AppError> {
    let prompt = build_quality_prompt(&request.blocks).map_err(anyhow::Error::from)?;
    let system = system_prompt(CV_QUALITY_ROLE);

    let scored = score_with_fallback(state.ai(), state.ai_timeout(), &prompt, &system, || {
        calculate_cv_scores(&request.blocks, &state.lexicon)
    })
    .await;

    info!(
        "CV quality scored: blocks={} quality={} source={:?}",
        request.blocks.len(),
        scored.result.quality,
        scored.source
    );
    Ok(Json(scored))
}
