//! Axum route handlers for interview answer evaluation and session summaries.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::{ApiJson, AppError};
use crate::interview::evaluator::{evaluate_answer, AnswerEvaluation, AnswerRecord, Seniority};
use crate::interview::prompts::{build_evaluation_prompt, INTERVIEW_ROLE};
use crate::interview::summary::{summarize_session, AnsweredQuestion, SessionSummary};
use crate::llm_client::prompts::system_prompt;
use crate::scoring::{score_with_fallback, Scored};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[serde(flatten)]
    pub record: AnswerRecord,
    #[serde(default)]
    pub level: Seniority,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub evaluations: Vec<AnsweredQuestion>,
}

/// POST /api/v1/interview/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EvaluateRequest>,
) -> Result<Json<Scored<AnswerEvaluation>>, AppError> {
    let EvaluateRequest { record, level } = request;
    if record.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let prompt = build_evaluation_prompt(&record, level);
    let system = system_prompt(INTERVIEW_ROLE);

    let scored = score_with_fallback(state.ai(), state.ai_timeout(), &prompt, &system, || {
        let mut rng = state.jitter.rng();
        evaluate_answer(&record, level, &state.lexicon, &mut rng)
    })
    .await;

    info!(
        "Interview answer evaluated: category={} overall={} rating={:?} source={:?}",
        record.category, scored.result.overall_score, scored.result.rating, scored.source
    );
    Ok(Json(scored))
}

/// POST /api/v1/interview/summary
pub async fn handle_summary(
    ApiJson(request): ApiJson<SummaryRequest>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = summarize_session(&request.evaluations);
    info!(
        "Interview session summarized: answers={} average={}",
        summary.answered_count, summary.average_score
    );
    Ok(Json(summary))
}
