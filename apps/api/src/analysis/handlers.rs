//! Axum route handlers for CV analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::analysis::extract::{extract_text, max_extracted_bytes, DocumentKind};
use crate::analysis::fallback::{analyze_fallback, CvAnalysisResult};
use crate::analysis::prompts::{build_analysis_prompt, CV_ANALYSIS_ROLE};
use crate::errors::{ApiJson, AppError};
use crate::llm_client::prompts::system_prompt;
use crate::scoring::{score_with_fallback, Scored};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub cv_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// POST /api/v1/cv/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<Scored<CvAnalysisResult>>, AppError> {
    if request.cv_text.trim().is_empty() {
        return Err(AppError::Validation("cvText cannot be empty".to_string()));
    }

    let scored = run_analysis(&state, &request.cv_text, request.job_description.as_deref()).await;
    Ok(Json(scored))
}

/// POST /api/v1/cv/analyze/upload
///
/// Multipart: `file` (PDF, DOCX or TXT) and an optional `jobDescription` text field.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Scored<CvAnalysisResult>>, AppError> {
    let mut document: Option<(DocumentKind, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let kind = DocumentKind::detect(field.file_name(), field.content_type())?;
                let bytes = field.bytes().await?;
                if bytes.len() > state.config.max_upload_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "Upload exceeds {} bytes",
                        state.config.max_upload_bytes
                    )));
                }
                document = Some((kind, bytes));
            }
            Some("jobDescription") => job_description = Some(field.text().await?),
            _ => {}
        }
    }

    let (kind, bytes) = document
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    let max_text_bytes = max_extracted_bytes(state.config.max_upload_bytes);
    let cv_text = tokio::task::spawn_blocking(move || extract_text(kind, &bytes, max_text_bytes))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Document extraction aborted: {e}")))??;
    info!(
        "Extracted {} characters from uploaded {:?} document",
        cv_text.chars().count(),
        kind
    );

    let scored = run_analysis(&state, &cv_text, job_description.as_deref()).await;
    Ok(Json(scored))
}

async fn run_analysis(
    state: &AppState,
    cv_text: &str,
    job_description: Option<&str>,
) -> Scored<CvAnalysisResult> {
    let prompt = build_analysis_prompt(cv_text, job_description);
    let system = system_prompt(CV_ANALYSIS_ROLE);

    let scored = score_with_fallback(state.ai(), state.ai_timeout(), &prompt, &system, || {
        let mut rng = state.jitter.rng();
        analyze_fallback(cv_text, job_description, &state.lexicon, &mut rng)
    })
    .await;

    info!(
        "CV analysis complete: overall={} risk={:?} source={:?}",
        scored.result.overall_score, scored.result.filter_risk, scored.source
    );
    scored
}
