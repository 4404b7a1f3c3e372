//! AI-first scoring with a heuristic safety net.
//!
//! Every scoring endpoint asks the AI collaborator first and falls back to the
//! matching heuristic scorer on any failure. Both paths return the same result
//! shape, so the UI never needs to know which one ran beyond the `source` marker.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::{parse_json_response, Completion};

/// `model` value reported when the heuristic scorer produced the result.
pub const FALLBACK_MODEL: &str = "fallback";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Ai,
    Heuristic,
}

/// A scorer result plus provenance. The result's fields stay at the top level.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scored<T> {
    #[serde(flatten)]
    pub result: T,
    pub source: ScoreSource,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

impl<T> Scored<T> {
    pub fn ai(result: T, model: &str) -> Self {
        Self {
            result,
            source: ScoreSource::Ai,
            model: model.to_string(),
            generated_at: Utc::now(),
        }
    }

    pub fn heuristic(result: T) -> Self {
        Self {
            result,
            source: ScoreSource::Heuristic,
            model: FALLBACK_MODEL.to_string(),
            generated_at: Utc::now(),
        }
    }
}

/// Re-imposes the wire contract (score ranges, list caps, derived labels) on a
/// result that came from outside the heuristic scorers.
pub trait Normalize {
    fn normalize(self) -> Self;
}

/// Runs the AI path when a collaborator is configured, otherwise (or on any
/// failure or timeout) runs `fallback`.
pub async fn score_with_fallback<T, F>(
    ai: Option<&dyn Completion>,
    timeout: Duration,
    prompt: &str,
    system: &str,
    fallback: F,
) -> Scored<T>
where
    T: DeserializeOwned + Normalize,
    F: FnOnce() -> T,
{
    if let Some(ai) = ai {
        match tokio::time::timeout(timeout, ai.complete(prompt, system)).await {
            Ok(Ok(text)) => match parse_json_response::<T>(&text) {
                Ok(result) => {
                    debug!("AI scoring succeeded (model: {})", ai.model());
                    return Scored::ai(result.normalize(), ai.model());
                }
                Err(e) => warn!("AI response did not match the result schema, using heuristic scorer: {e}"),
            },
            Ok(Err(e)) => warn!("AI scoring failed, using heuristic scorer: {e}"),
            Err(_) => warn!(
                "AI scoring timed out after {}s, using heuristic scorer",
                timeout.as_secs()
            ),
        }
    } else {
        debug!("No AI backend configured, using heuristic scorer");
    }

    Scored::heuristic(fallback())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{CannedCompletion, FailingCompletion, StalledCompletion};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        score: u32,
    }

    impl Normalize for Sample {
        fn normalize(self) -> Self {
            Sample {
                score: self.score.min(100),
            }
        }
    }

    fn heuristic_sample() -> Sample {
        Sample { score: 7 }
    }

    #[tokio::test]
    async fn test_no_backend_uses_heuristic() {
        let scored = score_with_fallback(None, Duration::from_secs(1), "p", "s", heuristic_sample).await;
        assert_eq!(scored.source, ScoreSource::Heuristic);
        assert_eq!(scored.model, FALLBACK_MODEL);
        assert_eq!(scored.result.score, 7);
    }

    #[tokio::test]
    async fn test_successful_ai_result_is_normalized() {
        let ai = CannedCompletion::new(r#"```json
{"score": 250}
```"#);
        let scored =
            score_with_fallback(Some(&ai), Duration::from_secs(1), "p", "s", heuristic_sample).await;
        assert_eq!(scored.source, ScoreSource::Ai);
        assert_eq!(scored.model, ai.model());
        assert_eq!(scored.result.score, 100);
    }

    #[tokio::test]
    async fn test_ai_error_falls_back() {
        let scored = score_with_fallback(
            Some(&FailingCompletion),
            Duration::from_secs(1),
            "p",
            "s",
            heuristic_sample,
        )
        .await;
        assert_eq!(scored.source, ScoreSource::Heuristic);
        assert_eq!(scored.result, heuristic_sample());
    }

    #[tokio::test]
    async fn test_malformed_ai_json_falls_back() {
        let ai = CannedCompletion::new("I cannot score this CV, sorry.");
        let scored =
            score_with_fallback(Some(&ai), Duration::from_secs(1), "p", "s", heuristic_sample).await;
        assert_eq!(scored.source, ScoreSource::Heuristic);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ai_timeout_falls_back() {
        let scored = score_with_fallback(
            Some(&StalledCompletion),
            Duration::from_secs(5),
            "p",
            "s",
            heuristic_sample,
        )
        .await;
        assert_eq!(scored.source, ScoreSource::Heuristic);
    }

    #[test]
    fn test_envelope_flattens_result_fields() {
        let value = serde_json::to_value(Scored::heuristic(Sample { score: 3 })).unwrap();
        assert_eq!(value["score"], 3);
        assert_eq!(value["source"], "heuristic");
        assert_eq!(value["model"], "fallback");
        assert!(value["generatedAt"].is_string());
    }
}
