//! Anthropic Messages API client behind the `Completion` trait.
//!
//! Scorers never talk to the API directly; they hold an optional
//! `dyn Completion`, so the heuristic fallback can be exercised without a network.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
/// Model used for every AI scoring call.
pub const MODEL: &str = "claude-sonnet-4-5";
/// Scoring responses are small JSON objects.
const MAX_TOKENS: u32 = 2048;
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Rate limits, server errors and transport failures are worth another attempt.
    fn is_transient(&self) -> bool {
        match self {
            LlmError::Http(_) => true,
            LlmError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            _ => false,
        }
    }
}

/// An AI-completion collaborator: prompt in, raw text out.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Model name reported in responses produced by this backend.
    fn model(&self) -> &str;

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserTurn<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentPart>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenUsage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    /// First text part; tool-use and other parts are skipped.
    fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|part| part.kind == "text")
            .and_then(|part| part.text)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Delay before retry `attempt` (1-based): 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS << attempt.saturating_sub(1).min(16))
}

async fn api_error(response: Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
}

impl LlmClient {
    /// `request_timeout` bounds each HTTP attempt; the caller bounds the whole call.
    pub fn new(api_key: String, request_timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            http: Client::builder().timeout(request_timeout).build()?,
            api_key,
        })
    }

    async fn send_once(&self, body: &MessagesRequest<'_>) -> Result<MessagesResponse, LlmError> {
        let response = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Sends one prompt, retrying transient failures with exponential backoff.
    async fn send(&self, prompt: &str, system: &str) -> Result<MessagesResponse, LlmError> {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: [UserTurn {
                role: "user",
                content: prompt,
            }],
        };

        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_transient() => {
                    attempt += 1;
                    if attempt >= MAX_RETRIES {
                        warn!("LLM call gave up after {attempt} attempts: {err}");
                        return Err(match err {
                            LlmError::Api { status: 429, .. } => {
                                LlmError::RateLimited { retries: attempt }
                            }
                            other => other,
                        });
                    }
                    let delay = backoff_delay(attempt);
                    warn!(
                        "LLM call attempt {attempt} failed ({err}), retrying in {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl Completion for LlmClient {
    fn model(&self) -> &str {
        MODEL
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.send(prompt, system).await?;
        if let Some(usage) = &response.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "LLM call succeeded"
            );
        }
        response
            .into_text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Deserializes a model's text response as JSON, tolerating markdown code fences.
pub fn parse_json_response<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Removes a surrounding ```json / ``` fence, if any.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = ["```json", "```"]
        .iter()
        .find_map(|fence| text.strip_prefix(fence))
    else {
        return text;
    };
    let body = body.trim_start();
    body.strip_suffix("```").unwrap_or(body).trim()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_json_response_empty_is_empty_content() {
        let err = parse_json_response::<serde_json::Value>("   ").unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[test]
    fn test_parse_json_response_rejects_prose() {
        let err = parse_json_response::<serde_json::Value>("Sure! Here is the analysis.").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        assert_eq!(strip_json_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_response_text_picks_first_text_part() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use"},{"type":"text","text":"{}"}],
                "usage":{"input_tokens":1,"output_tokens":2}}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("{}"));
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn test_only_rate_limits_and_server_errors_are_transient() {
        let api = |status| LlmError::Api {
            status,
            message: String::new(),
        };
        assert!(api(429).is_transient());
        assert!(api(503).is_transient());
        assert!(!api(401).is_transient());
        assert!(!LlmError::EmptyContent.is_transient());
    }
}
