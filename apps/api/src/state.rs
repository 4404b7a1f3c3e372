use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::llm_client::{Completion, LlmClient};
use crate::scoring::{JitterMode, Lexicon, ScoringTables};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// AI-completion collaborator. `None` → every request takes the heuristic path.
    pub ai: Option<Arc<dyn Completion>>,
    /// Compiled scoring vocabulary, shared read-only across requests.
    pub lexicon: Arc<Lexicon>,
    pub jitter: JitterMode,
    pub config: Config,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let tables = match &config.scoring_tables_path {
            Some(path) => ScoringTables::from_json_file(path)?,
            None => ScoringTables::default(),
        };
        let lexicon = Lexicon::compile(&tables)
            .with_context(|| format!("Scoring tables version {} do not compile", tables.version))?;
        info!("Scoring tables loaded (version: {})", lexicon.version());

        let ai: Option<Arc<dyn Completion>> = match &config.anthropic_api_key {
            Some(key) => {
                let client = LlmClient::new(key.clone(), Duration::from_secs(config.ai_timeout_secs))
                    .context("Failed to build LLM client")?;
                info!("AI scoring enabled (model: {})", client.model());
                Some(Arc::new(client))
            }
            None => {
                info!("ANTHROPIC_API_KEY not set; heuristic scoring only");
                None
            }
        };

        Ok(Self {
            ai,
            lexicon: Arc::new(lexicon),
            jitter: JitterMode::from_seed(config.scoring_seed),
            config,
        })
    }

    pub fn ai(&self) -> Option<&dyn Completion> {
        self.ai.as_deref()
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.config.ai_timeout_secs)
    }
}

#[cfg(test)]
impl AppState {
    /// Heuristic-only state with a fixed jitter seed.
    pub fn for_tests(ai: Option<Arc<dyn Completion>>) -> Self {
        Self {
            ai,
            lexicon: Arc::new(crate::scoring::lexicon::DEFAULT_LEXICON.clone()),
            jitter: JitterMode::Seeded(7),
            config: Config {
                max_upload_bytes: 64 * 1024,
                ..Config::default()
            },
        }
    }
}
