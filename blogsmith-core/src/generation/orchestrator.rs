//! Generation orchestrator
//!
//! Sends prompts through the model fallback chain, one model at a time, and
//! post-processes the result. A critical maximum is enforced by trimming.

use super::prompts::ContentPrompts;
use super::trim::trim_to_word_limit;
use crate::config::ApiConfig;
use crate::instructions::Workflow;
use crate::llm::{LLMError, LLMResult, TextGenerator};
use crate::seo::Suggestion;
use crate::seo::metrics::word_count;
use chrono::{DateTime, Utc};
use regex_utils::json::CODE_FENCE;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A generated post body; superseded, never mutated, by a rewrite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDraft {
    pub body: String,
    pub topic: String,
    pub generated_at: DateTime<Utc>,
    pub model_used: String,
    pub word_count: usize,
}

impl ContentDraft {
    fn new(body: String, topic: &str, model_used: String) -> Self {
        Self {
            word_count: word_count(&body),
            body,
            topic: topic.to_string(),
            generated_at: Utc::now(),
            model_used,
        }
    }
}

/// Output of one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub draft: ContentDraft,
    /// Whether a critical maximum forced a mechanical trim
    pub trimmed: bool,
    /// Word count as delivered by the model
    pub original_word_count: usize,
}

pub struct ContentGenerator {
    generator: Arc<dyn TextGenerator>,
    models: Vec<String>,
    retry_delay: Duration,
}

impl ContentGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, models: Vec<String>, retry_delay: Duration) -> Self {
        Self { generator, models, retry_delay }
    }

    /// Generation chain and retry delay taken from the API settings
    pub fn from_config(generator: Arc<dyn TextGenerator>, config: &ApiConfig) -> Self {
        Self::new(
            generator,
            config.generation_models.clone(),
            Duration::from_millis(config.retry_delay_ms),
        )
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generate a post for a parsed workflow
    pub async fn generate(&self, workflow: &Workflow) -> LLMResult<GeneratedContent> {
        let prompt = ContentPrompts::generation_prompt(workflow);
        debug!("Generation prompt is {} characters", prompt.len());

        let (text, model) = self.generate_with_fallback(&prompt).await?;
        let original_word_count = word_count(&text);

        let length = &workflow.length_constraints;
        let (body, trimmed) = match length.word_limit {
            Some(limit) if length.requires_trim() && original_word_count > limit as usize => {
                let (body, trimmed) = trim_to_word_limit(&text, limit);
                info!(
                    "Trimmed output from {} to {} words to honor the {}-word maximum",
                    original_word_count,
                    word_count(&body),
                    limit
                );
                (body, trimmed)
            }
            _ => (text, false),
        };

        Ok(GeneratedContent {
            draft: ContentDraft::new(body, &workflow.topic, model),
            trimmed,
            original_word_count,
        })
    }

    /// Rewrite an existing body against SEO suggestions
    pub async fn rewrite(
        &self,
        body: &str,
        primary_keyword: &str,
        suggestions: &[Suggestion],
        topic: &str,
    ) -> LLMResult<ContentDraft> {
        let prompt = ContentPrompts::rewrite_prompt(body, primary_keyword, suggestions);
        let (text, model) = self.generate_with_fallback(&prompt).await?;
        Ok(ContentDraft::new(text, topic, model))
    }

    /// Try each model in order, pausing between attempts.
    ///
    /// Returns the text and the model that produced it, or the last error
    /// once the chain is exhausted.
    async fn generate_with_fallback(&self, prompt: &str) -> LLMResult<(String, String)> {
        let mut last_error = None;

        for (attempt, model) in self.models.iter().enumerate() {
            if attempt > 0 {
                tokio::time::sleep(self.retry_delay).await;
            }

            debug!("Generating with {} (attempt {})", model, attempt + 1);
            match self.generator.generate(model, prompt).await {
                Ok(text) => {
                    info!("Content generated with {}", model);
                    return Ok((clean_output(&text), model.clone()));
                }
                Err(e) => {
                    warn!("Generation with {} failed ({}): {}", model, e.kind(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| LLMError::config("No generation models configured")))
    }
}

/// Drop a markdown fence wrapped around the whole answer
fn clean_output(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        CODE_FENCE.replace_all(trimmed, "").trim().to_string()
    } else {
        trimmed.to_string()
    }
}
