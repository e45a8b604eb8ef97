//! Text-generation provider trait
//!
//! The external generative service is reduced to a single operation so the
//! orchestrator and the instruction parser can run against a deterministic
//! stub in tests.

use super::errors::LLMResult;
use async_trait::async_trait;

/// Common trait for all text-generation providers
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Generate text for `prompt` with the given model
    async fn generate(&self, model: &str, prompt: &str) -> LLMResult<String>;
}
