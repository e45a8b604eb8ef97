//! Mock generator for testing
//!
//! Scripted per-model responses and errors, with a call log. Only compiled
//! for unit tests.

#![cfg(test)]

use super::errors::{LLMError, LLMResult};
use super::provider::TextGenerator;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Deterministic stand-in for the generation service
#[derive(Default)]
pub struct MockGenerator {
    scripted: Mutex<HashMap<String, VecDeque<LLMResult<String>>>>,
    default_response: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unscripted call with `text`
    pub fn always(text: impl Into<String>) -> Self {
        Self { default_response: Some(text.into()), ..Self::default() }
    }

    /// Queue a successful response for `model`
    pub fn with_response(self, model: &str, text: impl Into<String>) -> Self {
        self.push(model, Ok(text.into()));
        self
    }

    /// Queue an error for `model`
    pub fn with_error(self, model: &str, error: LLMError) -> Self {
        self.push(model, Err(error));
        self
    }

    fn push(&self, model: &str, result: LLMResult<String>) {
        self.scripted
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(result);
    }

    /// Models called, in order
    pub fn called_models(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    /// Prompts sent, in order
    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, model: &str, prompt: &str) -> LLMResult<String> {
        self.calls.lock().unwrap().push((model.to_string(), prompt.to_string()));

        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(model)
            .and_then(|queue| queue.pop_front());

        match scripted {
            Some(result) => result,
            None => self
                .default_response
                .clone()
                .ok_or_else(|| LLMError::model_unavailable(model)),
        }
    }
}
