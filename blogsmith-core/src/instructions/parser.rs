//! Instruction parser
//!
//! Per call: cache lookup, then each unblocked parsing model in order, then
//! local heuristics. Parsing never fails; the worst case is a workflow built
//! from regex heuristics.

use super::cache::{DEFAULT_CACHE_CAPACITY, WorkflowCache};
use super::extractor::fallback_workflow;
use super::failures::ModelFailureTracker;
use super::json_recovery::recover_json;
use super::types::{
    Audience, ConstraintPriority, ConstraintType, ContentConstraints, LengthConstraint,
    SeoConstraints, StyleConstraints, Workflow, WorkflowMetadata,
};
use super::validation::validate_constraints;
use crate::llm::{LLMResult, TextGenerator};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Turns free-text instructions into workflows
pub struct InstructionParser {
    generator: Arc<dyn TextGenerator>,
    models: Vec<String>,
    cache: Mutex<WorkflowCache>,
    failures: Mutex<ModelFailureTracker>,
}

impl InstructionParser {
    pub fn new(generator: Arc<dyn TextGenerator>, models: Vec<String>) -> Self {
        Self::with_state(
            generator,
            models,
            WorkflowCache::new(DEFAULT_CACHE_CAPACITY),
            ModelFailureTracker::new(),
        )
    }

    /// Create a parser around existing cache and failure state
    pub fn with_state(
        generator: Arc<dyn TextGenerator>,
        models: Vec<String>,
        cache: WorkflowCache,
        failures: ModelFailureTracker,
    ) -> Self {
        Self { generator, models, cache: Mutex::new(cache), failures: Mutex::new(failures) }
    }

    /// Parse an instruction into a workflow
    pub async fn parse(&self, instruction: &str) -> Workflow {
        if let Some(cached) = self.cache.lock().await.get(instruction).cloned() {
            debug!("Workflow cache hit for '{}'", instruction.trim());
            return cached;
        }

        let prompt = build_extraction_prompt(instruction);

        for model in &self.models {
            if self.failures.lock().await.is_model_temporarily_blocked(model) {
                debug!("Skipping temporarily blocked model {}", model);
                continue;
            }

            match self.parse_with_model(model, &prompt).await {
                Ok(raw) => {
                    let workflow = backfill(raw, instruction, model);
                    self.failures.lock().await.clear(model);
                    self.cache.lock().await.insert(instruction, workflow.clone());
                    info!("Instruction parsed by {}", model);
                    return workflow;
                }
                Err(e) => {
                    warn!("Constraint parsing with {} failed ({}): {}", model, e.kind(), e);
                    self.failures.lock().await.record_failure(model);
                }
            }
        }

        warn!("All parsing models failed or are blocked, using local heuristics");
        fallback_workflow(instruction)
    }

    async fn parse_with_model(&self, model: &str, prompt: &str) -> LLMResult<RawWorkflow> {
        let response = self.generator.generate(model, prompt).await?;
        recover_json(&response)
    }

    pub async fn is_model_temporarily_blocked(&self, model: &str) -> bool {
        self.failures.lock().await.is_model_temporarily_blocked(model)
    }

    pub async fn cached_workflows(&self) -> usize {
        self.cache.lock().await.len()
    }

}

/// Prompt asking for strict JSON describing the instruction
pub fn build_extraction_prompt(instruction: &str) -> String {
    format!(
        "Analyze this content instruction and extract every constraint.\n\n\
         INSTRUCTION: \"{instruction}\"\n\n\
         Respond with ONLY valid JSON, no markdown and no commentary, using this schema:\n\
         {{\n  \
           \"contentType\": \"blog-post|guide|tutorial|listicle|review|news|case-study\",\n  \
           \"topic\": \"main subject\",\n  \
           \"audience\": {{\"level\": \"general|beginners|professionals|experts\", \"industry\": \"...\", \"expertise\": \"basic|intermediate|advanced\"}},\n  \
           \"lengthConstraints\": {{\"wordLimit\": number or null, \"constraintType\": \"exact|maximum|minimum|flexible\", \"priority\": \"critical|important|suggestion\", \"reasoning\": \"...\", \"hasCriticalLimit\": boolean}},\n  \
           \"styleConstraints\": {{\"tone\": \"...\", \"complexity\": \"simple|moderate|complex\", \"format\": \"...\", \"voice\": \"active|passive\", \"perspective\": \"first-person|second-person|third-person\"}},\n  \
           \"contentConstraints\": {{\"mustInclude\": [], \"shouldInclude\": [], \"mustExclude\": [], \"dataRequirements\": \"...\", \"depthLevel\": \"surface|moderate|deep\"}},\n  \
           \"seoConstraints\": {{\"primaryKeywords\": [], \"secondaryKeywords\": []}}\n\
         }}\n\n\
         Rules:\n\
         - \"exactly N words\" is exact and critical; \"under/max N words\" is maximum and critical\n\
         - \"at least N words\" is minimum and important; \"around N words\" is flexible\n\
         - Use null for any value the instruction does not imply"
    )
}

/// External parse result; every field may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawWorkflow {
    content_type: Option<String>,
    topic: Option<String>,
    audience: Option<RawAudience>,
    length_constraints: Option<RawLength>,
    style_constraints: Option<RawStyle>,
    content_constraints: Option<RawContent>,
    seo_constraints: Option<RawSeo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawAudience {
    level: Option<String>,
    industry: Option<String>,
    expertise: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawLength {
    word_limit: Option<Value>,
    constraint_type: Option<String>,
    priority: Option<String>,
    reasoning: Option<String>,
    has_critical_limit: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawStyle {
    tone: Option<String>,
    complexity: Option<String>,
    format: Option<String>,
    voice: Option<String>,
    perspective: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawContent {
    must_include: Option<Vec<String>>,
    should_include: Option<Vec<String>>,
    must_exclude: Option<Vec<String>>,
    data_requirements: Option<String>,
    depth_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSeo {
    primary_keywords: Option<Vec<String>>,
    secondary_keywords: Option<Vec<String>>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn non_empty_list(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value
        .map(|items| {
            items.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
        })
        .filter(|items: &Vec<String>| !items.is_empty())
}

/// Numbers may arrive as JSON numbers or strings such as "1,500"
fn word_limit_from(value: Option<Value>) -> Option<u32> {
    let parsed = match value? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.round() as u64)),
        Value::String(s) => s.replace(',', "").trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.filter(|n| *n > 0).and_then(|n| u32::try_from(n).ok())
}

fn constraint_type_from(value: &str) -> Option<ConstraintType> {
    match value.trim().to_lowercase().as_str() {
        "exact" => Some(ConstraintType::Exact),
        "maximum" | "max" => Some(ConstraintType::Maximum),
        "minimum" | "min" => Some(ConstraintType::Minimum),
        "flexible" | "approximate" => Some(ConstraintType::Flexible),
        _ => None,
    }
}

fn priority_from(value: &str) -> Option<ConstraintPriority> {
    match value.trim().to_lowercase().as_str() {
        "critical" => Some(ConstraintPriority::Critical),
        "important" => Some(ConstraintPriority::Important),
        "suggestion" => Some(ConstraintPriority::Suggestion),
        _ => None,
    }
}

fn length_from(raw: Option<RawLength>, local: LengthConstraint) -> LengthConstraint {
    let Some(raw) = raw else { return local };
    let Some(word_limit) = word_limit_from(raw.word_limit) else { return local };

    let constraint_type = raw
        .constraint_type
        .as_deref()
        .and_then(constraint_type_from)
        .unwrap_or(ConstraintType::Flexible);
    let priority = raw.priority.as_deref().and_then(priority_from).unwrap_or(
        match constraint_type {
            ConstraintType::Exact | ConstraintType::Maximum => ConstraintPriority::Critical,
            _ => ConstraintPriority::Important,
        },
    );

    LengthConstraint {
        word_limit: Some(word_limit),
        constraint_type,
        priority,
        reasoning: non_empty(raw.reasoning).unwrap_or_else(|| "Parsed from instruction".to_string()),
        has_critical_limit: raw
            .has_critical_limit
            .unwrap_or(priority == ConstraintPriority::Critical),
    }
    .normalized()
}

/// Overlay the model's fields on the locally extracted workflow. Anything
/// the model left out or sent empty keeps the local value.
fn backfill(raw: RawWorkflow, instruction: &str, model: &str) -> Workflow {
    let local = fallback_workflow(instruction);

    let audience = raw.audience.unwrap_or_default();
    let audience = Audience {
        level: non_empty(audience.level).unwrap_or(local.audience.level),
        industry: non_empty(audience.industry).unwrap_or(local.audience.industry),
        expertise: non_empty(audience.expertise).unwrap_or(local.audience.expertise),
    };

    let style = raw.style_constraints.unwrap_or_default();
    let local_style = local.style_constraints;
    let style = StyleConstraints {
        tone: non_empty(style.tone).unwrap_or(local_style.tone),
        complexity: non_empty(style.complexity).unwrap_or(local_style.complexity),
        format: non_empty(style.format).unwrap_or(local_style.format),
        voice: non_empty(style.voice).unwrap_or(local_style.voice),
        perspective: non_empty(style.perspective).unwrap_or(local_style.perspective),
    };

    let content = raw.content_constraints.unwrap_or_default();
    let local_content = local.content_constraints;
    let content = ContentConstraints {
        must_include: non_empty_list(content.must_include).unwrap_or(local_content.must_include),
        should_include: non_empty_list(content.should_include)
            .unwrap_or(local_content.should_include),
        must_exclude: non_empty_list(content.must_exclude).unwrap_or(local_content.must_exclude),
        data_requirements: non_empty(content.data_requirements)
            .unwrap_or(local_content.data_requirements),
        depth_level: non_empty(content.depth_level).unwrap_or(local_content.depth_level),
    };

    let seo = raw.seo_constraints.unwrap_or_default();
    let seo = SeoConstraints {
        primary_keywords: non_empty_list(seo.primary_keywords)
            .unwrap_or(local.seo_constraints.primary_keywords),
        secondary_keywords: non_empty_list(seo.secondary_keywords)
            .unwrap_or(local.seo_constraints.secondary_keywords),
    };

    let mut workflow = Workflow {
        content_type: non_empty(raw.content_type).unwrap_or(local.content_type),
        topic: non_empty(raw.topic).unwrap_or(local.topic),
        audience,
        length_constraints: length_from(raw.length_constraints, local.length_constraints),
        style_constraints: style,
        content_constraints: content,
        seo_constraints: seo,
        conflicts: Default::default(),
        metadata: WorkflowMetadata {
            model_used: model.to_string(),
            fallback_used: false,
            original_instruction: instruction.to_string(),
            parsed_at: Utc::now(),
        },
    };
    workflow.conflicts = validate_constraints(&workflow);
    workflow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::extractor::FALLBACK_MODEL;
    use crate::llm::LLMError;
    use crate::llm::mock::MockGenerator;

    const FULL_RESPONSE: &str = r#"```json
{
  "contentType": "guide",
  "topic": "remote python jobs",
  "audience": {"level": "professionals", "industry": "tech", "expertise": "intermediate"},
  "lengthConstraints": {"wordLimit": 500, "constraintType": "exact", "priority": "critical", "reasoning": "explicit", "hasCriticalLimit": true},
  "styleConstraints": {"tone": "friendly"},
  "contentConstraints": {"mustInclude": ["salaries"], "depthLevel": "moderate"},
  "seoConstraints": {"primaryKeywords": ["python developer", "remote jobs"]}
}
```"#;

    fn models() -> Vec<String> {
        vec!["model-a".to_string(), "model-b".to_string()]
    }

    #[tokio::test]
    async fn test_parse_with_external_model() {
        let mock = Arc::new(MockGenerator::new().with_response("model-a", FULL_RESPONSE));
        let parser = InstructionParser::new(mock.clone(), models());

        let workflow = parser.parse("Write a guide on remote Python jobs in exactly 500 words").await;
        assert!(!workflow.metadata.fallback_used);
        assert_eq!(workflow.metadata.model_used, "model-a");
        assert_eq!(workflow.content_type, "guide");
        assert_eq!(workflow.length_constraints.word_limit, Some(500));
        assert_eq!(workflow.length_constraints.constraint_type, ConstraintType::Exact);
        assert_eq!(workflow.style_constraints.tone, "friendly");
        assert_eq!(workflow.style_constraints.voice, "active");
        assert_eq!(workflow.content_constraints.should_include, vec!["examples", "current trends"]);
        assert_eq!(workflow.primary_keyword(), "python developer");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_backfill_from_minimal_json() {
        let mock = Arc::new(MockGenerator::new().with_response("model-a", r#"{"topic": ""}"#));
        let parser = InstructionParser::new(mock, models());

        let workflow = parser.parse("Keep it under 300 words: Rust hiring trends").await;
        assert_eq!(workflow.content_type, "blog-post");
        assert_eq!(workflow.topic, "rust hiring trends");
        assert_eq!(workflow.audience.level, "general");
        assert_eq!(workflow.audience.industry, "tech");
        assert_eq!(workflow.style_constraints, StyleConstraints::default());
        assert_eq!(workflow.length_constraints.word_limit, Some(300));
        assert_eq!(workflow.length_constraints.constraint_type, ConstraintType::Maximum);
        assert!(workflow.length_constraints.has_critical_limit);
        assert_eq!(workflow.seo_constraints.primary_keywords, vec!["rust", "hiring", "trends"]);
    }

    #[tokio::test]
    async fn test_empty_model_response_matches_local_extraction() {
        let mock = Arc::new(MockGenerator::new().with_response("model-a", "{}"));
        let parser = InstructionParser::new(mock, models());
        let instruction =
            "Write a simple tutorial for beginners on python programming, include cargo, tests, docs and ci";

        let workflow = parser.parse(instruction).await;
        let local = fallback_workflow(instruction);
        assert!(!workflow.metadata.fallback_used);
        assert_eq!(workflow.metadata.model_used, "model-a");
        assert_eq!(workflow.content_type, "tutorial");
        assert_eq!(workflow.audience.level, "beginners");
        assert_eq!(workflow.audience.industry, "tech");
        assert_eq!(workflow.style_constraints.complexity, "simple");
        assert_eq!(workflow.content_constraints.must_include, vec!["cargo", "tests", "docs", "ci"]);
        assert_eq!(workflow.audience, local.audience);
        assert_eq!(workflow.style_constraints, local.style_constraints);
        assert_eq!(workflow.content_constraints, local.content_constraints);
        assert_eq!(workflow.seo_constraints, local.seo_constraints);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_external_call() {
        let mock = Arc::new(MockGenerator::always(r#"{"contentType": "guide"}"#));
        let parser = InstructionParser::new(mock.clone(), models());

        let first = parser.parse("Remote Python jobs").await;
        let second = parser.parse("  remote python JOBS ").await;
        assert_eq!(first, second);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(parser.cached_workflows().await, 1);
    }

    #[tokio::test]
    async fn test_falls_through_to_next_model() {
        let mock = Arc::new(
            MockGenerator::new()
                .with_error("model-a", LLMError::quota("quota exceeded"))
                .with_response("model-b", r#"{"contentType": "review"}"#),
        );
        let parser = InstructionParser::new(mock.clone(), models());

        let workflow = parser.parse("Rust vs Go").await;
        assert_eq!(workflow.metadata.model_used, "model-b");
        assert_eq!(workflow.content_type, "review");
        assert_eq!(mock.called_models(), vec!["model-a", "model-b"]);
    }

    #[tokio::test]
    async fn test_malformed_json_counts_as_failure() {
        let mock = Arc::new(MockGenerator::always("I cannot produce JSON today."));
        let parser = InstructionParser::new(mock.clone(), models());

        let workflow = parser.parse("a brief summary of remote work").await;
        assert!(workflow.metadata.fallback_used);
        assert_eq!(workflow.metadata.model_used, FALLBACK_MODEL);
        assert_eq!(workflow.length_constraints.word_limit, Some(300));
        assert_eq!(mock.call_count(), 2);
        // Fallback results are not cached
        assert_eq!(parser.cached_workflows().await, 0);
    }

    #[tokio::test]
    async fn test_blocked_models_are_skipped() {
        let mock = Arc::new(MockGenerator::new());
        let parser = InstructionParser::new(mock.clone(), models());

        for i in 0..3 {
            parser.parse(&format!("instruction {i}")).await;
        }
        assert!(parser.is_model_temporarily_blocked("model-a").await);
        assert!(parser.is_model_temporarily_blocked("model-b").await);
        assert_eq!(mock.call_count(), 6);

        let workflow = parser.parse("instruction 4").await;
        assert!(workflow.metadata.fallback_used);
        assert_eq!(mock.call_count(), 6);
    }

    #[tokio::test]
    async fn test_success_clears_failure_history() {
        let mut tracker = ModelFailureTracker::new();
        tracker.record_failure("model-a");
        tracker.record_failure("model-a");
        let mock = Arc::new(MockGenerator::always("{}"));
        let parser =
            InstructionParser::with_state(mock, models(), WorkflowCache::default(), tracker);

        parser.parse("remote jobs").await;
        let failures = parser.failures.lock().await;
        assert_eq!(failures.recent_failures("model-a", Utc::now()), 0);
    }

    #[tokio::test]
    async fn test_fifo_eviction_through_parser() {
        let mock = Arc::new(MockGenerator::always("{}"));
        let parser = InstructionParser::new(mock.clone(), vec!["model-a".to_string()]);

        for i in 0..51 {
            parser.parse(&format!("topic number {i}")).await;
        }
        assert_eq!(parser.cached_workflows().await, 50);
        assert_eq!(mock.call_count(), 51);

        parser.parse("topic number 50").await;
        assert_eq!(mock.call_count(), 51);
        parser.parse("topic number 0").await;
        assert_eq!(mock.call_count(), 52);
    }

    #[test]
    fn test_lenient_length_values() {
        assert_eq!(word_limit_from(Some(Value::from("1,500"))), Some(1500));
        assert_eq!(word_limit_from(Some(Value::from(750.4))), Some(750));
        assert_eq!(word_limit_from(Some(Value::Null)), None);
        assert_eq!(word_limit_from(Some(Value::from(0))), None);

        let raw = RawLength {
            word_limit: Some(Value::from(400)),
            constraint_type: Some("MAX".to_string()),
            ..Default::default()
        };
        let length = length_from(Some(raw), fallback_workflow("anything").length_constraints);
        assert_eq!(length.constraint_type, ConstraintType::Maximum);
        assert_eq!(length.priority, ConstraintPriority::Critical);
        assert!(length.requires_trim());
    }

    #[test]
    fn test_extraction_prompt_mentions_schema() {
        let prompt = build_extraction_prompt("write about rust");
        assert!(prompt.contains("write about rust"));
        assert!(prompt.contains("\"lengthConstraints\""));
        assert!(prompt.contains("ONLY valid JSON"));
    }
}
