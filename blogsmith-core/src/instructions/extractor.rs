//! Local heuristics for instructions
//!
//! Used to backfill fields an external parse left out, and to build a whole
//! workflow when every external model fails.

use super::length::extract_length_constraint;
use super::types::{
    Audience, ContentConstraints, SeoConstraints, StyleConstraints, Workflow, WorkflowMetadata,
};
use super::validation::validate_constraints;
use chrono::Utc;
use regex_utils::inclusion::{LIST_SEPARATOR, MUST_INCLUDE};
use regex_utils::word_limit::ANY_LENGTH;
use std::collections::HashSet;

/// Model name recorded on locally built workflows
pub const FALLBACK_MODEL: &str = "regex-fallback";

const MAX_PRIMARY_KEYWORDS: usize = 5;

/// Command and connector words removed when extracting a topic
const COMMAND_WORDS: &[&str] = &[
    "write", "create", "generate", "make", "produce", "draft", "compose", "please", "me", "us",
    "a", "an", "the", "blog", "post", "article", "about", "on", "regarding", "for", "of",
    "exactly", "precisely", "around", "approximately", "roughly", "under", "over", "below",
    "above", "keep", "it", "to", "in", "within", "max", "maximum", "minimum", "least", "at",
    "no", "more", "less", "than", "words", "word", "brief", "short", "quick", "detailed",
    "comprehensive", "in-depth",
];

/// Words never used as keywords
const STOPWORDS: &[&str] = &[
    "write", "create", "generate", "make", "about", "blog", "post", "article", "with", "that",
    "this", "these", "those", "from", "into", "your", "their", "have", "will", "should", "would",
    "could", "please", "words", "word", "exactly", "under", "over", "around", "approximately",
    "roughly", "least", "more", "less", "than", "keep", "include", "including", "cover",
    "mention", "brief", "short", "quick", "detailed", "comprehensive", "in-depth", "what",
    "when", "where", "which", "while", "also", "some", "very", "just", "only", "them", "they",
];

/// Content types and the words that signal them, checked in order
const CONTENT_TYPES: &[(&str, &[&str])] = &[
    ("case-study", &["case study", "case-study"]),
    ("tutorial", &["tutorial", "step-by-step", "step by step", "how to", "how-to"]),
    ("guide", &["guide", "handbook", "playbook"]),
    ("listicle", &["listicle", "top 5", "top 10", "top ten", "list of"]),
    ("review", &["review", "comparison", " vs "]),
    ("news", &["news", "announcement", "update on"]),
];

/// Built entirely from local heuristics
pub fn fallback_workflow(instruction: &str) -> Workflow {
    let length_constraints = extract_length_constraint(instruction);
    let topic = extract_topic(instruction);

    let mut workflow = Workflow {
        content_type: detect_content_type(instruction),
        audience: detect_audience(instruction),
        length_constraints,
        style_constraints: detect_style(instruction),
        content_constraints: ContentConstraints {
            must_include: extract_must_include(instruction),
            depth_level: detect_depth(instruction),
            ..ContentConstraints::default()
        },
        seo_constraints: SeoConstraints {
            primary_keywords: extract_keywords(instruction),
            secondary_keywords: Vec::new(),
        },
        topic,
        conflicts: Default::default(),
        metadata: WorkflowMetadata {
            model_used: FALLBACK_MODEL.to_string(),
            fallback_used: true,
            original_instruction: instruction.to_string(),
            parsed_at: Utc::now(),
        },
    };
    workflow.conflicts = validate_constraints(&workflow);
    workflow
}

/// Instruction with command words and length phrases removed
pub fn extract_topic(instruction: &str) -> String {
    let lower = instruction.to_lowercase();
    let without_length = ANY_LENGTH.replace_all(&lower, " ");

    let topic = without_length
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '+' && c != '#'))
        .filter(|w| !w.is_empty() && !COMMAND_WORDS.contains(w))
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit() || c == ','))
        .collect::<Vec<_>>()
        .join(" ");

    if topic.is_empty() { instruction.trim().to_string() } else { topic }
}

/// Up to five distinct words longer than three characters, skipping
/// stopwords and numbers
pub fn extract_keywords(instruction: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    instruction
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .filter(|w| w.chars().count() > 3)
        .filter(|w| !STOPWORDS.contains(w))
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit() || c == ','))
        .filter(|w| seen.insert(w.to_string()))
        .take(MAX_PRIMARY_KEYWORDS)
        .map(str::to_string)
        .collect()
}

pub fn detect_content_type(instruction: &str) -> String {
    let lower = format!(" {} ", instruction.to_lowercase());
    CONTENT_TYPES
        .iter()
        .find(|(_, signals)| signals.iter().any(|s| lower.contains(s)))
        .map(|(kind, _)| kind.to_string())
        .unwrap_or_else(|| "blog-post".to_string())
}

pub fn detect_audience(instruction: &str) -> Audience {
    let lower = instruction.to_lowercase();
    let mut audience = Audience::default();

    if ["beginner", "newbie", "newcomer", "novice", "getting started"].iter().any(|w| lower.contains(w)) {
        audience.level = "beginners".to_string();
        audience.expertise = "basic".to_string();
    } else if ["expert", "advanced", "senior", "deep dive"].iter().any(|w| lower.contains(w)) {
        audience.level = "experts".to_string();
        audience.expertise = "advanced".to_string();
    } else if ["professional", "manager", "executive", "recruiter", "developers", "engineers"]
        .iter()
        .any(|w| lower.contains(w))
    {
        audience.level = "professionals".to_string();
        audience.expertise = "intermediate".to_string();
    }

    let industries = [
        ("tech", &["software", "developer", "programming", "python", "rust", "javascript", "devops", "engineering"][..]),
        ("finance", &["finance", "banking", "fintech", "investing"][..]),
        ("healthcare", &["health", "medical", "clinical"][..]),
        ("marketing", &["marketing", "seo", "advertising", "brand"][..]),
        ("education", &["education", "teaching", "students", "learning"][..]),
    ];
    if let Some((industry, _)) =
        industries.iter().find(|(_, signals)| signals.iter().any(|s| lower.contains(s)))
    {
        audience.industry = industry.to_string();
    }

    audience
}

pub fn detect_style(instruction: &str) -> StyleConstraints {
    let lower = instruction.to_lowercase();
    let mut style = StyleConstraints::default();

    let tones = [
        ("casual", &["casual", "conversational", "fun", "informal"][..]),
        ("friendly", &["friendly", "warm", "approachable"][..]),
        ("technical", &["technical", "code examples", "in-depth technical"][..]),
        ("formal", &["formal", "academic"][..]),
    ];
    if let Some((tone, _)) = tones.iter().find(|(_, signals)| signals.iter().any(|s| lower.contains(s))) {
        style.tone = tone.to_string();
    }

    if lower.contains("simple") || lower.contains("easy to read") || lower.contains("plain") {
        style.complexity = "simple".to_string();
    } else if lower.contains("technical") || lower.contains("advanced") {
        style.complexity = "complex".to_string();
    }

    if lower.contains("bullet") || lower.contains("list") {
        style.format = "list".to_string();
    } else if lower.contains("q&a") || lower.contains("faq") {
        style.format = "faq".to_string();
    }

    if lower.contains("first person") || lower.contains("first-person") {
        style.perspective = "first-person".to_string();
    } else if lower.contains("second person") || lower.contains("second-person") {
        style.perspective = "second-person".to_string();
    }

    style
}

pub fn detect_depth(instruction: &str) -> String {
    let lower = instruction.to_lowercase();
    if ["in-depth", "deep dive", "deep-dive", "thorough", "comprehensive", "detailed"]
        .iter()
        .any(|w| lower.contains(w))
    {
        "deep".to_string()
    } else if ["brief", "quick", "overview", "summary", "high-level"].iter().any(|w| lower.contains(w)) {
        "surface".to_string()
    } else {
        "moderate".to_string()
    }
}

/// Items named after "include", "cover" or "mention"
pub fn extract_must_include(instruction: &str) -> Vec<String> {
    let lower = instruction.to_lowercase();
    let mut items = Vec::new();

    for caps in MUST_INCLUDE.captures_iter(&lower) {
        let Some(list) = caps.get(1) else { continue };
        for item in LIST_SEPARATOR.split(list.as_str()) {
            let item = ANY_LENGTH.replace_all(item, "");
            let item = item.trim();
            if !item.is_empty() && !items.iter().any(|i: &String| i == item) {
                items.push(item.to_string());
            }
        }
    }
    items
}
