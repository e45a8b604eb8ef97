//! Structured constraint bundle built from a free-text instruction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintType {
    Exact,
    Maximum,
    Minimum,
    Flexible,
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Maximum => "maximum",
            Self::Minimum => "minimum",
            Self::Flexible => "flexible",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintPriority {
    Critical,
    Important,
    Suggestion,
}

impl fmt::Display for ConstraintPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Critical => "critical",
            Self::Important => "important",
            Self::Suggestion => "suggestion",
        })
    }
}

/// Target length. `word_limit` is `None` only for a flexible,
/// non-critical constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthConstraint {
    pub word_limit: Option<u32>,
    pub constraint_type: ConstraintType,
    pub priority: ConstraintPriority,
    pub reasoning: String,
    pub has_critical_limit: bool,
}

impl LengthConstraint {
    /// No length requested
    pub fn unconstrained() -> Self {
        Self {
            word_limit: None,
            constraint_type: ConstraintType::Flexible,
            priority: ConstraintPriority::Suggestion,
            reasoning: "No length specified".to_string(),
            has_critical_limit: false,
        }
    }

    pub fn new(
        word_limit: u32,
        constraint_type: ConstraintType,
        priority: ConstraintPriority,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            word_limit: Some(word_limit),
            constraint_type,
            priority,
            reasoning: reasoning.into(),
            has_critical_limit: priority == ConstraintPriority::Critical,
        }
    }

    /// Restore the invariant on externally supplied values
    pub fn normalized(mut self) -> Self {
        if self.word_limit.is_none() {
            self.constraint_type = ConstraintType::Flexible;
            self.has_critical_limit = false;
            if self.priority == ConstraintPriority::Critical {
                self.priority = ConstraintPriority::Suggestion;
            }
        }
        self
    }

    /// Only a critical maximum is trimmed mechanically
    pub fn requires_trim(&self) -> bool {
        self.constraint_type == ConstraintType::Maximum && self.has_critical_limit
    }
}

impl Default for LengthConstraint {
    fn default() -> Self {
        Self::unconstrained()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audience {
    pub level: String,
    pub industry: String,
    pub expertise: String,
}

impl Default for Audience {
    fn default() -> Self {
        Self {
            level: "general".to_string(),
            industry: "general".to_string(),
            expertise: "basic".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConstraints {
    pub tone: String,
    pub complexity: String,
    pub format: String,
    pub voice: String,
    pub perspective: String,
}

impl Default for StyleConstraints {
    fn default() -> Self {
        Self {
            tone: "professional".to_string(),
            complexity: "moderate".to_string(),
            format: "standard".to_string(),
            voice: "active".to_string(),
            perspective: "third-person".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConstraints {
    pub must_include: Vec<String>,
    pub should_include: Vec<String>,
    pub must_exclude: Vec<String>,
    pub data_requirements: String,
    pub depth_level: String,
}

impl Default for ContentConstraints {
    fn default() -> Self {
        Self {
            must_include: Vec::new(),
            should_include: vec!["examples".to_string(), "current trends".to_string()],
            must_exclude: Vec::new(),
            data_requirements: "examples".to_string(),
            depth_level: "moderate".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoConstraints {
    pub primary_keywords: Vec<String>,
    pub secondary_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    TooManyRequirements,
    DepthVsLength,
}

/// Two constraints that cannot both be met
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
    pub suggestion: String,
}

/// Output of `validate_constraints`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintReport {
    pub conflicts: Vec<Conflict>,
    pub warnings: Vec<String>,
    pub critical_issues: Vec<String>,
}

impl ConstraintReport {
    pub fn is_valid(&self) -> bool {
        self.conflicts.is_empty() && self.critical_issues.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    pub model_used: String,
    pub fallback_used: bool,
    pub original_instruction: String,
    pub parsed_at: DateTime<Utc>,
}

/// Everything the orchestrator needs to build a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub content_type: String,
    pub topic: String,
    pub audience: Audience,
    pub length_constraints: LengthConstraint,
    pub style_constraints: StyleConstraints,
    pub content_constraints: ContentConstraints,
    pub seo_constraints: SeoConstraints,
    pub conflicts: ConstraintReport,
    pub metadata: WorkflowMetadata,
}

impl Workflow {
    /// First primary keyword, or the topic when there is none
    pub fn primary_keyword(&self) -> &str {
        self.seo_constraints
            .primary_keywords
            .first()
            .map(String::as_str)
            .unwrap_or(&self.topic)
    }
}
