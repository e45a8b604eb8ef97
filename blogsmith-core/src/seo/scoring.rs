//! Weighted SEO score, letter grade and improvement suggestions

use super::SeoAnalysis;
use super::metrics::OPTIMAL_DENSITY;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Word count range that earns the full word-count component
pub const TARGET_WORDS: (usize, usize) = (1200, 1800);

/// Bodies at 80% of the minimum still earn partial credit
const NEAR_MIN_WORDS: usize = TARGET_WORDS.0 * 4 / 5;

/// Readability score below which a suggestion is emitted
const MIN_READABILITY: f64 = 60.0;

/// Points available per component
const COMPONENT_MAX: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Grade a 0-100 percentage
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::APlus,
            80..=89 => Self::A,
            70..=79 => Self::B,
            60..=69 => Self::C,
            50..=59 => Self::D,
            _ => Self::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(label)
    }
}

/// Per-component points, 0 to 25 each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub word_count: u32,
    pub keywords: u32,
    pub headings: u32,
    pub readability: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoScore {
    /// Sum of the four components, 0 to 100
    pub score: u32,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Content,
    Keywords,
    Structure,
    Readability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    High,
    Medium,
    Low,
}

impl fmt::Display for SuggestionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub priority: SuggestionPriority,
    pub message: String,
}

impl Suggestion {
    fn new(kind: SuggestionType, priority: SuggestionPriority, message: String) -> Self {
        Self { kind, priority, message }
    }
}

/// Score an analysis against the fixed rubric
pub fn calculate_score(analysis: &SeoAnalysis) -> SeoScore {
    let words = analysis.word_count;
    let word_count = if (TARGET_WORDS.0..=TARGET_WORDS.1).contains(&words) {
        COMPONENT_MAX
    } else if words >= NEAR_MIN_WORDS {
        15
    } else {
        5
    };

    let keywords = if analysis.keyword_analysis.primary.optimal { COMPONENT_MAX } else { 10 };

    let headings = &analysis.heading_structure;
    let headings = if headings.proper_structure {
        COMPONENT_MAX
    } else if headings.h1 == 1 {
        15
    } else {
        5
    };

    let readability = (analysis.readability.readability_score / 100.0 * COMPONENT_MAX as f64)
        .round()
        .clamp(0.0, COMPONENT_MAX as f64) as u32;

    let breakdown = ScoreBreakdown { word_count, keywords, headings, readability };
    let score = word_count + keywords + headings + readability;

    SeoScore { score, grade: Grade::from_percentage(score), breakdown }
}

/// Suggestions in fixed check order: content, keywords, structure, readability
pub fn generate_suggestions(analysis: &SeoAnalysis) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if analysis.word_count < TARGET_WORDS.0 {
        suggestions.push(Suggestion::new(
            SuggestionType::Content,
            SuggestionPriority::High,
            format!(
                "Content is too short ({} words). Expand it to at least {} words.",
                analysis.word_count, TARGET_WORDS.0
            ),
        ));
    }

    let primary = &analysis.keyword_analysis.primary;
    if primary.density < OPTIMAL_DENSITY.0 {
        suggestions.push(Suggestion::new(
            SuggestionType::Keywords,
            SuggestionPriority::Medium,
            format!(
                "Keyword density for \"{}\" is low ({:.2}%). Use it more often, aiming for {}-{}%.",
                primary.keyword, primary.density, OPTIMAL_DENSITY.0, OPTIMAL_DENSITY.1
            ),
        ));
    } else if primary.density > OPTIMAL_DENSITY.1 {
        suggestions.push(Suggestion::new(
            SuggestionType::Keywords,
            SuggestionPriority::High,
            format!(
                "Keyword density for \"{}\" is too high ({:.2}%). Reduce it below {}% to avoid keyword stuffing.",
                primary.keyword, primary.density, OPTIMAL_DENSITY.1
            ),
        ));
    }

    let headings = &analysis.heading_structure;
    if !headings.proper_structure {
        suggestions.push(Suggestion::new(
            SuggestionType::Structure,
            SuggestionPriority::Medium,
            format!(
                "Improve heading structure: use exactly one H1 and at least two H2 sections (found {} H1, {} H2).",
                headings.h1, headings.h2
            ),
        ));
    }

    if analysis.readability.readability_score < MIN_READABILITY {
        suggestions.push(Suggestion::new(
            SuggestionType::Readability,
            SuggestionPriority::Medium,
            format!(
                "Readability is {} ({:.0}/100). Use shorter sentences and simpler words.",
                analysis.readability.grade.label(),
                analysis.readability.readability_score
            ),
        ));
    }

    suggestions
}
