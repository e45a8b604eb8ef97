//! Regex utilities for blogsmith
//! Extracted to a separate crate for compilation optimization

use once_cell::sync::Lazy;
use regex::Regex;

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex pattern"))
        .collect()
}

/// Word-limit patterns, matched against a lowercased instruction.
///
/// Every pattern captures the number as group 1. Numbers may carry
/// thousands separators ("1,500").
pub mod word_limit {
    use super::*;

    pub static EXACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
        compile_all(&[
            r"\b(?:exactly|precisely|must be)\s+(\d[\d,]*)\s*-?\s*words?\b",
            r"\bin\s+(\d[\d,]*)\s*words?\b",
            r"\b(?:generate|write|create)\s+(?:a\s+|an\s+)?(\d[\d,]*)\s*-?\s*words?\b",
        ])
    });

    pub static MAXIMUM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
        compile_all(&[
            r"\b(?:under|below|max|maximum|no more than|not more than|up to)(?:\s+of)?\s+(\d[\d,]*)\s*words?\b",
            r"\b(?:less|fewer)\s+than\s+(\d[\d,]*)\s*words?\b",
            r"\bkeep\s+it\s+(?:under|to|below)\s+(\d[\d,]*)\s*words?\b",
            r"\b(?:limit|cap)(?:\s+it)?\s+(?:to|at)\s+(\d[\d,]*)\s*words?\b",
            r"\b(\d[\d,]*)\s*words?\s+(?:max|maximum|or less|or fewer)\b",
        ])
    });

    pub static MINIMUM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
        compile_all(&[
            r"\b(?:at least|minimum|min|no less than|not less than)(?:\s+of)?\s+(\d[\d,]*)\s*words?\b",
            r"\b(?:over|above|more than)\s+(\d[\d,]*)\s*words?\b",
        ])
    });

    pub static FLEXIBLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
        compile_all(&[
            r"\b(?:around|about|approximately|roughly|approx\.?)\s+(\d[\d,]*)\s*words?\b",
            r"~\s*(\d[\d,]*)\s*words?\b",
            r"±\s*(\d[\d,]*)\s*words?\b",
        ])
    });

    /// Any "N words" phrase, used to scrub lengths out of topics.
    pub static ANY_LENGTH: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\b\d[\d,]*\s*-?\s*words?\b").expect("Invalid regex pattern")
    });

    /// Parse a captured number, dropping thousands separators.
    pub fn parse_number(raw: &str) -> Option<u32> {
        raw.replace(',', "").parse().ok()
    }
}

/// Patterns for salvaging JSON out of noisy model output
pub mod json {
    use super::*;

    /// Greedy first-`{` to last-`}` block
    pub static OBJECT_BLOCK: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("Invalid regex pattern"));

    /// Opening or closing markdown code fence, with optional language tag
    pub static CODE_FENCE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?m)^\s*```[a-zA-Z]*\s*$").expect("Invalid regex pattern"));
}

/// Patterns used on markdown bodies
pub mod markdown {
    use super::*;

    /// Blank line separating paragraphs
    pub static PARAGRAPH_BREAK: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\n\s*\n").expect("Invalid regex pattern"));

    /// Sentence terminators
    pub static SENTENCE_END: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[.!?]+").expect("Invalid regex pattern"));

    /// Runs of characters that are not allowed in a slug
    pub static SLUG_SEPARATOR: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex pattern"));
}

/// Items listed after "include", "cover" or "mention"
pub mod inclusion {
    use super::*;

    pub static MUST_INCLUDE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\b(?:must include|include|including|cover|covering|mention)\s+([^.;:!?]+)")
            .expect("Invalid regex pattern")
    });

    pub static LIST_SEPARATOR: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\s*(?:,|\band\b)\s*").expect("Invalid regex pattern"));
}
