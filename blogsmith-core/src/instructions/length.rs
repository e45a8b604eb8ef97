//! Local word-limit extraction
//!
//! Numeric patterns are checked in precedence order (exact, maximum,
//! minimum, flexible), then descriptive terms. First match wins.

use super::types::{ConstraintPriority, ConstraintType, LengthConstraint};
use regex::Regex;
use regex_utils::word_limit;
use tracing::debug;

/// Descriptive length terms, checked in this order
const DESCRIPTORS: &[(&str, u32, ConstraintType)] = &[
    ("brief", 300, ConstraintType::Maximum),
    ("short", 500, ConstraintType::Maximum),
    ("quick", 400, ConstraintType::Maximum),
    ("summary", 350, ConstraintType::Maximum),
    ("overview", 600, ConstraintType::Flexible),
    ("comprehensive", 1500, ConstraintType::Minimum),
    ("detailed", 1200, ConstraintType::Minimum),
    ("in-depth", 2000, ConstraintType::Minimum),
];

/// Extract a length constraint from an instruction
pub fn extract_length_constraint(instruction: &str) -> LengthConstraint {
    let text = instruction.to_lowercase();

    let numeric = [
        (&*word_limit::EXACT_PATTERNS, ConstraintType::Exact, ConstraintPriority::Critical),
        (&*word_limit::MAXIMUM_PATTERNS, ConstraintType::Maximum, ConstraintPriority::Critical),
        (&*word_limit::MINIMUM_PATTERNS, ConstraintType::Minimum, ConstraintPriority::Important),
        (&*word_limit::FLEXIBLE_PATTERNS, ConstraintType::Flexible, ConstraintPriority::Important),
    ];

    for (patterns, constraint_type, priority) in numeric {
        if let Some((limit, phrase)) = first_match(patterns, &text) {
            debug!("Length pattern '{}' -> {} {}", phrase, constraint_type, limit);
            return LengthConstraint::new(
                limit,
                constraint_type,
                priority,
                format!("Explicit {constraint_type} length requested: \"{phrase}\""),
            );
        }
    }

    for (term, limit, constraint_type) in DESCRIPTORS {
        if contains_term(&text, term) {
            debug!("Length descriptor '{}' -> {} {}", term, constraint_type, limit);
            return LengthConstraint::new(
                *limit,
                *constraint_type,
                ConstraintPriority::Important,
                format!("Inferred from the word \"{term}\""),
            );
        }
    }

    LengthConstraint::unconstrained()
}

fn first_match(patterns: &[Regex], text: &str) -> Option<(u32, String)> {
    for re in patterns {
        for caps in re.captures_iter(text) {
            let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            // "no less than" must not read as "less than"
            if is_negated(text, whole.start()) {
                continue;
            }
            if let Some(limit) = word_limit::parse_number(number.as_str()) {
                return Some((limit, whole.as_str().to_string()));
            }
        }
    }
    None
}

fn is_negated(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end();
    before.ends_with(" no") || before.ends_with(" not") || before == "no" || before == "not"
}

fn contains_term(text: &str, term: &str) -> bool {
    Regex::new(&format!(r"\b{}\b", regex::escape(term)))
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(instruction: &str, limit: Option<u32>, kind: ConstraintType, priority: ConstraintPriority) {
        let c = extract_length_constraint(instruction);
        assert_eq!(c.word_limit, limit, "limit for {instruction:?}");
        assert_eq!(c.constraint_type, kind, "type for {instruction:?}");
        assert_eq!(c.priority, priority, "priority for {instruction:?}");
    }

    #[test]
    fn test_exact_patterns() {
        use ConstraintPriority::Critical;
        use ConstraintType::Exact;
        check("write this in exactly 500 words", Some(500), Exact, Critical);
        check("Precisely 250 words about Rust", Some(250), Exact, Critical);
        check("explain async in 300 words", Some(300), Exact, Critical);
        check("write a 1,200-word article on hiring", Some(1200), Exact, Critical);
        assert!(extract_length_constraint("must be 400 words").has_critical_limit);
    }

    #[test]
    fn test_maximum_patterns() {
        use ConstraintPriority::Critical;
        use ConstraintType::Maximum;
        check("keep it under 300 words", Some(300), Maximum, Critical);
        check("no more than 800 words on remote jobs", Some(800), Maximum, Critical);
        check("less than 450 words", Some(450), Maximum, Critical);
        check("limit it to 600 words", Some(600), Maximum, Critical);
        check("cap at 700 words", Some(700), Maximum, Critical);
        check("a post about salaries, 900 words max", Some(900), Maximum, Critical);
        check("write a post under 300 words", Some(300), Maximum, Critical);
    }

    #[test]
    fn test_minimum_patterns() {
        use ConstraintPriority::Important;
        use ConstraintType::Minimum;
        check("at least 1500 words", Some(1500), Minimum, Important);
        check("no less than 1000 words please", Some(1000), Minimum, Important);
        check("more than 2000 words", Some(2000), Minimum, Important);
        assert!(!extract_length_constraint("over 1000 words").has_critical_limit);
    }

    #[test]
    fn test_flexible_patterns() {
        use ConstraintPriority::Important;
        use ConstraintType::Flexible;
        check("around 800 words on Go", Some(800), Flexible, Important);
        check("roughly 1000 words", Some(1000), Flexible, Important);
        check("~600 words", Some(600), Flexible, Important);
    }

    #[test]
    fn test_exact_wins_over_maximum() {
        let c = extract_length_constraint("exactly 500 words, definitely under 600 words");
        assert_eq!(c.word_limit, Some(500));
        assert_eq!(c.constraint_type, ConstraintType::Exact);
    }

    #[test]
    fn test_descriptors() {
        use ConstraintPriority::Important;
        check("a brief summary", Some(300), ConstraintType::Maximum, Important);
        check("a short post on Rust", Some(500), ConstraintType::Maximum, Important);
        check("an overview of cloud costs", Some(600), ConstraintType::Flexible, Important);
        check("a comprehensive and detailed guide", Some(1500), ConstraintType::Minimum, Important);
        check("an in-depth look at tokio", Some(2000), ConstraintType::Minimum, Important);
        assert!(!extract_length_constraint("a brief summary").has_critical_limit);
    }

    #[test]
    fn test_descriptor_needs_whole_word() {
        let c = extract_length_constraint("the talent shortage in tech");
        assert_eq!(c, LengthConstraint::unconstrained());
    }

    #[test]
    fn test_no_match() {
        check("a post about remote python jobs", None, ConstraintType::Flexible, ConstraintPriority::Suggestion);
        assert!(!extract_length_constraint("").has_critical_limit);
    }
}
