//! Conflict detection between constraints of a workflow

use super::types::{Conflict, ConflictKind, ConstraintReport, Workflow};

const CROWDED_LIMIT: u32 = 500;
const CROWDED_ITEMS: usize = 3;
const SHALLOW_LIMIT: u32 = 400;
const MIN_SENSIBLE_LIMIT: u32 = 50;
const MAX_SENSIBLE_LIMIT: u32 = 5000;

/// Detect conflicts, warnings and critical issues
pub fn validate_constraints(workflow: &Workflow) -> ConstraintReport {
    let mut report = ConstraintReport::default();
    let must_include = &workflow.content_constraints.must_include;

    if let Some(limit) = workflow.length_constraints.word_limit {
        if limit < CROWDED_LIMIT && must_include.len() > CROWDED_ITEMS {
            report.conflicts.push(Conflict {
                kind: ConflictKind::TooManyRequirements,
                message: format!(
                    "{} required items are hard to cover in {} words",
                    must_include.len(),
                    limit
                ),
                suggestion: format!(
                    "Raise the limit to at least {CROWDED_LIMIT} words or keep {CROWDED_ITEMS} required items at most"
                ),
            });
        }

        if limit < SHALLOW_LIMIT && workflow.content_constraints.depth_level == "deep" {
            report.conflicts.push(Conflict {
                kind: ConflictKind::DepthVsLength,
                message: format!("Deep coverage does not fit in {limit} words"),
                suggestion: format!(
                    "Use a moderate depth or raise the limit to at least {SHALLOW_LIMIT} words"
                ),
            });
        }

        if limit < MIN_SENSIBLE_LIMIT {
            report
                .critical_issues
                .push(format!("A {limit}-word limit is too short for a meaningful post"));
        }

        if limit > MAX_SENSIBLE_LIMIT {
            report.warnings.push(format!(
                "A {limit}-word target is very long; consider splitting it into a series"
            ));
        }
    }

    if workflow.style_constraints.tone == "casual" && workflow.audience.level == "experts" {
        report
            .warnings
            .push("A casual tone may undermine credibility with an expert audience".to_string());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::extractor::fallback_workflow;
    use crate::instructions::types::{ConstraintPriority, ConstraintType, LengthConstraint};

    fn with_limit(limit: u32) -> Workflow {
        let mut workflow = fallback_workflow("remote jobs");
        workflow.length_constraints =
            LengthConstraint::new(limit, ConstraintType::Maximum, ConstraintPriority::Critical, "");
        workflow
    }

    #[test]
    fn test_too_many_requirements() {
        let mut workflow = with_limit(450);
        workflow.content_constraints.must_include =
            vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let report = validate_constraints(&workflow);
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].kind, ConflictKind::TooManyRequirements);
        assert!(!report.is_valid());

        workflow.content_constraints.must_include.pop();
        assert!(validate_constraints(&workflow).is_valid());
    }

    #[test]
    fn test_depth_vs_length() {
        let mut workflow = with_limit(350);
        workflow.content_constraints.depth_level = "deep".to_string();
        let report = validate_constraints(&workflow);
        assert_eq!(report.conflicts[0].kind, ConflictKind::DepthVsLength);
        assert!(!report.conflicts[0].suggestion.is_empty());

        let mut workflow = with_limit(400);
        workflow.content_constraints.depth_level = "deep".to_string();
        assert!(validate_constraints(&workflow).conflicts.is_empty());
    }

    #[test]
    fn test_tone_audience_warning() {
        let mut workflow = fallback_workflow("remote jobs");
        workflow.style_constraints.tone = "casual".to_string();
        workflow.audience.level = "experts".to_string();
        let report = validate_constraints(&workflow);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.is_valid());
    }

    #[test]
    fn test_extreme_limits() {
        let report = validate_constraints(&with_limit(30));
        assert_eq!(report.critical_issues.len(), 1);
        assert!(!report.is_valid());

        let report = validate_constraints(&with_limit(6000));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.critical_issues.is_empty());
    }

    #[test]
    fn test_unconstrained_is_clean() {
        let workflow = fallback_workflow("thoughts on remote hiring");
        assert_eq!(validate_constraints(&workflow), ConstraintReport::default());
    }
}
