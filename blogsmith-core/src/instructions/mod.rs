//! Instruction constraint parsing
//!
//! Turns a free-text writing instruction into a structured [`Workflow`]:
//! length, audience, style, content and SEO constraints plus a conflict
//! report. External models are tried first; local regex heuristics fill
//! gaps and take over when every model fails.

pub mod cache;
pub mod extractor;
pub mod failures;
pub mod json_recovery;
pub mod length;
pub mod parser;
pub mod types;
pub mod validation;

pub use cache::{WorkflowCache, normalize_instruction};
pub use extractor::{FALLBACK_MODEL, fallback_workflow};
pub use failures::ModelFailureTracker;
pub use length::extract_length_constraint;
pub use parser::InstructionParser;
pub use types::{
    Audience, Conflict, ConflictKind, ConstraintPriority, ConstraintReport, ConstraintType,
    ContentConstraints, LengthConstraint, SeoConstraints, StyleConstraints, Workflow,
    WorkflowMetadata,
};
pub use validation::validate_constraints;
