//! Core functionality for blogsmith
//!
//! This crate contains the content pipeline behind the `blogsmith` tool:
//! instruction parsing, generation through an external text service,
//! heuristic SEO scoring, and post persistence.

pub mod config;
pub mod generation;
pub mod instructions;
pub mod llm;
pub mod seo;
pub mod store;

pub use config::Config;
pub use generation::{ContentDraft, ContentGenerator, GeneratedContent};
pub use instructions::{InstructionParser, Workflow};
pub use llm::{GeminiProvider, LLMError, TextGenerator};
pub use seo::{OptimizationResult, SeoOptimizer};
pub use store::{PostFrontMatter, PostStore, StoredPost};
