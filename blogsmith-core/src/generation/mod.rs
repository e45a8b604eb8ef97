//! Content generation: prompt building, model fallback and trimming

pub mod orchestrator;
pub mod prompts;
pub mod trim;

pub use orchestrator::{ContentDraft, ContentGenerator, GeneratedContent};
pub use prompts::ContentPrompts;
pub use trim::trim_to_word_limit;
