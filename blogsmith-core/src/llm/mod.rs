//! Integration with the external text-generation service
//!
//! The core only depends on [`TextGenerator`]; [`GeminiProvider`] is the
//! production implementation.

pub mod errors;
pub mod gemini;
pub mod mock;
pub mod provider;

pub use errors::{ErrorKind, LLMError, LLMResult};
pub use gemini::GeminiProvider;
pub use provider::TextGenerator;
