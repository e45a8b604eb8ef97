//! SEO analysis and scoring
//!
//! Text metrics feed a fixed four-part rubric (word count, keyword density,
//! heading structure, readability). The optimizer also synthesizes meta tags,
//! social cards and JSON-LD for the scored body.

pub mod meta;
pub mod metrics;
pub mod optimizer;
pub mod scoring;

pub use meta::{MetaBundle, MetaTag, PostMetadata};
pub use optimizer::{OptimizationResult, SeoOptimizer};
pub use scoring::{Grade, SeoScore, Suggestion, SuggestionPriority, SuggestionType};

use metrics::{ContentStructure, HeadingStructure, InternalLinks, KeywordAnalysis, Readability};
use serde::{Deserialize, Serialize};

/// All metrics for one body and primary keyword; recomputed on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoAnalysis {
    pub word_count: usize,
    pub keyword_analysis: KeywordAnalysis,
    pub heading_structure: HeadingStructure,
    pub readability: Readability,
    pub internal_links: InternalLinks,
    pub content_structure: ContentStructure,
}
