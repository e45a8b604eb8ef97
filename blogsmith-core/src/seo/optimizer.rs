//! Entry point of the SEO engine

use super::meta::{MetaBundle, PostMetadata, build_meta};
use super::metrics;
use super::scoring::{SeoScore, Suggestion, calculate_score, generate_suggestions};
use super::SeoAnalysis;
use crate::config::SiteConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Analysis, score, suggestions and meta for one body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub analysis: SeoAnalysis,
    pub score: SeoScore,
    pub suggestions: Vec<Suggestion>,
    pub meta: MetaBundle,
}

/// Scores bodies against the rubric for one site
#[derive(Debug, Clone)]
pub struct SeoOptimizer {
    site: SiteConfig,
}

impl SeoOptimizer {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    /// Run every text metric over `body`
    pub fn analyze(&self, body: &str, primary_keyword: &str) -> SeoAnalysis {
        SeoAnalysis {
            word_count: metrics::word_count(body),
            keyword_analysis: metrics::keyword_analysis(
                body,
                primary_keyword,
                &self.site.default_keywords,
            ),
            heading_structure: metrics::heading_counts(body),
            readability: metrics::readability(body),
            internal_links: metrics::internal_link_count(body, self.site.base_url()),
            content_structure: metrics::content_structure(body),
        }
    }

    /// Analyze, score, suggest and build meta. Never fails; missing structure
    /// falls back to default strings.
    pub fn optimize_content(
        &self,
        body: &str,
        primary_keyword: &str,
        metadata: &PostMetadata,
    ) -> OptimizationResult {
        let analysis = self.analyze(body, primary_keyword);
        let score = calculate_score(&analysis);
        let suggestions = generate_suggestions(&analysis);
        let meta = build_meta(body, primary_keyword, metadata, &self.site);

        debug!(
            "Scored {} words for '{}': {} ({}), {} suggestions",
            analysis.word_count,
            primary_keyword,
            score.score,
            score.grade,
            suggestions.len()
        );

        OptimizationResult { analysis, score, suggestions, meta }
    }
}
