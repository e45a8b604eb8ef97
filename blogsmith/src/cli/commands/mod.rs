//! Command handlers and the state they share

pub mod analyze;
pub mod cleanup;
pub mod generate;
pub mod info;
pub mod list;
pub mod rewrite;

use anyhow::{Result, bail};
use blogsmith_core::seo::meta::first_heading;
use blogsmith_core::{
    Config, GeminiProvider, OptimizationResult, PostStore, SeoOptimizer, StoredPost, TextGenerator,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loaded configuration plus where it came from
pub struct AppContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl AppContext {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (config, config_path) = Config::load(explicit)?;
        Ok(Self { config, config_path })
    }

    /// Gemini client; fails fast when the API key is missing
    pub fn provider(&self) -> Result<Arc<dyn TextGenerator>> {
        let api_key = self.config.api_key()?;
        Ok(Arc::new(GeminiProvider::new(&self.config.api, api_key)?))
    }

    pub fn store(&self) -> PostStore {
        PostStore::new(self.config.store.output_dir.clone())
    }

    pub fn optimizer(&self) -> SeoOptimizer {
        SeoOptimizer::new(self.config.site.clone())
    }
}

/// Keyword for a stored post: explicit, then topic, then title
pub fn resolve_keyword(explicit: Option<String>, post: &StoredPost) -> Result<String> {
    let candidates = [
        explicit,
        Some(post.front_matter.topic.clone()),
        first_heading(&post.body),
    ];
    match candidates.into_iter().flatten().map(|k| k.trim().to_string()).find(|k| !k.is_empty()) {
        Some(keyword) => Ok(keyword),
        None => bail!(
            "No primary keyword for {}; pass one with --keyword",
            post.path.display()
        ),
    }
}

/// Print score, breakdown and suggestions
pub fn print_report(result: &OptimizationResult) {
    let score = &result.score;
    let analysis = &result.analysis;
    let primary = &analysis.keyword_analysis.primary;

    println!("\n SEO score: {}/100 ({})", score.score, score.grade);
    println!(
        "  Word count {}/25 | Keywords {}/25 | Headings {}/25 | Readability {}/25",
        score.breakdown.word_count,
        score.breakdown.keywords,
        score.breakdown.headings,
        score.breakdown.readability
    );

    println!("\n Analysis:");
    println!("  Words: {}", analysis.word_count);
    println!(
        "  Keyword \"{}\": {} occurrences, {:.2}% density{}",
        primary.keyword,
        primary.count,
        primary.density,
        if primary.optimal { " (optimal)" } else { "" }
    );
    let headings = &analysis.heading_structure;
    println!(
        "  Headings: H1 {} | H2 {} | H3 {} | H4 {}{}",
        headings.h1,
        headings.h2,
        headings.h3,
        headings.h4,
        if headings.proper_structure { " (proper structure)" } else { "" }
    );
    println!(
        "  Readability: {:.0} ({})",
        analysis.readability.readability_score,
        analysis.readability.grade.label()
    );
    println!("  Internal links: {}", analysis.internal_links.count);

    let related: Vec<String> = analysis
        .keyword_analysis
        .related
        .iter()
        .filter(|k| k.count > 0)
        .map(|k| format!("{} ({})", k.keyword, k.count))
        .collect();
    if !related.is_empty() {
        println!("  Related keywords: {}", related.join(", "));
    }

    if result.suggestions.is_empty() {
        println!("\n No suggestions, the post meets every check");
    } else {
        println!("\n Suggestions:");
        for suggestion in &result.suggestions {
            println!("  [{}] {}", suggestion.priority, suggestion.message);
        }
    }

    println!("\n Meta:");
    println!("  Title: {}", result.meta.title);
    println!("  Description: {}", result.meta.description);
    println!("  URL: {}", result.meta.canonical_url);
}
