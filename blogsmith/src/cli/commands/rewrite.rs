//! Rewrite command - improve a post against its suggestions

use super::{AppContext, print_report, resolve_keyword};
use crate::cli::app::RewriteArgs;
use anyhow::Result;
use blogsmith_core::seo::PostMetadata;
use blogsmith_core::seo::meta::first_heading;
use blogsmith_core::{ContentGenerator, PostFrontMatter, PostStore};

pub async fn execute(context: &AppContext, args: RewriteArgs) -> Result<()> {
    let post = PostStore::load(&args.file).await?;
    let keyword = resolve_keyword(args.keyword, &post)?;
    let optimizer = context.optimizer();

    let before = optimizer.optimize_content(&post.body, &keyword, &PostMetadata::default());
    println!(
        " Current score: {}/100 ({}), {} suggestions",
        before.score.score,
        before.score.grade,
        before.suggestions.len()
    );

    let topic = if post.front_matter.topic.is_empty() {
        keyword.clone()
    } else {
        post.front_matter.topic.clone()
    };

    println!(" Rewriting...");
    let generator = ContentGenerator::from_config(context.provider()?, &context.config.api);
    let draft = generator.rewrite(&post.body, &keyword, &before.suggestions, &topic).await?;

    let metadata = PostMetadata {
        title: first_heading(&draft.body),
        content_type: None,
        published_at: Some(draft.generated_at),
    };
    let after = optimizer.optimize_content(&draft.body, &keyword, &metadata);
    print_report(&after);
    println!(
        "\n Score: {} -> {} ({:+})",
        before.score.score,
        after.score.score,
        after.score.score as i64 - before.score.score as i64
    );

    let front_matter = PostFrontMatter::from_draft(&draft, &after);
    let path = context.store().save(&front_matter, &draft.body).await?;
    println!(" Saved: {}", path.display());

    Ok(())
}
