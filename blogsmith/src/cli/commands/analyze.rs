//! Analyze command - score an existing post

use super::{AppContext, print_report, resolve_keyword};
use crate::cli::app::AnalyzeArgs;
use anyhow::Result;
use blogsmith_core::PostStore;
use blogsmith_core::seo::PostMetadata;

pub async fn execute(context: &AppContext, args: AnalyzeArgs) -> Result<()> {
    println!(" Analyzing: {}", args.file.display());

    let post = PostStore::load(&args.file).await?;
    let keyword = resolve_keyword(args.keyword, &post)?;

    let metadata = PostMetadata {
        title: Some(post.front_matter.title.clone()).filter(|t| !t.is_empty()),
        content_type: None,
        published_at: post.front_matter.generated_at,
    };
    let result = context.optimizer().optimize_content(&post.body, &keyword, &metadata);
    print_report(&result);

    Ok(())
}
