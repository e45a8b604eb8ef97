//! List command

use super::AppContext;
use anyhow::Result;

pub async fn execute(context: &AppContext) -> Result<()> {
    let store = context.store();
    let posts = store.list_posts().await?;

    if posts.is_empty() {
        println!(" No posts in {}", store.root().display());
        return Ok(());
    }

    println!(" {} posts in {}:\n", posts.len(), store.root().display());
    for post in &posts {
        let meta = &post.front_matter;
        let date = meta
            .generated_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown date".to_string());
        let title = if meta.title.is_empty() { "(untitled)" } else { meta.title.as_str() };
        let file = post.path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();

        println!("  {}  {} ({} words)", date, title, meta.word_count);
        println!("      {}", file);
    }

    Ok(())
}
