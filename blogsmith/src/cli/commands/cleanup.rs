//! Cleanup command

use super::AppContext;
use crate::cli::app::CleanupArgs;
use anyhow::Result;

pub async fn execute(context: &AppContext, args: CleanupArgs) -> Result<()> {
    let keep = args.keep.unwrap_or(context.config.store.keep);
    let removed = context.store().cleanup(keep).await?;

    if removed.is_empty() {
        println!(" Nothing to clean up, at most {} posts present", keep);
    } else {
        for path in &removed {
            println!("  Removed {}", path.display());
        }
        println!(" Removed {} posts, kept the newest {}", removed.len(), keep);
    }

    Ok(())
}
