//! Info command

use super::AppContext;
use crate::cli::app::InfoArgs;
use anyhow::Result;

pub fn execute(context: &AppContext, args: InfoArgs) -> Result<()> {
    let config = &context.config;

    println!(" Blogsmith {}", env!("CARGO_PKG_VERSION"));
    match &context.config_path {
        Some(path) => println!("  Config: {}", path.display()),
        None => println!("  Config: built-in defaults"),
    }

    println!("\n API:");
    println!("  Endpoint: {}", config.api.base_url);
    println!(
        "  Key ({}): {}",
        config.api.api_key_env,
        if config.api_key().is_ok() { "set" } else { "missing" }
    );
    println!("  Generation models: {}", config.api.generation_models.join(" -> "));
    println!("  Parsing models: {}", config.api.parsing_models.join(" -> "));
    println!("  Retry delay: {} ms", config.api.retry_delay_ms);

    println!("\n Site:");
    println!("  Name: {}", config.site.name);
    println!("  URL: {}", config.site.base_url());
    println!("  Default keywords: {}", config.site.default_keywords.join(", "));

    println!("\n Store:");
    println!("  Output directory: {}", config.store.output_dir.display());
    println!("  Keep: {}", config.store.keep);

    if let Some(path) = args.save {
        config.save(&path)?;
        println!("\n Configuration written to {}", path.display());
    }

    Ok(())
}
