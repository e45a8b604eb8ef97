//! Generate command - instruction to saved post

use super::{AppContext, print_report};
use crate::cli::app::GenerateArgs;
use anyhow::Result;
use blogsmith_core::instructions::Workflow;
use blogsmith_core::seo::PostMetadata;
use blogsmith_core::seo::meta::first_heading;
use blogsmith_core::{ContentGenerator, InstructionParser, PostFrontMatter};

pub async fn execute(context: &AppContext, args: GenerateArgs) -> Result<()> {
    let instruction = args.instruction.join(" ");
    let provider = context.provider()?;
    let api = &context.config.api;

    println!(" Parsing instruction: {}", instruction);
    let parser = InstructionParser::new(provider.clone(), api.parsing_models.clone());
    let workflow = parser.parse(&instruction).await;
    print_workflow(&workflow);

    println!("\n Generating content...");
    let generator = ContentGenerator::from_config(provider, api);
    let generated = generator.generate(&workflow).await?;
    let draft = &generated.draft;

    println!("  Model: {}", draft.model_used);
    println!("  Words: {}", draft.word_count);
    if generated.trimmed {
        println!(
            "  Trimmed from {} words to honor the limit",
            generated.original_word_count
        );
    }

    let keyword = args.keyword.unwrap_or_else(|| workflow.primary_keyword().to_string());
    let metadata = PostMetadata {
        title: first_heading(&draft.body),
        content_type: Some(workflow.content_type.clone()),
        published_at: Some(draft.generated_at),
    };
    let result = context.optimizer().optimize_content(&draft.body, &keyword, &metadata);
    print_report(&result);

    if args.dry_run {
        println!("\n--- Dry run, post not saved ---\n");
        println!("{}", draft.body);
        return Ok(());
    }

    let front_matter = PostFrontMatter::from_draft(draft, &result);
    let path = context.store().save(&front_matter, &draft.body).await?;
    println!("\n Saved: {}", path.display());

    Ok(())
}

fn print_workflow(workflow: &Workflow) {
    let length = &workflow.length_constraints;
    println!("  Topic: {}", workflow.topic);
    println!("  Type: {}", workflow.content_type);
    println!("  Audience: {}", workflow.audience.level);
    match length.word_limit {
        Some(limit) => println!(
            "  Length: {} {} words ({})",
            length.constraint_type, limit, length.priority
        ),
        None => println!("  Length: not specified"),
    }
    if !workflow.seo_constraints.primary_keywords.is_empty() {
        println!("  Keywords: {}", workflow.seo_constraints.primary_keywords.join(", "));
    }
    if workflow.metadata.fallback_used {
        println!("  Parsed locally (no parsing model available)");
    } else {
        println!("  Parsed by: {}", workflow.metadata.model_used);
    }

    let report = &workflow.conflicts;
    for conflict in &report.conflicts {
        println!("   Conflict: {} ({})", conflict.message, conflict.suggestion);
    }
    for warning in &report.warnings {
        println!("   Warning: {}", warning);
    }
    for issue in &report.critical_issues {
        println!("   Critical: {}", issue);
    }
}
