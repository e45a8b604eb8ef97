use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blogsmith",
    version,
    about = "Blogsmith - Generate, score and rewrite SEO blog posts",
    long_about = "Blogsmith turns a plain-language instruction into a blog post through the Gemini API, \
                  scores it against a fixed SEO rubric, and keeps the results as markdown files with front matter."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a post from an instruction
    #[command(about = "Parse an instruction, generate a post, score it and save it")]
    Generate(GenerateArgs),

    /// Analyze an existing post
    #[command(about = "Score a markdown post and print its SEO report")]
    Analyze(AnalyzeArgs),

    /// Rewrite an existing post
    #[command(about = "Rewrite a post against its SEO suggestions and save the result")]
    Rewrite(RewriteArgs),

    /// List generated posts
    #[command(about = "List saved posts, newest first")]
    List,

    /// Remove old posts
    #[command(about = "Delete all but the newest posts")]
    Cleanup(CleanupArgs),

    /// Show configuration
    #[command(about = "Show the active configuration and model chains")]
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Free-text instruction, e.g. "a guide to remote Rust jobs in under 800 words"
    #[arg(required = true, num_args = 1..)]
    pub instruction: Vec<String>,

    /// Primary keyword; defaults to the first keyword found in the instruction
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Print the result without saving it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Markdown file to analyze
    pub file: PathBuf,

    /// Primary keyword; defaults to the post's topic
    #[arg(short, long)]
    pub keyword: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RewriteArgs {
    /// Markdown file to rewrite
    pub file: PathBuf,

    /// Primary keyword; defaults to the post's topic
    #[arg(short, long)]
    pub keyword: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CleanupArgs {
    /// Number of posts to keep; defaults to store.keep from the config
    #[arg(short, long)]
    pub keep: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Also write the active configuration to this TOML file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_joins_words() {
        let cli = Cli::try_parse_from([
            "blogsmith", "-vv", "generate", "remote", "rust", "jobs", "--keyword", "rust jobs",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.instruction.join(" "), "remote rust jobs");
                assert_eq!(args.keyword.as_deref(), Some("rust jobs"));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_generate_requires_instruction() {
        assert!(Cli::try_parse_from(["blogsmith", "generate"]).is_err());
    }

    #[test]
    fn test_cleanup_and_global_config() {
        let cli =
            Cli::try_parse_from(["blogsmith", "cleanup", "--keep", "3", "--config", "b.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("b.toml")));
        match cli.command {
            Commands::Cleanup(args) => assert_eq!(args.keep, Some(3)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_info_save_path() {
        let cli = Cli::try_parse_from(["blogsmith", "info", "--save", "blogsmith.toml"]).unwrap();
        match cli.command {
            Commands::Info(args) => assert_eq!(args.save, Some(PathBuf::from("blogsmith.toml"))),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(matches!(
            Cli::try_parse_from(["blogsmith", "info"]).unwrap().command,
            Commands::Info(InfoArgs { save: None })
        ));
    }
}
