use anyhow::Result;
use blogsmith_core::LLMError;
use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::commands::AppContext;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    // Parse CLI arguments first to get verbosity level
    let cli = Cli::parse();

    // Initialize tracing with appropriate verbosity
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if let Some(remedy) = e.downcast_ref::<LLMError>().and_then(LLMError::remedy) {
                eprintln!("Hint: {remedy}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let context = AppContext::load(cli.config.as_deref())?;
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Generate(args) => {
            info!("Generate command: {:?}", args);
            runtime.block_on(cli::commands::generate::execute(&context, args))
        }
        Commands::Analyze(args) => {
            info!("Analyze command: {:?}", args);
            runtime.block_on(cli::commands::analyze::execute(&context, args))
        }
        Commands::Rewrite(args) => {
            info!("Rewrite command: {:?}", args);
            runtime.block_on(cli::commands::rewrite::execute(&context, args))
        }
        Commands::List => runtime.block_on(cli::commands::list::execute(&context)),
        Commands::Cleanup(args) => {
            info!("Cleanup command: {:?}", args);
            runtime.block_on(cli::commands::cleanup::execute(&context, args))
        }
        Commands::Info(args) => cli::commands::info::execute(&context, args),
    }
}
