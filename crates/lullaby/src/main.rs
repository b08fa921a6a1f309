//! Lullaby CLI binary.
//!
//! This binary provides command-line access to the story pipeline:
//! - Preview word targets and prompts
//! - Check a manuscript for repetition
//! - Generate a story against an OpenAI-compatible endpoint

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, check_manuscript, generate_story, print_prompt, print_targets};

    // API keys may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Targets { minutes } => {
            print_targets(minutes)?;
        }

        Commands::Prompt { request, phase } => {
            print_prompt(&request, phase)?;
        }

        Commands::Check { file, cleanup } => {
            check_manuscript(&file, cleanup)?;
        }

        Commands::Generate {
            request,
            config,
            out,
            format,
        } => {
            generate_story(&request, config.as_deref(), out.as_deref(), format).await?;
        }
    }

    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Logs go to stderr so stdout carries only story output
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
