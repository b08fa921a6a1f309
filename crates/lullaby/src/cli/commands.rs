//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Lullaby - bedtime stories planned, drafted and polished by an LLM
#[derive(Parser, Debug)]
#[command(name = "lullaby")]
#[command(about = "Bedtime stories planned, drafted and polished by an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print word targets and paragraph guidance for a listening time
    Targets {
        /// Listening time in minutes
        #[arg(long)]
        minutes: f64,
    },

    /// Print the prompt a phase would send
    Prompt {
        /// Path to the story request TOML file
        #[arg(long)]
        request: PathBuf,

        /// Which prompt to build
        #[arg(long, default_value = "outline")]
        phase: PromptKind,
    },

    /// Report repetition in a manuscript
    Check {
        /// Path to the manuscript text file
        file: PathBuf,

        /// Also print the text with a duplicated ending collapsed
        #[arg(long)]
        cleanup: bool,
    },

    /// Generate a story against the configured model
    Generate {
        /// Path to the story request TOML file
        #[arg(long)]
        request: PathBuf,

        /// Configuration file, layered over the bundled defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the manuscript here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Prompts the `prompt` command can print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptKind {
    /// Six-beat JSON beat sheet
    Outline,
    /// Labelled draft
    Draft,
    /// Labelled final manuscript
    Final,
    /// Full outline object used by `generate`
    Plan,
}

/// Output format for generated stories
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The manuscript only
    Text,
    /// The whole run as JSON
    Json,
}
