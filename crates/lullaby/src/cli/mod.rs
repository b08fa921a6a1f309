//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the lullaby binary.

mod commands;
mod inspect;
mod run;

pub use commands::{Cli, Commands, OutputFormat, PromptKind};
pub use inspect::{check_manuscript, print_prompt, print_targets};
pub use run::generate_story;
