//! Lullaby - bedtime stories from an LLM
//!
//! Lullaby turns a small structured request (audience age, main character,
//! setting, length, style) into a finished children's bedtime story by
//! running three model calls: a JSON outline, a draft, and a polishing pass.
//! Between calls it validates and repairs the outline, strips the phase
//! labels, collapses duplicated endings and measures repetition.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lullaby::{LullabyConfig, StoryPipeline, StoryRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LullabyConfig::load()?;
//!     let input = StoryRequest::from_file("fox.toml")?.into_input()?;
//!
//!     let pipeline = StoryPipeline::with_options(config.client()?, config.pipeline_options());
//!     let run = pipeline.run(&input).await?;
//!     println!("{}", run.manuscript);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `lullaby_error` - Error types
//! - `lullaby_core` - Story input, outline and request types
//! - `lullaby_interface` - `StoryDriver` and `Repairer` traits
//! - `lullaby_story` - Prompts, outline parsing, repetition checks, pipeline
//! - `lullaby_models` - OpenAI-compatible chat-completions client
//!
//! This crate re-exports everything for convenience and adds layered
//! configuration plus the `lullaby` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod request;

pub use config::{DriverConfig, LullabyConfig, PhasesConfig, QualityConfig};
pub use request::StoryRequest;

pub use lullaby_error::{
    BuilderError, BuilderErrorKind, ConfigError, HttpError, InputError, InputErrorKind,
    JsonError, LullabyError, LullabyErrorKind, LullabyResult, ModelsError, ModelsErrorKind,
    StoryError, StoryErrorKind,
};

pub use lullaby_core::{
    AgeRange, Beat, BeatSheet, BeatSummary, Character, GenerateRequest, LengthVerdict, Message,
    Outline, ParseResult, Phase, REPETITION_THRESHOLD, RepetitionReport, ResponseFormat, Role,
    SCENE_COUNT, Scene, StoryStyle, StructuredStoryInput, WordTargets, check_length, count_words,
    get_paragraph_guidance, get_word_targets,
};

pub use lullaby_interface::{Repairer, StoryDriver};

pub use lullaby_story::{
    DraftOutcome, DriverRepairer, FieldIssue, FinalOutcome, FinalPassPolicy, PhaseContext,
    PhaseSettings, PipelineOptions, SYSTEM_PROMPT, StoryPipeline, StoryRun, Validation,
    build_outline_plan_prompt, build_phase_prompt, build_phase_prompt_with, build_repair_prompt,
    cleanup_trailing_duplicate_ending_paragraphs, detect_repetition, extract_manuscript,
    parse_beat_sheet_strict, parse_outline_strict, validate_beat_sheet, validate_outline,
};

pub use lullaby_models::OpenAICompatibleClient;
