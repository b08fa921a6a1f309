//! Story generation pipeline for Lullaby.
//!
//! This crate turns a validated [`StructuredStoryInput`] into a bedtime story
//! in three phases: a structured outline, a draft that follows it, and a
//! polished final manuscript.
//!
//! # Features
//!
//! - **Phase prompts**: age-aware sentence ceilings and style rules
//! - **Strict parsing**: near-miss JSON tolerated, one repair round-trip at most
//! - **Schema validation**: field-level issues with paths
//! - **Repetition checks**: trigram ratio, repeated paragraphs, ending cleanup
//!
//! # Example
//!
//! ```rust,ignore
//! use lullaby_story::{StoryPipeline, StructuredStoryInput, AgeRange, StoryStyle};
//!
//! let input = StructuredStoryInput::builder()
//!     .age_range(AgeRange::FiveToSix)
//!     .main_character("Pip the hedgehog")
//!     .setting("a mossy forest")
//!     .minutes(5.0)
//!     .style(StoryStyle::ALittlePlayful)
//!     .build()?;
//!
//! let pipeline = StoryPipeline::new(driver);
//! let run = pipeline.run(&input).await?;
//! println!("{}", run.manuscript);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod manuscript;
mod options;
mod parser;
mod pipeline;
mod prompts;
mod repair;
mod repetition;
mod schema;

pub use extraction::{extract_json, parse_tolerant};
pub use manuscript::extract_manuscript;
pub use options::{FinalPassPolicy, PhaseSettings, PipelineOptions, PipelineOptionsBuilder};
pub use parser::{parse_beat_sheet_strict, parse_outline_strict};
pub use pipeline::{DraftOutcome, FinalOutcome, StoryPipeline, StoryRun};
pub use prompts::{
    PhaseContext, SYSTEM_PROMPT, build_outline_plan_prompt, build_phase_prompt,
    build_phase_prompt_with, build_repair_prompt,
};
pub use repair::DriverRepairer;
pub use repetition::{
    cleanup_trailing_duplicate_ending_paragraphs, detect_repetition, paragraphs,
};
pub use schema::{FieldIssue, Validation, validate_beat_sheet, validate_outline};

// Word budgeting and the shared value types live in lullaby_core.
pub use lullaby_core::{
    AgeRange, Outline, ParseResult, Phase, REPETITION_THRESHOLD, RepetitionReport, SCENE_COUNT,
    StoryStyle, StructuredStoryInput, WordTargets, count_words, get_paragraph_guidance,
    get_word_targets,
};
