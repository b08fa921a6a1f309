//! Core data types for the Lullaby story generation pipeline.
//!
//! This crate provides the value types shared by every phase: the validated
//! story request, the closed rule enumerations, the outline the model plans
//! with, and the request shape sent to model drivers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod age;
mod input;
mod message;
mod outline;
mod parse_result;
mod phase;
mod report;
mod request;
mod role;
mod style;
mod targets;

pub use age::AgeRange;
pub use input::{
    MAX_LENGTH_WORDS, MIN_LENGTH_WORDS, StructuredStoryInput, StructuredStoryInputBuilder,
};
pub use message::Message;
pub use outline::{BeatSheet, BeatSummary, Character, Outline, SCENE_COUNT, Scene};
pub use parse_result::ParseResult;
pub use phase::{Beat, Phase};
pub use report::{REPETITION_THRESHOLD, RepetitionReport};
pub use request::{GenerateRequest, GenerateRequestBuilder, ResponseFormat};
pub use role::Role;
pub use style::StoryStyle;
pub use targets::{
    LengthVerdict, WordTargets, check_length, count_words, get_paragraph_guidance,
    get_word_targets,
};
