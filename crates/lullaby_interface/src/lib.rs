//! Trait definitions for the Lullaby story generation pipeline.
//!
//! The pipeline talks to the outside world through two seams: a
//! [`StoryDriver`] that turns a [`GenerateRequest`](lullaby_core::GenerateRequest)
//! into text, and a [`Repairer`] that is given one chance to fix malformed
//! structured output.

mod traits;

pub use traits::{Repairer, StoryDriver};
