//! Generation phases and narrative beats.

use lullaby_error::{InputError, InputErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One prompt and response cycle of the pipeline.
///
/// # Examples
///
/// ```
/// use lullaby_core::Phase;
///
/// assert_eq!(Phase::Draft.label(), Some("DRAFT_STORY:"));
/// assert_eq!(Phase::Outline.label(), None);
/// assert_eq!("final".parse::<Phase>().unwrap(), Phase::Final);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Plan the story structure
    #[display("outline")]
    Outline,
    /// Write the first full draft
    #[display("draft")]
    Draft,
    /// Edit the draft into the finished manuscript
    #[display("final")]
    Final,
}

impl Phase {
    /// The literal label the model must open its answer with, if any.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Phase::Outline => None,
            Phase::Draft => Some("DRAFT_STORY:"),
            Phase::Final => Some("FINAL_STORY:"),
        }
    }
}

impl FromStr for Phase {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "outline" => Ok(Phase::Outline),
            "draft" => Ok(Phase::Draft),
            "final" => Ok(Phase::Final),
            _ => Err(InputError::new(InputErrorKind::UnknownPhase(s.to_string()))),
        }
    }
}

/// The six fixed narrative stages, in story order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Beat {
    /// Opening image that draws the listener in
    Hook,
    /// What the main character wants
    Goal,
    /// What stands in the way
    Obstacle,
    /// First try, which falls short
    Attempt1,
    /// Second try, informed by the first
    Attempt2,
    /// Peak moment and calm resolution
    #[display("Climax+Resolution")]
    #[serde(rename = "Climax+Resolution")]
    ClimaxResolution,
}
