//! The structured story plan produced by the outline phase.

use crate::Beat;
use serde::{Deserialize, Serialize};

/// Number of scenes every outline must contain, one per beat.
pub const SCENE_COUNT: usize = 6;

/// A validated narrative plan.
///
/// Outlines are only produced by schema validation of model output; once
/// built they are never modified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Outline {
    /// Story title
    pub title: String,
    /// Free-text audience description, e.g. "ages 4-7"
    pub target_audience: String,
    /// Overall tone
    pub tone: String,
    /// The small cast, main character first
    pub characters: Vec<Character>,
    /// Where the story takes place
    pub setting: String,
    /// Exactly six scenes in beat order
    pub scenes: Vec<Scene>,
    /// How the ending pays off the goal
    pub ending_payoff: String,
    /// One-sentence theme statement
    pub theme: String,
}

/// A member of the cast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Character {
    /// Character name
    pub name: String,
    /// Defining traits
    pub traits: Vec<String>,
    /// Relationship to the main character
    pub relationship: String,
}

/// One beat of the outline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Position in the story, 1 through 6
    pub scene_id: u8,
    /// What the scene must accomplish
    pub scene_goal: String,
    /// Something new that happens
    pub new_event: String,
    /// A new sensory or concrete detail
    pub new_detail: String,
    /// How the situation turns
    pub conflict_turn: String,
    /// Small reward closing the scene
    pub mini_payoff: String,
}

impl Outline {
    /// The beat each scene covers, paired with the scene.
    pub fn beats(&self) -> impl Iterator<Item = (Beat, &Scene)> {
        use strum::IntoEnumIterator;
        Beat::iter().zip(self.scenes.iter())
    }
}

/// One entry of a beat sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeatSummary {
    /// Which beat this entry covers
    pub beat: Beat,
    /// What happens in the beat
    pub summary: String,
}

/// The six-beat array requested by the outline-phase prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeatSheet(pub Vec<BeatSummary>);

impl BeatSheet {
    /// The entries in beat order.
    pub fn beats(&self) -> &[BeatSummary] {
        &self.0
    }
}
