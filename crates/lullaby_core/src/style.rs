//! Narration styles.

use lullaby_error::{InputError, InputErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of narration styles.
///
/// # Examples
///
/// ```
/// use lullaby_core::StoryStyle;
///
/// let style: StoryStyle = "a little playful".parse().unwrap();
/// assert_eq!(style, StoryStyle::ALittlePlayful);
/// assert_eq!(style.to_string(), "A Little Playful");
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
pub enum StoryStyle {
    /// Simple, literal language with no poetic devices
    #[display("Plain & Clear")]
    #[serde(rename = "Plain & Clear")]
    PlainAndClear,
    /// Occasional fun language, never overused
    #[display("A Little Playful")]
    #[serde(rename = "A Little Playful")]
    ALittlePlayful,
    /// Lyrical language with capped alliteration
    #[display("Poetic")]
    #[serde(rename = "Poetic")]
    Poetic,
}

impl FromStr for StoryStyle {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .replace("and", "&")
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '&')
            .collect();
        match normalized.as_str() {
            "plain&clear" | "plain" => Ok(StoryStyle::PlainAndClear),
            "alittleplayful" | "playful" => Ok(StoryStyle::ALittlePlayful),
            "poetic" => Ok(StoryStyle::Poetic),
            _ => Err(InputError::new(InputErrorKind::UnknownStyle(s.to_string()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn display_round_trips_through_from_str() {
        for style in StoryStyle::iter() {
            assert_eq!(style.to_string().parse::<StoryStyle>().unwrap(), style);
        }
    }

    #[test]
    fn accepts_loose_spellings() {
        assert_eq!(
            "plain and clear".parse::<StoryStyle>().unwrap(),
            StoryStyle::PlainAndClear
        );
        assert_eq!(
            "a_little_playful".parse::<StoryStyle>().unwrap(),
            StoryStyle::ALittlePlayful
        );
        assert_eq!("POETIC".parse::<StoryStyle>().unwrap(), StoryStyle::Poetic);
    }

    #[test]
    fn rejects_unknown_style() {
        assert!("gothic".parse::<StoryStyle>().is_err());
    }
}
