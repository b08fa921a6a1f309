//! Audience age bands.

use lullaby_error::{InputError, InputErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of audience age bands a story can target.
///
/// # Examples
///
/// ```
/// use lullaby_core::AgeRange;
///
/// let age: AgeRange = "5-6".parse().unwrap();
/// assert_eq!(age, AgeRange::FiveToSix);
/// assert_eq!(age.max_sentence_words(), 16);
/// assert_eq!(format!("{}", age), "5-6");
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
pub enum AgeRange {
    /// Ages 3 to 4
    #[display("3-4")]
    #[serde(rename = "3-4")]
    ThreeToFour,
    /// Ages 5 to 6
    #[display("5-6")]
    #[serde(rename = "5-6")]
    FiveToSix,
    /// Ages 7 to 8
    #[display("7-8")]
    #[serde(rename = "7-8")]
    SevenToEight,
    /// Ages 9 to 10
    #[display("9-10")]
    #[serde(rename = "9-10")]
    NineToTen,
}

impl AgeRange {
    /// Longest sentence, in words, a story for this band may use.
    pub fn max_sentence_words(self) -> u32 {
        match self {
            AgeRange::ThreeToFour => 12,
            AgeRange::FiveToSix => 16,
            AgeRange::SevenToEight => 20,
            AgeRange::NineToTen => 24,
        }
    }
}

impl FromStr for AgeRange {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_lowercase()
            .trim_start_matches("ages")
            .trim()
            .replace(['–', '—'], "-")
            .replace(' ', "");
        match normalized.as_str() {
            "3-4" => Ok(AgeRange::ThreeToFour),
            "5-6" => Ok(AgeRange::FiveToSix),
            "7-8" => Ok(AgeRange::SevenToEight),
            "9-10" => Ok(AgeRange::NineToTen),
            _ => Err(InputError::new(InputErrorKind::UnknownAgeRange(
                s.to_string(),
            ))),
        }
    }
}
