//! The validated story request.

use crate::{AgeRange, StoryStyle, get_word_targets};
use lullaby_error::{InputError, InputErrorKind};
use serde::Serialize;

/// Shortest story, in words, a caller may request.
pub const MIN_LENGTH_WORDS: u32 = 120;

/// Longest story, in words, a caller may request.
pub const MAX_LENGTH_WORDS: u32 = 6000;

/// Everything the pipeline needs to know about the story to write.
///
/// Only constructible through [`StructuredStoryInputBuilder::build`], so every
/// instance has a non-blank character and setting and an in-range length.
///
/// # Examples
///
/// ```
/// use lullaby_core::{AgeRange, StoryStyle, StructuredStoryInput};
///
/// let input = StructuredStoryInput::builder()
///     .age_range(AgeRange::FiveToSix)
///     .main_character("Pip the hedgehog")
///     .setting("a mossy forest at dusk")
///     .length_words(900)
///     .style(StoryStyle::PlainAndClear)
///     .build()
///     .unwrap();
///
/// assert_eq!(*input.length_words(), 900);
/// assert!(input.length_minutes().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
pub struct StructuredStoryInput {
    /// Audience age band
    age_range: AgeRange,
    /// Name (and optionally a short description) of the main character
    main_character: String,
    /// Where the story takes place
    setting: String,
    /// Requested length in words
    length_words: u32,
    /// Narration style
    style: StoryStyle,
    /// Requested listening time, when the length was derived from it
    length_minutes: Option<f64>,
}

impl StructuredStoryInput {
    /// Creates a new input builder.
    pub fn builder() -> StructuredStoryInputBuilder {
        StructuredStoryInputBuilder::default()
    }
}

/// Builder for `StructuredStoryInput`.
#[derive(Debug, Default, Clone)]
pub struct StructuredStoryInputBuilder {
    age_range: Option<AgeRange>,
    main_character: Option<String>,
    setting: Option<String>,
    length_words: Option<u32>,
    minutes: Option<f64>,
    style: Option<StoryStyle>,
}

impl StructuredStoryInputBuilder {
    /// Sets the age band.
    pub fn age_range(mut self, value: AgeRange) -> Self {
        self.age_range = Some(value);
        self
    }

    /// Sets the main character.
    pub fn main_character(mut self, value: impl Into<String>) -> Self {
        self.main_character = Some(value.into());
        self
    }

    /// Sets the setting description.
    pub fn setting(mut self, value: impl Into<String>) -> Self {
        self.setting = Some(value.into());
        self
    }

    /// Sets the requested length in words.
    pub fn length_words(mut self, value: u32) -> Self {
        self.length_words = Some(value);
        self
    }

    /// Derives the length from a listening time in minutes.
    ///
    /// An explicit `length_words` still wins; the minutes are kept for
    /// paragraph guidance either way.
    pub fn minutes(mut self, value: f64) -> Self {
        self.minutes = Some(value);
        self
    }

    /// Sets the narration style.
    pub fn style(mut self, value: StoryStyle) -> Self {
        self.style = Some(value);
        self
    }

    /// Validates and builds the input.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, a text field is
    /// blank, the minutes are not a positive finite number, or the length is
    /// outside `MIN_LENGTH_WORDS..=MAX_LENGTH_WORDS`.
    pub fn build(self) -> Result<StructuredStoryInput, InputError> {
        let age_range = self.age_range.ok_or_else(|| missing("age_range"))?;
        let style = self.style.ok_or_else(|| missing("style"))?;
        let main_character = non_blank("main_character", self.main_character)?;
        let setting = non_blank("setting", self.setting)?;

        if let Some(minutes) = self.minutes {
            if !minutes.is_finite() || minutes <= 0.0 {
                return Err(InputError::new(InputErrorKind::InvalidMinutes(
                    minutes.to_string(),
                )));
            }
        }

        let length_words = match (self.length_words, self.minutes) {
            (Some(words), _) => words,
            (None, Some(minutes)) => get_word_targets(minutes).target,
            (None, None) => return Err(missing("length_words")),
        };
        if !(MIN_LENGTH_WORDS..=MAX_LENGTH_WORDS).contains(&length_words) {
            return Err(InputError::new(InputErrorKind::LengthOutOfRange {
                words: length_words,
                min: MIN_LENGTH_WORDS,
                max: MAX_LENGTH_WORDS,
            }));
        }

        Ok(StructuredStoryInput {
            age_range,
            main_character,
            setting,
            length_words,
            style,
            length_minutes: self.minutes,
        })
    }
}

#[track_caller]
fn missing(field: &str) -> InputError {
    InputError::new(InputErrorKind::MissingField(field.to_string()))
}

fn non_blank(field: &str, value: Option<String>) -> Result<String, InputError> {
    let value = value.ok_or_else(|| missing(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::new(InputErrorKind::BlankField(field.to_string())));
    }
    Ok(trimmed.to_string())
}
