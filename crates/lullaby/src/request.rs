//! Story request files.

use lullaby_core::{AgeRange, StoryStyle, StructuredStoryInput};
use lullaby_error::{ConfigError, LullabyError, LullabyResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// A story request as written in a TOML file.
///
/// Exactly one of `length_words` or `minutes` is normally given; when both
/// are present the word count wins.
///
/// # Example
///
/// ```
/// use lullaby::StoryRequest;
///
/// let request: StoryRequest = toml::from_str(r#"
///     age_range = "5-6"
///     main_character = "a sleepy fox named Juniper"
///     setting = "a pine forest at dusk"
///     minutes = 5
///     style = "A Little Playful"
/// "#).unwrap();
///
/// let input = request.into_input().unwrap();
/// assert_eq!(*input.length_words(), 825);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoryRequest {
    /// Audience band such as "5-6"
    pub age_range: String,
    /// Who the story is about
    pub main_character: String,
    /// Where it takes place
    pub setting: String,
    /// Requested length in words
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_words: Option<u32>,
    /// Requested listening time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    /// Narration style such as "Poetic"
    pub style: String,
}

impl StoryRequest {
    /// Read and parse a request file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid request.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> LullabyResult<Self> {
        debug!("Loading story request");

        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LullabyError::from(ConfigError::new(format!(
                "Failed to read story request {}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
        toml::from_str(&text).map_err(|e| {
            LullabyError::from(ConfigError::new(format!(
                "Failed to parse story request: {}",
                e
            )))
        })
    }

    /// Validate the request into pipeline input.
    ///
    /// # Errors
    ///
    /// Returns an input error for unknown age bands or styles, blank text
    /// fields, and lengths outside the supported range.
    pub fn into_input(self) -> LullabyResult<StructuredStoryInput> {
        let age_range: AgeRange = self.age_range.parse()?;
        let style: StoryStyle = self.style.parse()?;

        let mut builder = StructuredStoryInput::builder()
            .age_range(age_range)
            .main_character(self.main_character)
            .setting(self.setting)
            .style(style);
        if let Some(words) = self.length_words {
            builder = builder.length_words(words);
        }
        if let Some(minutes) = self.minutes {
            builder = builder.minutes(minutes);
        }
        Ok(builder.build()?)
    }
}
