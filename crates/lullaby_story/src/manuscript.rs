//! Pulling the story body out of a labelled model answer.

use lullaby_core::Phase;
use lullaby_error::{StoryError, StoryErrorKind};
use regex::Regex;
use std::sync::LazyLock;

static STORY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(draft_story|final_story)[*_ \t]*:[*_]*").expect("Valid story label regex")
});

/// Strip the phase label from a model answer and return the story body.
///
/// The label may be preceded by chatter or markdown emphasis and may differ
/// in case (`**Final_Story:**`). An answer without the label is accepted as
/// the whole body. Phases without a label only have the text trimmed.
///
/// # Errors
///
/// Returns `StoryErrorKind::EmptyManuscript` if no story text remains.
///
/// # Examples
///
/// ```
/// use lullaby_core::Phase;
/// use lullaby_story::extract_manuscript;
///
/// let body = extract_manuscript("**DRAFT_STORY:** Once upon a time.", Phase::Draft).unwrap();
/// assert_eq!(body, "Once upon a time.");
/// ```
pub fn extract_manuscript(text: &str, phase: Phase) -> Result<String, StoryError> {
    let body = match phase.label() {
        None => text,
        Some(label) => {
            let name = label.trim_end_matches(':');
            let found = STORY_LABEL
                .captures_iter(text)
                .find(|caps| caps[1].eq_ignore_ascii_case(name));
            match found.and_then(|caps| caps.get(0)) {
                Some(m) => &text[m.end()..],
                None => {
                    tracing::warn!(phase = %phase, "Answer is missing its story label");
                    text
                }
            }
        }
    };

    let body = body.trim();
    if body.is_empty() {
        return Err(StoryError::new(StoryErrorKind::EmptyManuscript(
            phase.to_string(),
        )));
    }
    Ok(body.to_string())
}
