//! Story pipeline error types.

/// Specific error conditions raised while running the generation phases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryErrorKind {
    /// A model call for the named phase failed
    #[display("Phase '{}' failed: {}", phase, message)]
    PhaseFailed {
        /// Phase name (outline, draft, final, repair)
        phase: String,
        /// Underlying failure
        message: String,
    },
    /// Structured output was still invalid after the single repair attempt
    #[display("Structured output rejected during {}: {}", stage, detail)]
    OutlineRejected {
        /// Stage that rejected the payload (syntax or schema)
        stage: String,
        /// Parser message or joined field issues
        detail: String,
        /// The offending text
        text: String,
    },
    /// The model answered without any story text
    #[display("Phase '{}' returned no story text", _0)]
    EmptyManuscript(String),
}

/// Error type for story pipeline operations.
///
/// # Examples
///
/// ```
/// use lullaby_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::EmptyManuscript("draft".to_string()));
/// assert!(format!("{}", err).contains("draft"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryErrorKind {
        &self.kind
    }
}
