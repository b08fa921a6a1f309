//! Story input validation errors.
//!
//! These are raised before any prompt is built, so a rejected input never
//! reaches a model.

/// Specific input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum InputErrorKind {
    /// Age range not in the supported set
    #[display("Unsupported age range '{}' (expected 3-4, 5-6, 7-8 or 9-10)", _0)]
    UnknownAgeRange(String),
    /// Style not in the supported set
    #[display("Unsupported style '{}' (expected Plain & Clear, A Little Playful or Poetic)", _0)]
    UnknownStyle(String),
    /// Phase name not recognized
    #[display("Unknown phase '{}'", _0)]
    UnknownPhase(String),
    /// Requested length outside the accepted bounds
    #[display("Length of {} words is outside {}..={}", words, min, max)]
    LengthOutOfRange {
        /// Requested word count
        words: u32,
        /// Smallest accepted length
        min: u32,
        /// Largest accepted length
        max: u32,
    },
    /// Requested duration is not a usable number of minutes
    #[display("Invalid duration: {} minutes", _0)]
    InvalidMinutes(String),
    /// Required text field was blank
    #[display("Field '{}' must not be blank", _0)]
    BlankField(String),
    /// Required field was never set
    #[display("Missing required field: {}", _0)]
    MissingField(String),
}

/// Input validation error with location tracking.
///
/// # Examples
///
/// ```
/// use lullaby_error::{InputError, InputErrorKind};
///
/// let err = InputError::new(InputErrorKind::BlankField("setting".to_string()));
/// assert!(format!("{}", err).contains("setting"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Input Error: {} at line {} in {}", kind, line, file)]
pub struct InputError {
    /// The specific error condition
    pub kind: InputErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl InputError {
    /// Create a new InputError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: InputErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &InputErrorKind {
        &self.kind
    }
}
