//! Errors from `derive_builder` builders.
//!
//! Builders in the workspace declare `build_fn(error = "BuilderError")`, so
//! a failed `build()` lifts into [`crate::LullabyError`] with `?`.

/// Why a builder refused to build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A field without a default was never set
    #[display("Field '{}' was never set", _0)]
    MissingField(String),

    /// A builder's validation hook rejected the values
    #[display("Rejected values: {}", _0)]
    ValidationFailed(String),
}

/// Builder failure with the location that raised it.
///
/// # Examples
///
/// ```
/// use derive_builder::UninitializedFieldError;
/// use lullaby_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::from(UninitializedFieldError::new("model"));
/// assert_eq!(err.kind(), &BuilderErrorKind::MissingField("model".to_string()));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    /// The specific failure
    pub kind: BuilderErrorKind,
    /// Line number where the error was raised
    pub line: u32,
    /// Source file where the error was raised
    pub file: &'static str,
}

impl BuilderError {
    /// Create a builder error at the caller's location.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The specific failure.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    #[track_caller]
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::new(BuilderErrorKind::MissingField(err.field_name().to_string()))
    }
}

/// Messages returned by builder validation hooks.
impl From<String> for BuilderError {
    #[track_caller]
    fn from(msg: String) -> Self {
        Self::new(BuilderErrorKind::ValidationFailed(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LullabyError, LullabyErrorKind};

    #[test]
    fn test_missing_field_lifts_into_lullaby_error() {
        let err: LullabyError = BuilderError::from(derive_builder::UninitializedFieldError::new(
            "messages",
        ))
        .into();
        match err.kind() {
            LullabyErrorKind::Builder(inner) => assert_eq!(
                inner.kind(),
                &BuilderErrorKind::MissingField("messages".to_string())
            ),
            other => panic!("Expected a builder error, got {other}"),
        }
    }

    #[test]
    fn test_validation_message_is_kept() {
        let err = BuilderError::from("threshold must be positive".to_string());
        assert!(err.to_string().contains("threshold must be positive"));
    }
}
