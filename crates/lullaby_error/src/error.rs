//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, HttpError, InputError, JsonError, ModelsError, StoryError,
};

/// The foundation error enum aggregating every crate-level error.
///
/// # Examples
///
/// ```
/// use lullaby_error::{LullabyError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: LullabyError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LullabyErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Story input rejected
    #[from(InputError)]
    Input(InputError),
    /// Story pipeline error
    #[from(StoryError)]
    Story(StoryError),
    /// Model driver error
    #[from(ModelsError)]
    Models(ModelsError),
}

/// Lullaby error with kind discrimination.
///
/// # Examples
///
/// ```
/// use lullaby_error::{LullabyError, LullabyResult, ConfigError};
///
/// fn might_fail() -> LullabyResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Lullaby Error: {}", _0)]
pub struct LullabyError(Box<LullabyErrorKind>);

impl LullabyError {
    /// Create a new error from a kind.
    pub fn new(kind: LullabyErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LullabyErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to LullabyErrorKind
impl<T> From<T> for LullabyError
where
    T: Into<LullabyErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Lullaby operations.
///
/// # Examples
///
/// ```
/// use lullaby_error::{LullabyResult, HttpError};
///
/// fn fetch_story() -> LullabyResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type LullabyResult<T> = std::result::Result<T, LullabyError>;
