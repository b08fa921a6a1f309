//! Output of the structured-output parser.

use crate::Outline;
use serde::Serialize;

/// A parsed value plus the non-fatal notes collected while producing it.
///
/// `warnings` is empty exactly when the first parse attempt succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult<T> {
    /// The validated value
    pub value: T,
    /// Notes for logging, e.g. that a repair round-trip was needed
    pub warnings: Vec<String>,
}

impl<T> ParseResult<T> {
    /// Wrap a value that parsed on the first attempt.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// True if the value needed a repair round-trip.
    pub fn was_repaired(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Take the value, dropping the warnings.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl ParseResult<Outline> {
    /// The parsed outline.
    pub fn outline(&self) -> &Outline {
        &self.value
    }
}
