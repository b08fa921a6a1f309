//! Repetition measurements over finished prose.

use serde::{Deserialize, Serialize};

/// Trigram repeat ratio above which an edit pass is worth running.
pub const REPETITION_THRESHOLD: f64 = 0.02;

/// Phrase- and paragraph-level repetition measured over a manuscript.
///
/// # Examples
///
/// ```
/// use lullaby_core::{RepetitionReport, REPETITION_THRESHOLD};
///
/// let report = RepetitionReport {
///     trigram_repeat_ratio: 0.05,
///     repeated_paragraph_count: 0,
/// };
/// assert!(report.exceeds(REPETITION_THRESHOLD));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RepetitionReport {
    /// Fraction of 3-word shingles that repeat an earlier shingle, in [0, 1]
    pub trigram_repeat_ratio: f64,
    /// Paragraphs that exactly duplicate an earlier paragraph
    pub repeated_paragraph_count: usize,
}

impl RepetitionReport {
    /// Whether the text is repetitive enough to warrant another edit pass.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.trigram_repeat_ratio > threshold
    }
}
