//! Repetition measurement and duplicate-ending cleanup for finished prose.

use lullaby_core::RepetitionReport;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("Valid paragraph break regex"));

/// Split prose into trimmed, non-empty paragraphs on blank lines.
pub fn paragraphs(text: &str) -> Vec<&str> {
    paragraph_spans(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .collect()
}

/// Byte ranges of the trimmed, non-empty paragraphs in `text`.
fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    let breaks = PARAGRAPH_BREAK.find_iter(text).map(|m| (m.start(), m.end()));
    for (break_start, break_end) in breaks.chain(std::iter::once((text.len(), text.len()))) {
        let segment = &text[start..break_start];
        let trimmed = segment.trim();
        if !trimmed.is_empty() {
            let lead = segment.len() - segment.trim_start().len();
            spans.push((start + lead, start + lead + trimmed.len()));
        }
        start = break_end;
    }
    spans
}

/// Measure phrase- and paragraph-level repetition.
///
/// `repeated_paragraph_count` counts paragraphs identical (after trimming)
/// to an earlier one.
///
/// `trigram_repeat_ratio` is `(total - distinct) / total` over the 3-word
/// shingles of the lower-cased, whitespace-separated words: the first
/// occurrence of a shingle is not counted, only its later copies. So
/// `"a b c a b c"` has four shingles, three distinct, and scores 0.25. The
/// ratio is 0 for texts shorter than three words.
///
/// # Examples
///
/// ```
/// use lullaby_story::detect_repetition;
///
/// let report = detect_repetition("The moon rose.\n\nThe moon rose.");
/// assert_eq!(report.repeated_paragraph_count, 1);
/// assert!(report.trigram_repeat_ratio > 0.0);
/// ```
pub fn detect_repetition(text: &str) -> RepetitionReport {
    let mut seen = HashSet::new();
    let repeated_paragraph_count = paragraphs(text)
        .into_iter()
        .filter(|p| !seen.insert(*p))
        .count();

    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    let trigram_repeat_ratio = if words.len() < 3 {
        0.0
    } else {
        let total = words.len() - 2;
        let distinct: HashSet<&[String]> = words.windows(3).collect();
        (total - distinct.len()) as f64 / total as f64
    };

    RepetitionReport {
        trigram_repeat_ratio,
        repeated_paragraph_count,
    }
}

/// Collapse a trailing run of identical paragraphs to a single copy.
///
/// Only the very end of the text is touched: when the story ends with two or
/// more paragraphs equal after trimming, the text is cut just after the first
/// of them. Everything before the cut is returned byte for byte. Text
/// without such a run is returned unchanged. Repeats earlier in the story
/// are left alone.
///
/// # Examples
///
/// ```
/// use lullaby_story::cleanup_trailing_duplicate_ending_paragraphs;
///
/// let text = "Once upon a time.\n\nThe end.\n\nThe end.";
/// assert_eq!(
///     cleanup_trailing_duplicate_ending_paragraphs(text),
///     "Once upon a time.\n\nThe end."
/// );
/// ```
pub fn cleanup_trailing_duplicate_ending_paragraphs(text: &str) -> String {
    let spans = paragraph_spans(text);
    let Some(&(last_start, last_end)) = spans.last() else {
        return text.to_string();
    };
    let last = &text[last_start..last_end];
    let run = spans
        .iter()
        .rev()
        .take_while(|&&(start, end)| &text[start..end] == last)
        .count();
    if run < 2 {
        return text.to_string();
    }

    tracing::debug!(removed = run - 1, "Collapsed duplicate ending paragraphs");
    let (_, keep_end) = spans[spans.len() - run];
    text[..keep_end].to_string()
}
