//! Word budgets derived from a requested listening time.

use serde::Serialize;

const WORDS_PER_MINUTE: f64 = 160.0;
const MIN_EXTRAPOLATED_WORDS: f64 = 500.0;
const MAX_EXTRAPOLATED_WORDS: f64 = 4000.0;

/// Target, floor and ceiling word counts for a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WordTargets {
    /// Word count to aim for
    pub target: u32,
    /// Shortest acceptable story
    pub min: u32,
    /// Longest acceptable story
    pub max: u32,
    /// Paragraph-count hint used inside prompts
    pub paragraph_guidance: &'static str,
}

/// Where a manuscript's length falls relative to its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LengthVerdict {
    /// Fewer words than the minimum
    TooShort {
        /// Words counted
        words: usize,
    },
    /// Between minimum and maximum, inclusive
    WithinRange {
        /// Words counted
        words: usize,
    },
    /// More words than the maximum
    TooLong {
        /// Words counted
        words: usize,
    },
}

/// Map a requested duration to word targets.
///
/// Durations up to 20 minutes use fixed tiers; longer ones extrapolate at
/// 160 words per minute, clamped to 500..=4000.
///
/// # Examples
///
/// ```
/// use lullaby_core::get_word_targets;
///
/// let short = get_word_targets(5.0);
/// assert_eq!((short.target, short.min, short.max), (825, 700, 950));
///
/// let long = get_word_targets(30.0);
/// assert_eq!((long.target, long.min, long.max), (4000, 3400, 4000));
/// ```
pub fn get_word_targets(minutes: f64) -> WordTargets {
    let paragraph_guidance = get_paragraph_guidance(minutes);
    let (target, min, max) = if is_short(minutes) {
        (825, 700, 950)
    } else if minutes <= 10.0 {
        (1500, 1300, 1700)
    } else if minutes <= 20.0 {
        (3000, 2600, 3400)
    } else {
        let target = clamp_words((minutes * WORDS_PER_MINUTE).round());
        let min = clamp_words((f64::from(target) * 0.85).round());
        let max = clamp_words((f64::from(target) * 1.15).round());
        (target, min, max)
    };
    WordTargets {
        target,
        min,
        max,
        paragraph_guidance,
    }
}

impl WordTargets {
    /// Targets centred on an explicit word count, 15% either side.
    ///
    /// Paragraph guidance is taken from the listening time the count
    /// corresponds to at 160 words per minute.
    ///
    /// ```
    /// use lullaby_core::WordTargets;
    ///
    /// let targets = WordTargets::around(1000);
    /// assert_eq!((targets.min, targets.max), (850, 1150));
    /// ```
    pub fn around(words: u32) -> Self {
        let target = f64::from(words);
        Self {
            target: words,
            min: (target * 0.85).round() as u32,
            max: (target * 1.15).round() as u32,
            paragraph_guidance: get_paragraph_guidance(target / WORDS_PER_MINUTE),
        }
    }
}

/// Paragraph-count hint for a requested duration.
pub fn get_paragraph_guidance(minutes: f64) -> &'static str {
    if is_short(minutes) {
        "8-12 short paragraphs"
    } else if minutes <= 10.0 {
        "10-18 paragraphs"
    } else if minutes <= 20.0 {
        "18-30 paragraphs"
    } else {
        "many short paragraphs with clear beginning, middle, ending"
    }
}

/// Count whitespace-separated words; blank text has none.
///
/// # Examples
///
/// ```
/// use lullaby_core::count_words;
///
/// assert_eq!(count_words(""), 0);
/// assert_eq!(count_words("  "), 0);
/// assert_eq!(count_words("a b  c"), 3);
/// ```
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Compare a manuscript's length against its targets.
pub fn check_length(text: &str, targets: &WordTargets) -> LengthVerdict {
    let words = count_words(text);
    if words < targets.min as usize {
        LengthVerdict::TooShort { words }
    } else if words > targets.max as usize {
        LengthVerdict::TooLong { words }
    } else {
        LengthVerdict::WithinRange { words }
    }
}

// Non-finite and non-positive durations land in the shortest tier.
fn is_short(minutes: f64) -> bool {
    !minutes.is_finite() || minutes <= 5.0
}

fn clamp_words(words: f64) -> u32 {
    words.clamp(MIN_EXTRAPOLATED_WORDS, MAX_EXTRAPOLATED_WORDS) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(t: WordTargets) -> (u32, u32, u32) {
        (t.target, t.min, t.max)
    }

    #[test]
    fn fixed_tiers() {
        for minutes in [0.0, 1.0, 4.5, 5.0] {
            assert_eq!(triple(get_word_targets(minutes)), (825, 700, 950));
        }
        for minutes in [5.1, 7.0, 10.0] {
            assert_eq!(triple(get_word_targets(minutes)), (1500, 1300, 1700));
        }
        for minutes in [10.5, 15.0, 20.0] {
            assert_eq!(triple(get_word_targets(minutes)), (3000, 2600, 3400));
        }
    }

    #[test]
    fn extrapolation_scales_and_clamps() {
        let t = get_word_targets(22.0);
        assert_eq!(t.target, 3520);
        assert_eq!(t.min, 2992);
        assert_eq!(t.max, 4000);

        assert_eq!(triple(get_word_targets(30.0)), (4000, 3400, 4000));
    }

    #[test]
    fn degenerate_minutes_use_shortest_tier() {
        assert_eq!(triple(get_word_targets(-3.0)), (825, 700, 950));
        assert_eq!(triple(get_word_targets(f64::NAN)), (825, 700, 950));
        assert_eq!(triple(get_word_targets(f64::INFINITY)), (825, 700, 950));
    }

    #[test]
    fn guidance_follows_same_thresholds() {
        assert_eq!(get_paragraph_guidance(5.0), "8-12 short paragraphs");
        assert_eq!(get_paragraph_guidance(6.0), "10-18 paragraphs");
        assert_eq!(get_paragraph_guidance(20.0), "18-30 paragraphs");
        assert!(get_paragraph_guidance(45.0).starts_with("many short paragraphs"));
        assert_eq!(get_word_targets(12.0).paragraph_guidance, "18-30 paragraphs");
    }

    #[test]
    fn count_words_handles_blank_and_runs() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  "), 0);
        assert_eq!(count_words("a b  c"), 3);
        assert_eq!(count_words("\tone\n\ntwo "), 2);
    }

    #[test]
    fn length_verdicts() {
        let targets = WordTargets {
            target: 4,
            min: 3,
            max: 5,
            paragraph_guidance: "",
        };
        assert_eq!(check_length("a b", &targets), LengthVerdict::TooShort { words: 2 });
        assert_eq!(
            check_length("a b c d", &targets),
            LengthVerdict::WithinRange { words: 4 }
        );
        assert_eq!(
            check_length("a b c d e f", &targets),
            LengthVerdict::TooLong { words: 6 }
        );
    }
}
