use lullaby_core::{
    AgeRange, MAX_LENGTH_WORDS, MIN_LENGTH_WORDS, StoryStyle, StructuredStoryInput,
};
use lullaby_error::InputErrorKind;

fn base() -> lullaby_core::StructuredStoryInputBuilder {
    StructuredStoryInput::builder()
        .age_range(AgeRange::SevenToEight)
        .main_character("Juniper")
        .setting("a lighthouse on a quiet bay")
        .style(StoryStyle::Poetic)
}

#[test]
fn builds_with_word_length() {
    let input = base().length_words(1200).build().unwrap();
    assert_eq!(*input.age_range(), AgeRange::SevenToEight);
    assert_eq!(input.main_character(), "Juniper");
    assert_eq!(*input.length_words(), 1200);
    assert_eq!(*input.style(), StoryStyle::Poetic);
}

#[test]
fn minutes_derive_length_from_targets() {
    let input = base().minutes(10.0).build().unwrap();
    assert_eq!(*input.length_words(), 1500);
    assert_eq!(*input.length_minutes(), Some(10.0));
}

#[test]
fn explicit_words_win_over_minutes() {
    let input = base().minutes(30.0).length_words(600).build().unwrap();
    assert_eq!(*input.length_words(), 600);
    assert_eq!(*input.length_minutes(), Some(30.0));
}

#[test]
fn length_bounds_are_inclusive() {
    assert!(base().length_words(MIN_LENGTH_WORDS).build().is_ok());
    assert!(base().length_words(MAX_LENGTH_WORDS).build().is_ok());

    let err = base().length_words(MIN_LENGTH_WORDS - 1).build().unwrap_err();
    assert!(matches!(
        err.kind(),
        InputErrorKind::LengthOutOfRange { words: 119, .. }
    ));
    assert!(base().length_words(MAX_LENGTH_WORDS + 1).build().is_err());
}

#[test]
fn blank_text_fields_are_rejected() {
    let err = base().setting("   ").length_words(500).build().unwrap_err();
    assert_eq!(
        err.kind(),
        &InputErrorKind::BlankField("setting".to_string())
    );
}

#[test]
fn text_fields_are_trimmed() {
    let input = base()
        .main_character("  Juniper  ")
        .length_words(500)
        .build()
        .unwrap();
    assert_eq!(input.main_character(), "Juniper");
}

#[test]
fn missing_length_is_reported() {
    let err = base().build().unwrap_err();
    assert_eq!(
        err.kind(),
        &InputErrorKind::MissingField("length_words".to_string())
    );
}

#[test]
fn invalid_minutes_are_rejected() {
    assert!(base().minutes(0.0).build().is_err());
    assert!(base().minutes(f64::NAN).build().is_err());
}
