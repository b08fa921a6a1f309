//! Tests for story request files.

use lullaby::{AgeRange, InputErrorKind, LullabyErrorKind, StoryRequest, StoryStyle};
use std::io::Write;

fn request_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write request");
    file
}

#[test]
fn test_request_file_becomes_input() {
    let file = request_file(
        r#"
age_range = "ages 3-4"
main_character = "  Pip, a small grey rabbit  "
setting = "a burrow under an old oak"
length_words = 400
style = "plain and clear"
"#,
    );

    let input = StoryRequest::from_file(file.path())
        .expect("Failed to load request")
        .into_input()
        .expect("Request should validate");

    assert_eq!(*input.age_range(), AgeRange::ThreeToFour);
    assert_eq!(*input.style(), StoryStyle::PlainAndClear);
    assert_eq!(input.main_character(), "Pip, a small grey rabbit");
    assert_eq!(*input.length_words(), 400);
    assert_eq!(*input.length_minutes(), None);
}

#[test]
fn test_minutes_map_to_word_target() {
    let request: StoryRequest = toml::from_str(
        r#"
age_range = "7-8"
main_character = "Ada"
setting = "a lighthouse"
minutes = 15.0
style = "Poetic"
"#,
    )
    .expect("Failed to parse request");

    let input = request.into_input().expect("Request should validate");
    assert_eq!(*input.length_words(), 3000);
    assert_eq!(*input.length_minutes(), Some(15.0));
}

#[test]
fn test_unknown_style_is_input_error() {
    let request: StoryRequest = toml::from_str(
        r#"
age_range = "5-6"
main_character = "Ada"
setting = "a lighthouse"
length_words = 600
style = "gothic"
"#,
    )
    .expect("Failed to parse request");

    let err = request.into_input().unwrap_err();
    match err.kind() {
        LullabyErrorKind::Input(input) => {
            assert_eq!(input.kind(), &InputErrorKind::UnknownStyle("gothic".to_string()))
        }
        other => panic!("Expected an input error, got {other}"),
    }
}

#[test]
fn test_unknown_keys_are_rejected() {
    let file = request_file(
        r#"
age_range = "5-6"
main_character = "Ada"
setting = "a lighthouse"
length_words = 600
style = "Poetic"
moral = "be kind"
"#,
    );

    let err = StoryRequest::from_file(file.path()).unwrap_err();
    assert!(matches!(err.kind(), LullabyErrorKind::Config(_)));
}
