//! Structural validation of model-produced outlines.
//!
//! Validation runs on the raw `serde_json::Value` so every problem can be
//! reported with a path, and only a payload with no issues is turned into a
//! typed value.

use lullaby_core::{Beat, BeatSheet, Outline, SCENE_COUNT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

const MAX_CHARACTERS: usize = 5;

const PLACEHOLDERS: &[&str] = &["tbd", "todo", "n/a", "none", "...", "\u{2026}", "-"];

const OUTLINE_FIELDS: &[&str] = &[
    "title",
    "target_audience",
    "tone",
    "characters",
    "setting",
    "scenes",
    "ending_payoff",
    "theme",
];
const CHARACTER_FIELDS: &[&str] = &["name", "traits", "relationship"];
const SCENE_FIELDS: &[&str] = &[
    "scene_id",
    "scene_goal",
    "new_event",
    "new_detail",
    "conflict_turn",
    "mini_payoff",
];
const BEAT_FIELDS: &[&str] = &["beat", "summary"];

/// A single problem found in a payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[display("{}: {}", path, message)]
pub struct FieldIssue {
    /// Location of the problem, e.g. `scenes[2].conflict_turn`
    pub path: String,
    /// What is wrong there
    pub message: String,
}

impl FieldIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating a payload: a typed value or every issue found.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    /// The payload is structurally sound
    Valid(T),
    /// The payload was rejected; never empty
    Invalid(Vec<FieldIssue>),
}

impl<T> Validation<T> {
    /// True for [`Validation::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    /// The issues found, empty when valid.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            Validation::Valid(_) => &[],
            Validation::Invalid(issues) => issues,
        }
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> Result<T, Vec<FieldIssue>> {
        match self {
            Validation::Valid(value) => Ok(value),
            Validation::Invalid(issues) => Err(issues),
        }
    }
}

/// Validate a full story outline.
///
/// Rejects unknown or missing fields, wrong types, a cast outside 1..=5,
/// anything other than six scenes numbered 1 through 6 in order, and blank
/// or placeholder text anywhere.
///
/// # Examples
///
/// ```
/// use lullaby_story::{validate_outline, Validation};
/// use serde_json::json;
///
/// let result = validate_outline(&json!({"title": "Pip"}));
/// let Validation::Invalid(issues) = result else { panic!("expected issues") };
/// assert!(issues.iter().any(|i| i.path == "scenes"));
/// ```
pub fn validate_outline(value: &Value) -> Validation<Outline> {
    let mut issues = Vec::new();
    let Some(obj) = value.as_object() else {
        return Validation::Invalid(vec![FieldIssue::new("$", "expected a JSON object")]);
    };
    check_keys(obj, OUTLINE_FIELDS, "", &mut issues);

    for field in ["title", "target_audience", "tone", "setting"] {
        check_text(obj, field, "", &mut issues);
    }

    if let Some(characters) = array_field(obj, "characters", "", &mut issues) {
        if characters.is_empty() || characters.len() > MAX_CHARACTERS {
            issues.push(FieldIssue::new(
                "characters",
                format!(
                    "expected 1 to {} characters, found {}",
                    MAX_CHARACTERS,
                    characters.len()
                ),
            ));
        }
        for (i, character) in characters.iter().enumerate() {
            check_character(character, &format!("characters[{}]", i), &mut issues);
        }
    }

    if let Some(scenes) = array_field(obj, "scenes", "", &mut issues) {
        if scenes.len() != SCENE_COUNT {
            issues.push(FieldIssue::new(
                "scenes",
                format!("expected exactly {} scenes, found {}", SCENE_COUNT, scenes.len()),
            ));
        }
        for (i, scene) in scenes.iter().enumerate() {
            check_scene(scene, i, &mut issues);
        }
    }

    for field in ["ending_payoff", "theme"] {
        check_text(obj, field, "", &mut issues);
    }

    finish(value, issues)
}

/// Validate the six-beat sheet requested by the outline-phase prompt.
///
/// The beats must appear exactly once each in the order Hook, Goal,
/// Obstacle, Attempt1, Attempt2, Climax+Resolution, each with a non-blank
/// summary.
pub fn validate_beat_sheet(value: &Value) -> Validation<BeatSheet> {
    let mut issues = Vec::new();
    let Some(entries) = value.as_array() else {
        return Validation::Invalid(vec![FieldIssue::new("$", "expected a JSON array")]);
    };

    let expected: Vec<Beat> = Beat::iter().collect();
    if entries.len() != expected.len() {
        issues.push(FieldIssue::new(
            "$",
            format!("expected exactly {} beats, found {}", expected.len(), entries.len()),
        ));
    }

    for (i, entry) in entries.iter().enumerate() {
        let path = format!("[{}]", i);
        let Some(obj) = entry.as_object() else {
            issues.push(FieldIssue::new(path, "expected an object"));
            continue;
        };
        check_keys(obj, BEAT_FIELDS, &path, &mut issues);
        check_text(obj, "summary", &path, &mut issues);

        let beat_path = join(&path, "beat");
        match obj.get("beat").and_then(Value::as_str) {
            None => issues.push(FieldIssue::new(beat_path, "expected a beat name")),
            Some(name) => match expected.get(i) {
                Some(want) if name != want.to_string() => issues.push(FieldIssue::new(
                    beat_path,
                    format!("expected '{}', found '{}'", want, name),
                )),
                _ => {}
            },
        }
    }

    finish(value, issues)
}

fn finish<T: DeserializeOwned>(value: &Value, issues: Vec<FieldIssue>) -> Validation<T> {
    if !issues.is_empty() {
        return Validation::Invalid(issues);
    }
    // Anything the checks above missed still surfaces as an issue.
    match serde_json::from_value(value.clone()) {
        Ok(typed) => Validation::Valid(typed),
        Err(e) => Validation::Invalid(vec![FieldIssue::new("$", e.to_string())]),
    }
}

fn check_character(value: &Value, path: &str, issues: &mut Vec<FieldIssue>) {
    let Some(obj) = value.as_object() else {
        issues.push(FieldIssue::new(path, "expected an object"));
        return;
    };
    check_keys(obj, CHARACTER_FIELDS, path, issues);
    check_text(obj, "name", path, issues);
    check_text(obj, "relationship", path, issues);

    if let Some(traits) = array_field(obj, "traits", path, issues) {
        let traits_path = join(path, "traits");
        if traits.is_empty() {
            issues.push(FieldIssue::new(&traits_path, "expected at least one trait"));
        }
        for (i, item) in traits.iter().enumerate() {
            check_text_value(Some(item), &format!("{}[{}]", traits_path, i), issues);
        }
    }
}

fn check_scene(value: &Value, index: usize, issues: &mut Vec<FieldIssue>) {
    let path = format!("scenes[{}]", index);
    let Some(obj) = value.as_object() else {
        issues.push(FieldIssue::new(path, "expected an object"));
        return;
    };
    check_keys(obj, SCENE_FIELDS, &path, issues);

    let id_path = join(&path, "scene_id");
    let expected_id = index as u64 + 1;
    match obj.get("scene_id") {
        None => issues.push(FieldIssue::new(id_path, "missing required field")),
        Some(id) => match id.as_u64() {
            None => issues.push(FieldIssue::new(id_path, "expected an integer")),
            Some(found) if found != expected_id => issues.push(FieldIssue::new(
                id_path,
                format!("expected {}, found {}", expected_id, found),
            )),
            Some(_) => {}
        },
    }

    for field in &SCENE_FIELDS[1..] {
        check_text(obj, field, &path, issues);
    }
}

fn check_keys(obj: &Map<String, Value>, allowed: &[&str], path: &str, issues: &mut Vec<FieldIssue>) {
    for key in obj.keys() {
        if !allowed.contains(&key.as_str()) {
            issues.push(FieldIssue::new(join(path, key), "unknown field"));
        }
    }
}

fn array_field<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<&'a Vec<Value>> {
    match obj.get(field) {
        None => {
            issues.push(FieldIssue::new(join(path, field), "missing required field"));
            None
        }
        Some(Value::Array(items)) => Some(items),
        Some(_) => {
            issues.push(FieldIssue::new(join(path, field), "expected an array"));
            None
        }
    }
}

fn check_text(obj: &Map<String, Value>, field: &str, path: &str, issues: &mut Vec<FieldIssue>) {
    check_text_value(obj.get(field), &join(path, field), issues);
}

fn check_text_value(value: Option<&Value>, path: &str, issues: &mut Vec<FieldIssue>) {
    match value {
        None => issues.push(FieldIssue::new(path, "missing required field")),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                issues.push(FieldIssue::new(path, "must not be blank"));
            } else if is_placeholder(trimmed) {
                issues.push(FieldIssue::new(
                    path,
                    format!("placeholder text '{}' is not allowed", trimmed),
                ));
            }
        }
        Some(_) => issues.push(FieldIssue::new(path, "expected a string")),
    }
}

fn is_placeholder(text: &str) -> bool {
    let lowered = text.to_lowercase();
    PLACEHOLDERS.contains(&lowered.as_str())
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
