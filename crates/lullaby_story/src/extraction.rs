//! Utilities for pulling JSON out of model responses.
//!
//! Model output often wraps JSON in markdown fences or surrounds it with
//! chatter, and the JSON itself is frequently "almost" valid. Extraction
//! finds the payload; [`parse_tolerant`] accepts the common near-misses
//! before anyone has to ask the model again.

use lullaby_error::JsonError;
use serde_json::Value;

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` or bare ``` ... ```
/// 2. Whichever balanced `{ ... }` or `[ ... ]` starts first
///
/// # Errors
///
/// Returns an error if the response contains no JSON-looking payload.
///
/// # Examples
///
/// ```
/// use lullaby_story::extract_json;
///
/// let response = "Here is the outline:\n```json\n{\"title\": \"Pip\"}\n```\n";
/// assert_eq!(extract_json(response).unwrap(), "{\"title\": \"Pip\"}");
/// ```
pub fn extract_json(response: &str) -> Result<String, JsonError> {
    json_candidates(response)
        .into_iter()
        .next()
        .ok_or_else(|| no_json(response))
}

fn no_json(response: &str) -> JsonError {
    tracing::debug!(response_length = response.len(), "No JSON found in response");
    JsonError::new(format!(
        "No JSON found in response (length: {})",
        response.len()
    ))
}

/// Every payload worth trying, best guess first.
///
/// The fenced block comes first, then each top-level balanced span in the
/// order it appears. Spans nested inside an earlier span are not repeated.
fn json_candidates(response: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(json) = extract_from_code_block(response, "json") {
        candidates.push(json);
    }

    let mut from = 0;
    while let Some(offset) = response[from..].find(['{', '[']) {
        let start = from + offset;
        let (open, close) = if response.as_bytes()[start] == b'{' {
            ('{', '}')
        } else {
            ('[', ']')
        };
        match balanced_end(response, start, open, close) {
            Some(end) => {
                let span = &response[start..end];
                if !candidates.iter().any(|c| c == span) {
                    candidates.push(span.to_string());
                }
                from = end;
            }
            None => from = start + 1,
        }
    }
    candidates
}

/// Extract content from markdown code blocks.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        return Some(fenced_body(response, content_start));
    }

    let start = response.find("```")?;
    let content_start = start + 3;
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);
    Some(fenced_body(response, skip_to))
}

// An unterminated fence is a truncated response; keep what arrived.
fn fenced_body(response: &str, from: usize) -> String {
    let rest = &response[from..];
    let body = rest.find("```").map(|end| &rest[..end]).unwrap_or(rest);
    body.trim().to_string()
}

/// Byte offset just past the `close` matching the `open` at `start`.
///
/// Delimiters inside double-quoted strings are skipped.
fn balanced_end(response: &str, start: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + i + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse a model response into JSON, tolerating near-miss syntax.
///
/// Each candidate payload (fenced block, then balanced spans in order) is
/// parsed strictly and, failing that, after normalizing smart quotes,
/// single-quoted strings, unquoted keys and trailing commas. The longest
/// candidate that parses wins, so bracketed prose around the JSON does not
/// hide it.
///
/// # Errors
///
/// Returns the strict parser's error for the first candidate when no
/// candidate parses.
///
/// # Examples
///
/// ```
/// use lullaby_story::parse_tolerant;
///
/// let value = parse_tolerant("{title: 'Pip', tags: ['a', 'b',],}").unwrap();
/// assert_eq!(value["title"], "Pip");
/// assert_eq!(value["tags"].as_array().unwrap().len(), 2);
///
/// let value = parse_tolerant("Outline [draft 2]: {\"title\": \"Pip\"}").unwrap();
/// assert_eq!(value["title"], "Pip");
/// ```
pub fn parse_tolerant(response: &str) -> Result<Value, JsonError> {
    let candidates = json_candidates(response);
    let Some(first) = candidates.first() else {
        return Err(no_json(response));
    };

    let mut best: Option<(usize, Value)> = None;
    let mut first_err = None;
    for payload in &candidates {
        let parsed = match serde_json::from_str::<Value>(payload) {
            Ok(value) => Some(value),
            Err(e) => {
                let normalized = serde_json::from_str::<Value>(&normalize_json(payload)).ok();
                if normalized.is_some() {
                    tracing::debug!(error = %e, "Accepted JSON after normalizing near-miss syntax");
                }
                first_err.get_or_insert(e);
                normalized
            }
        };
        let Some(value) = parsed else { continue };
        if best.as_ref().is_none_or(|(len, _)| payload.len() > *len) {
            best = Some((payload.len(), value));
        }
    }
    if let Some((_, value)) = best {
        return Ok(value);
    }

    let preview: String = first.chars().take(100).collect();
    let detail = first_err.map(|e| e.to_string()).unwrap_or_default();
    tracing::debug!(
        error = %detail,
        candidates = candidates.len(),
        json_preview = %preview,
        "JSON parsing failed"
    );
    Err(JsonError::new(format!(
        "Failed to parse JSON: {} (JSON: {}...)",
        detail, preview
    )))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    /// Inside a double-quoted string; `true` if it was opened by a smart quote
    Double(bool),
    /// Inside a single-quoted string; `true` if it was opened by a smart quote
    Single(bool),
}

/// Rewrite common near-miss JSON into strict JSON.
///
/// Outside string literals: smart-quoted and single-quoted strings become
/// double-quoted, bare identifier keys are quoted and commas directly
/// before `}` or `]` are dropped. String contents are left alone.
pub(crate) fn normalize_json(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 16);
    let mut state = ScanState::Code;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match state {
            ScanState::Double(smart) => match c {
                '\\' => {
                    out.push('\\');
                    if let Some(&next) = chars.get(i + 1) {
                        out.push(next);
                        i += 1;
                    }
                }
                '"' => {
                    out.push('"');
                    state = ScanState::Code;
                }
                '\u{201C}' | '\u{201D}' if smart => {
                    out.push('"');
                    state = ScanState::Code;
                }
                other => out.push(other),
            },
            ScanState::Single(smart) => match c {
                '\\' if chars.get(i + 1) == Some(&'\'') => {
                    out.push('\'');
                    i += 1;
                }
                '\\' => {
                    out.push('\\');
                    if let Some(&next) = chars.get(i + 1) {
                        out.push(next);
                        i += 1;
                    }
                }
                '"' => out.push_str("\\\""),
                '\'' if !smart => {
                    out.push('"');
                    state = ScanState::Code;
                }
                '\u{2018}' | '\u{2019}' if smart => {
                    out.push('"');
                    state = ScanState::Code;
                }
                other => out.push(other),
            },
            ScanState::Code => match c {
                '"' | '\u{201C}' | '\u{201D}' => {
                    out.push('"');
                    state = ScanState::Double(c != '"');
                }
                '\'' | '\u{2018}' | '\u{2019}' => {
                    out.push('"');
                    state = ScanState::Single(c != '\'');
                }
                ',' => {
                    if !matches!(next_significant(&chars, i + 1), Some('}') | Some(']')) {
                        out.push(',');
                    }
                }
                c if c.is_alphabetic() || c == '_' || c == '$' => {
                    let start = i;
                    while i < chars.len()
                        && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$')
                    {
                        i += 1;
                    }
                    let ident: String = chars[start..i].iter().collect();
                    if next_significant(&chars, i) == Some(':') {
                        out.push('"');
                        out.push_str(&ident);
                        out.push('"');
                    } else {
                        out.push_str(&ident);
                    }
                    continue;
                }
                other => out.push(other),
            },
        }
        i += 1;
    }

    out
}

fn next_significant(chars: &[char], from: usize) -> Option<char> {
    chars[from.min(chars.len())..]
        .iter()
        .copied()
        .find(|c| !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here's the outline you requested:

```json
{
  "title": "Pip",
  "tone": "sleepy"
}
```

Sweet dreams!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"tone\": \"sleepy\""));
    }

    #[test]
    fn test_extract_json_unterminated_fence() {
        let response = "```json\n{\"title\": \"Pip\"}";
        assert_eq!(extract_json(response).unwrap(), "{\"title\": \"Pip\"}");
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let response = r#"Sure! Here it is: {"id": 456, "nested": {"value": "}"}} trailing"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"id": 456, "nested": {"value": "}"}}"#);
    }

    #[test]
    fn test_extract_json_array_first() {
        let response = "Beats:\n[{\"beat\": \"Hook\"}, {\"beat\": \"Goal\"}]";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }

    #[test]
    fn test_no_json_found() {
        assert!(extract_json("Once upon a time there was no JSON").is_err());
    }

    #[test]
    fn test_normalize_unquoted_keys_and_trailing_commas() {
        let input = "{title: \"Pip\", scenes: [1, 2,], }";
        assert_eq!(normalize_json(input), "{\"title\": \"Pip\", \"scenes\": [1, 2] }");
    }

    #[test]
    fn test_normalize_leaves_string_contents_alone() {
        let input = r#"{"note": "a, } b: c", 'it\'s': 'say "hi"'}"#;
        let value: Value = serde_json::from_str(&normalize_json(input)).unwrap();
        assert_eq!(value["note"], "a, } b: c");
        assert_eq!(value["it's"], "say \"hi\"");
    }

    #[test]
    fn test_normalize_keeps_literals() {
        let input = "{done: true, missing: null}";
        let value: Value = serde_json::from_str(&normalize_json(input)).unwrap();
        assert_eq!(value["done"], true);
        assert!(value["missing"].is_null());
    }

    #[test]
    fn test_parse_tolerant_smart_quotes() {
        let value = parse_tolerant("{\u{201C}title\u{201D}: \u{201C}Pip\u{201D}}").unwrap();
        assert_eq!(value["title"], "Pip");
    }

    #[test]
    fn test_parse_tolerant_skips_bracketed_prose() {
        let response = "Here is the outline [ages 5-6]:\n{\"title\": \"Pip\", \"scenes\": [1, 2]}";
        let value = parse_tolerant(response).unwrap();
        assert_eq!(value["title"], "Pip");
        assert_eq!(value["scenes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_tolerant_prefers_largest_payload() {
        let response = "As noted [1], here it is: {\"title\": \"Pip\"}";
        assert_eq!(parse_tolerant(response).unwrap()["title"], "Pip");
    }

    #[test]
    fn test_parse_tolerant_falls_back_past_bad_fence() {
        let response = "```\nsee below\n```\n{title: 'Pip',}";
        assert_eq!(parse_tolerant(response).unwrap()["title"], "Pip");
    }

    #[test]
    fn test_candidates_skip_nested_spans() {
        let response = "{\"a\": [1, {\"b\": 2}]} then [3]";
        assert_eq!(
            json_candidates(response),
            vec!["{\"a\": [1, {\"b\": 2}]}".to_string(), "[3]".to_string()]
        );
    }

    #[test]
    fn test_parse_tolerant_rejects_garbage() {
        assert!(parse_tolerant("{title: }").is_err());
    }
}
