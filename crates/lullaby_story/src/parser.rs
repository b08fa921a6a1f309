//! Strict parsing of structured model output with a single repair attempt.
//!
//! ```text
//! parse ──ok──▶ done
//!   │
//!  fail ──▶ repair ──▶ parse ──ok──▶ done (with warning)
//!                        │
//!                       fail ──▶ OutlineRejected
//! ```

use crate::extraction::parse_tolerant;
use crate::schema::{Validation, validate_beat_sheet, validate_outline};
use lullaby_core::{BeatSheet, Outline, ParseResult};
use lullaby_error::{LullabyResult, StoryError, StoryErrorKind};
use lullaby_interface::Repairer;
use serde_json::Value;

/// Why a single parse attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
enum Stage {
    /// The text was not JSON even after normalization
    #[display("syntax")]
    Syntax,
    /// The JSON did not match the schema
    #[display("schema")]
    Schema,
}

#[derive(Debug)]
struct Rejection {
    stage: Stage,
    issues: Vec<String>,
}

/// Parse a full story outline, repairing it at most once.
///
/// Near-miss JSON (fences, unquoted keys, trailing commas, single or smart
/// quotes) is accepted without a repair. Anything else that fails to parse
/// or validate is handed to `repairer` once together with the issues found.
///
/// # Errors
///
/// - Propagates the repairer's own error.
/// - Returns `StoryErrorKind::OutlineRejected` if the repaired text still
///   fails.
#[tracing::instrument(skip_all, fields(raw_len = raw.len(), repaired = tracing::field::Empty))]
pub async fn parse_outline_strict(
    raw: &str,
    repairer: &dyn Repairer,
) -> LullabyResult<ParseResult<Outline>> {
    parse_strict(raw, repairer, validate_outline).await
}

/// Parse the six-beat sheet, repairing it at most once.
///
/// Same behavior as [`parse_outline_strict`], validated with
/// [`validate_beat_sheet`].
#[tracing::instrument(skip_all, fields(raw_len = raw.len(), repaired = tracing::field::Empty))]
pub async fn parse_beat_sheet_strict(
    raw: &str,
    repairer: &dyn Repairer,
) -> LullabyResult<ParseResult<BeatSheet>> {
    parse_strict(raw, repairer, validate_beat_sheet).await
}

async fn parse_strict<T>(
    raw: &str,
    repairer: &dyn Repairer,
    validate: fn(&Value) -> Validation<T>,
) -> LullabyResult<ParseResult<T>> {
    let first = match attempt(raw, validate) {
        Ok(value) => {
            tracing::Span::current().record("repaired", false);
            return Ok(ParseResult::clean(value));
        }
        Err(rejection) => rejection,
    };

    tracing::warn!(
        stage = %first.stage,
        issue_count = first.issues.len(),
        "Structured output rejected, requesting repair"
    );
    tracing::Span::current().record("repaired", true);
    let repaired = repairer.repair(raw, &first.issues).await?;

    match attempt(&repaired, validate) {
        Ok(value) => {
            let warning = format!(
                "required repair after {} failure: {}",
                first.stage,
                first.issues.join("; ")
            );
            tracing::info!("Repaired structured output accepted");
            Ok(ParseResult {
                value,
                warnings: vec![warning],
            })
        }
        Err(second) => {
            tracing::error!(
                stage = %second.stage,
                issues = %second.issues.join("; "),
                "Repaired structured output still invalid"
            );
            Err(StoryError::new(StoryErrorKind::OutlineRejected {
                stage: second.stage.to_string(),
                detail: second.issues.join("; "),
                text: repaired,
            })
            .into())
        }
    }
}

fn attempt<T>(text: &str, validate: fn(&Value) -> Validation<T>) -> Result<T, Rejection> {
    let value = parse_tolerant(text).map_err(|e| Rejection {
        stage: Stage::Syntax,
        issues: vec![e.message],
    })?;
    validate(&value).into_result().map_err(|issues| Rejection {
        stage: Stage::Schema,
        issues: issues.iter().map(ToString::to_string).collect(),
    })
}
