//! Per-phase sampling settings and pipeline policy.

use derive_builder::Builder;
use lullaby_core::{GenerateRequest, Message, Phase, REPETITION_THRESHOLD, ResponseFormat};
use serde::{Deserialize, Serialize};

/// Sampling parameters for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseSettings {
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Penalty for tokens already present
    pub presence_penalty: Option<f32>,
    /// Penalty proportional to token frequency
    pub frequency_penalty: Option<f32>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
}

impl PhaseSettings {
    /// Build a single-turn request carrying these settings.
    pub fn to_request(
        &self,
        system: &str,
        prompt: String,
        model: Option<String>,
        response_format: ResponseFormat,
    ) -> GenerateRequest {
        GenerateRequest {
            system: system.to_string(),
            messages: vec![Message::user(prompt)],
            model,
            temperature: self.temperature,
            presence_penalty: self.presence_penalty,
            frequency_penalty: self.frequency_penalty,
            max_tokens: self.max_tokens,
            response_format: Some(response_format),
        }
    }
}

/// When the polishing phase runs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum FinalPassPolicy {
    /// Every run gets a final pass
    #[default]
    #[display("always")]
    Always,
    /// Only drafts whose repetition exceeds the threshold get a final pass
    #[display("when_repetitive")]
    WhenRepetitive,
}

/// Everything the pipeline needs besides the driver.
///
/// # Examples
///
/// ```
/// use lullaby_story::{FinalPassPolicy, PipelineOptions};
///
/// let options = PipelineOptions::builder()
///     .final_pass_policy(FinalPassPolicy::WhenRepetitive)
///     .repetition_threshold(0.05)
///     .build()
///     .unwrap();
///
/// assert_eq!(options.repetition_threshold, 0.05);
/// assert!(options.model.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, build_fn(error = "lullaby_error::BuilderError"))]
pub struct PipelineOptions {
    /// Model override sent with every request
    #[builder(setter(into, strip_option))]
    pub model: Option<String>,
    /// Settings for the planning phase
    pub outline: PhaseSettings,
    /// Settings for the draft phase
    pub draft: PhaseSettings,
    /// Settings for the polishing phase
    pub final_pass: PhaseSettings,
    /// Trigram ratio above which a draft counts as repetitive
    pub repetition_threshold: f64,
    /// When the polishing phase runs
    pub final_pass_policy: FinalPassPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            model: None,
            outline: PhaseSettings {
                temperature: Some(0.4),
                max_tokens: Some(2000),
                ..PhaseSettings::default()
            },
            draft: PhaseSettings {
                temperature: Some(0.8),
                presence_penalty: Some(0.2),
                frequency_penalty: Some(0.3),
                ..PhaseSettings::default()
            },
            final_pass: PhaseSettings {
                temperature: Some(0.6),
                frequency_penalty: Some(0.4),
                ..PhaseSettings::default()
            },
            repetition_threshold: REPETITION_THRESHOLD,
            final_pass_policy: FinalPassPolicy::Always,
        }
    }
}

impl PipelineOptions {
    /// Creates a new options builder.
    pub fn builder() -> PipelineOptionsBuilder {
        PipelineOptionsBuilder::default()
    }

    /// Settings for `phase`.
    pub fn settings(&self, phase: Phase) -> &PhaseSettings {
        match phase {
            Phase::Outline => &self.outline,
            Phase::Draft => &self.draft,
            Phase::Final => &self.final_pass,
        }
    }
}
