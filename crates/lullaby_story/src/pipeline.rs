//! The three-phase story pipeline.
//!
//! Each phase is a single awaited driver call whose prompt depends on the
//! previous phase's output. Nothing is shared between runs, so one
//! [`StoryPipeline`] can serve any number of concurrent stories.

use crate::manuscript::extract_manuscript;
use crate::options::{FinalPassPolicy, PipelineOptions};
use crate::parser::parse_outline_strict;
use crate::prompts::{
    PhaseContext, SYSTEM_PROMPT, build_outline_plan_prompt, build_phase_prompt_with,
};
use crate::repair::DriverRepairer;
use crate::repetition::{cleanup_trailing_duplicate_ending_paragraphs, detect_repetition};
use lullaby_core::{
    GenerateRequest, LengthVerdict, Outline, ParseResult, Phase, RepetitionReport,
    ResponseFormat, StructuredStoryInput, WordTargets, check_length, get_word_targets,
};
use lullaby_error::{LullabyError, LullabyResult, StoryError, StoryErrorKind};
use lullaby_interface::StoryDriver;
use serde::Serialize;

/// Draft prose before and after duplicate-ending cleanup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftOutcome {
    /// Story body as returned, label removed
    pub raw: String,
    /// Body after duplicate-ending cleanup
    pub cleaned: String,
    /// Repetition measured on `cleaned`
    pub report: RepetitionReport,
}

/// The polished manuscript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalOutcome {
    /// Story body, label removed and ending cleaned
    pub manuscript: String,
    /// Repetition measured on `manuscript`
    pub report: RepetitionReport,
}

/// Everything a complete run produced, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryRun {
    /// The validated plan
    pub outline: Outline,
    /// Notes from outline parsing; non-empty if a repair was needed
    pub outline_warnings: Vec<String>,
    /// The draft phase output
    pub draft: DraftOutcome,
    /// The manuscript to keep
    pub manuscript: String,
    /// Repetition measured on `manuscript`
    pub report: RepetitionReport,
    /// Whether the polishing phase ran
    pub final_pass_ran: bool,
}

/// Runs the outline, draft and final phases against a [`StoryDriver`].
///
/// # Example
///
/// ```rust,ignore
/// use lullaby_story::StoryPipeline;
/// use lullaby_models::OpenAICompatibleClient;
///
/// let client = OpenAICompatibleClient::from_env("OPENAI_API_KEY", "gpt-4o-mini", endpoint)?;
/// let pipeline = StoryPipeline::new(client);
/// let run = pipeline.run(&input).await?;
/// println!("{}", run.manuscript);
/// ```
pub struct StoryPipeline<D: StoryDriver> {
    driver: D,
    options: PipelineOptions,
}

impl<D: StoryDriver> StoryPipeline<D> {
    /// Create a pipeline with default options.
    pub fn new(driver: D) -> Self {
        Self::with_options(driver, PipelineOptions::default())
    }

    /// Create a pipeline with explicit options.
    pub fn with_options(driver: D, options: PipelineOptions) -> Self {
        Self { driver, options }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The options in effect.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Phase 1: ask for a full outline and parse it, repairing once if needed.
    ///
    /// # Errors
    ///
    /// Fails if the model call fails or the outline is still invalid after
    /// its single repair.
    #[tracing::instrument(
        skip_all,
        fields(
            provider = self.driver.provider_name(),
            age_range = %input.age_range(),
            length_words = input.length_words(),
        )
    )]
    pub async fn generate_outline(
        &self,
        input: &StructuredStoryInput,
    ) -> LullabyResult<ParseResult<Outline>> {
        let request = self.request(
            Phase::Outline,
            build_outline_plan_prompt(input),
            ResponseFormat::JsonObject,
        );
        let raw = self.call(Phase::Outline, &request).await?;

        let repairer = DriverRepairer::new(&self.driver)
            .with_model(self.options.model.clone())
            .with_response_format(ResponseFormat::JsonObject);
        let parsed = parse_outline_strict(&raw, &repairer).await?;

        for warning in &parsed.warnings {
            tracing::warn!(warning = %warning, "Outline needed repair");
        }
        tracing::info!(title = %parsed.outline().title, "Outline accepted");
        Ok(parsed)
    }

    /// Phase 2: write a draft that follows `outline`.
    ///
    /// # Errors
    ///
    /// Fails if the model call fails or the answer contains no story.
    #[tracing::instrument(skip_all, fields(title = %outline.title))]
    pub async fn generate_draft(
        &self,
        input: &StructuredStoryInput,
        outline: &Outline,
    ) -> LullabyResult<DraftOutcome> {
        let prompt = build_phase_prompt_with(input, Phase::Draft, PhaseContext::Outline(outline));
        let request = self.request(Phase::Draft, prompt, ResponseFormat::Text);
        let answer = self.call(Phase::Draft, &request).await?;

        let raw = extract_manuscript(&answer, Phase::Draft)?;
        let cleaned = cleanup_trailing_duplicate_ending_paragraphs(&raw);
        let report = detect_repetition(&cleaned);
        log_quality(Phase::Draft, input, &cleaned, &report);

        Ok(DraftOutcome {
            raw,
            cleaned,
            report,
        })
    }

    /// Phase 3: polish `draft` into the final manuscript.
    ///
    /// # Errors
    ///
    /// Fails if the model call fails or the answer contains no story.
    #[tracing::instrument(skip_all, fields(draft_len = draft.len()))]
    pub async fn generate_final(
        &self,
        input: &StructuredStoryInput,
        draft: &str,
    ) -> LullabyResult<FinalOutcome> {
        let prompt = build_phase_prompt_with(input, Phase::Final, PhaseContext::Draft(draft));
        let request = self.request(Phase::Final, prompt, ResponseFormat::Text);
        let answer = self.call(Phase::Final, &request).await?;

        let body = extract_manuscript(&answer, Phase::Final)?;
        let manuscript = cleanup_trailing_duplicate_ending_paragraphs(&body);
        let report = detect_repetition(&manuscript);
        log_quality(Phase::Final, input, &manuscript, &report);

        Ok(FinalOutcome { manuscript, report })
    }

    /// Run all phases for one story.
    ///
    /// Under [`FinalPassPolicy::WhenRepetitive`] a
    /// draft at or under the repetition threshold is kept as the manuscript
    /// and the polishing phase is skipped.
    ///
    /// # Errors
    ///
    /// Fails on the first phase that fails; earlier results are discarded.
    #[tracing::instrument(skip_all, fields(provider = self.driver.provider_name(), model = self.driver.model_name()))]
    pub async fn run(&self, input: &StructuredStoryInput) -> LullabyResult<StoryRun> {
        let parsed = self.generate_outline(input).await?;
        let ParseResult {
            value: outline,
            warnings: outline_warnings,
        } = parsed;

        let draft = self.generate_draft(input, &outline).await?;

        let repetitive = draft.report.exceeds(self.options.repetition_threshold);
        let run_final = match self.options.final_pass_policy {
            FinalPassPolicy::Always => true,
            FinalPassPolicy::WhenRepetitive => repetitive,
        };

        let (manuscript, report) = if run_final {
            let outcome = self.generate_final(input, &draft.cleaned).await?;
            (outcome.manuscript, outcome.report)
        } else {
            tracing::info!(
                ratio = draft.report.trigram_repeat_ratio,
                "Draft under repetition threshold, skipping final pass"
            );
            (draft.cleaned.clone(), draft.report)
        };

        if report.exceeds(self.options.repetition_threshold) {
            tracing::warn!(
                ratio = report.trigram_repeat_ratio,
                threshold = self.options.repetition_threshold,
                "Manuscript is still repetitive"
            );
        }

        Ok(StoryRun {
            outline,
            outline_warnings,
            draft,
            manuscript,
            report,
            final_pass_ran: run_final,
        })
    }

    fn request(&self, phase: Phase, prompt: String, format: ResponseFormat) -> GenerateRequest {
        self.options
            .settings(phase)
            .to_request(SYSTEM_PROMPT, prompt, self.options.model.clone(), format)
    }

    async fn call(&self, phase: Phase, request: &GenerateRequest) -> LullabyResult<String> {
        tracing::debug!(phase = %phase, "Calling model");
        match self.driver.generate(request).await {
            Ok(text) => {
                tracing::debug!(phase = %phase, response_len = text.len(), "Model answered");
                Ok(text)
            }
            Err(e) => {
                tracing::error!(phase = %phase, error = %e, "Model call failed");
                Err(LullabyError::from(StoryError::new(
                    StoryErrorKind::PhaseFailed {
                        phase: phase.to_string(),
                        message: e.to_string(),
                    },
                )))
            }
        }
    }
}

fn log_quality(
    phase: Phase,
    input: &StructuredStoryInput,
    text: &str,
    report: &RepetitionReport,
) {
    match check_length(text, &length_targets(input)) {
        LengthVerdict::WithinRange { words } => {
            tracing::debug!(phase = %phase, words, "Length within range");
        }
        verdict => tracing::warn!(phase = %phase, ?verdict, "Length outside range"),
    }
    tracing::info!(
        phase = %phase,
        ratio = report.trigram_repeat_ratio,
        repeated_paragraphs = report.repeated_paragraph_count,
        "Repetition measured"
    );
}

fn length_targets(input: &StructuredStoryInput) -> WordTargets {
    match input.length_minutes() {
        Some(minutes) if get_word_targets(*minutes).target == *input.length_words() => {
            get_word_targets(*minutes)
        }
        _ => WordTargets::around(*input.length_words()),
    }
}
