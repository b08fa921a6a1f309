//! Repair by re-prompting the same model.

use crate::options::PhaseSettings;
use crate::prompts::{SYSTEM_PROMPT, build_repair_prompt};
use async_trait::async_trait;
use lullaby_core::ResponseFormat;
use lullaby_error::LullabyResult;
use lullaby_interface::{Repairer, StoryDriver};

/// A [`Repairer`] that sends the rejected text and its issues back to a
/// driver and returns whatever the model answers.
///
/// Driver failures propagate unchanged.
pub struct DriverRepairer<'a, D: ?Sized> {
    driver: &'a D,
    settings: PhaseSettings,
    model: Option<String>,
    response_format: ResponseFormat,
}

impl<'a, D: StoryDriver + ?Sized> DriverRepairer<'a, D> {
    /// Repair through `driver` with a low temperature and plain text output.
    pub fn new(driver: &'a D) -> Self {
        Self {
            driver,
            settings: PhaseSettings {
                temperature: Some(0.2),
                ..PhaseSettings::default()
            },
            model: None,
            response_format: ResponseFormat::Text,
        }
    }

    /// Use these sampling settings for the repair request.
    pub fn with_settings(mut self, settings: PhaseSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Send the repair request to a specific model.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    /// Ask for a specific output format.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

#[async_trait]
impl<D: StoryDriver + ?Sized> Repairer for DriverRepairer<'_, D> {
    #[tracing::instrument(skip_all, fields(provider = self.driver.provider_name(), issue_count = issues.len()))]
    async fn repair(&self, prior_text: &str, issues: &[String]) -> LullabyResult<String> {
        let request = self.settings.to_request(
            SYSTEM_PROMPT,
            build_repair_prompt(prior_text, issues),
            self.model.clone(),
            self.response_format,
        );
        let repaired = self.driver.generate(&request).await?;
        tracing::debug!(repaired_len = repaired.len(), "Received repaired payload");
        Ok(repaired)
    }
}
