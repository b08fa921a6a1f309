//! Trait definitions for model backends and output repair.

use async_trait::async_trait;
use lullaby_core::GenerateRequest;
use lullaby_error::LullabyResult;

/// Core trait that all LLM backends must implement.
///
/// Implementations return the trimmed text of the model's answer and fail
/// on transport errors or when the answer has no content. Retries, timeouts
/// and rate limiting belong to the implementation.
#[async_trait]
pub trait StoryDriver: Send + Sync {
    /// Generate text for a single request.
    async fn generate(&self, req: &GenerateRequest) -> LullabyResult<String>;

    /// Provider name (e.g., "openai", "ollama").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used for requests that do not name one.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: StoryDriver + ?Sized> StoryDriver for &D {
    async fn generate(&self, req: &GenerateRequest) -> LullabyResult<String> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<D: StoryDriver + ?Sized> StoryDriver for Box<D> {
    async fn generate(&self, req: &GenerateRequest) -> LullabyResult<String> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// One-shot fixer for structured output that failed to parse or validate.
///
/// The parser calls `repair` at most once per payload; a second failure is
/// terminal.
#[async_trait]
pub trait Repairer: Send + Sync {
    /// Produce a corrected version of `prior_text`.
    ///
    /// `issues` lists what was wrong with it, one entry per problem.
    async fn repair(&self, prior_text: &str, issues: &[String]) -> LullabyResult<String>;
}
