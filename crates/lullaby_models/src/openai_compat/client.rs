//! HTTP client for OpenAI-compatible chat-completions endpoints.

use super::conversion::{from_chat_response, to_chat_request};
use super::dto::ChatResponse;
use async_trait::async_trait;
use lullaby_core::GenerateRequest;
use lullaby_error::{LullabyResult, ModelsError, ModelsErrorKind, ModelsResult};
use lullaby_interface::StoryDriver;
use reqwest::Client;
use tracing::{debug, instrument};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Client for any chat-completions endpoint that follows the OpenAI protocol.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: &'static str,
}

impl OpenAICompatibleClient {
    /// Creates a client for `endpoint`, the full chat-completions URL.
    ///
    /// An empty `api_key` sends no `Authorization` header, which suits local
    /// servers.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
            provider: "openai",
        }
    }

    /// Creates a client whose API key is read from the environment variable
    /// `env_var`.
    ///
    /// # Errors
    ///
    /// Returns `ModelsErrorKind::MissingApiKey` if the variable is unset or
    /// blank.
    #[instrument(skip(model, endpoint))]
    pub fn from_env(
        env_var: &str,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> ModelsResult<Self> {
        let api_key = std::env::var(env_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::MissingApiKey(env_var.to_string())))?;
        Ok(Self::new(api_key, model, endpoint))
    }

    /// Label reported as the provider name, e.g. "groq" or "ollama".
    pub fn with_provider(mut self, provider: &'static str) -> Self {
        self.provider = provider;
        self
    }

    /// Chat-completions URL for an API base such as `https://api.openai.com/v1`.
    ///
    /// ```
    /// use lullaby_models::OpenAICompatibleClient;
    ///
    /// assert_eq!(
    ///     OpenAICompatibleClient::endpoint_for("http://localhost:11434/v1/"),
    ///     "http://localhost:11434/v1/chat/completions"
    /// );
    /// ```
    pub fn endpoint_for(base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if base.ends_with(CHAT_COMPLETIONS_PATH) {
            base.to_string()
        } else {
            format!("{}{}", base, CHAT_COMPLETIONS_PATH)
        }
    }

    /// The chat-completions URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, req: &GenerateRequest) -> ModelsResult<String> {
        let body = to_chat_request(req, &self.model)?;
        debug!(endpoint = %self.endpoint, model = %body.model(), "Sending chat completion request");

        let mut request = self.client.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::ResponseParsing(e.to_string()))
        })?;
        if let Some(usage) = parsed.usage() {
            debug!(
                prompt_tokens = usage.prompt_tokens(),
                completion_tokens = usage.completion_tokens(),
                "Chat completion usage"
            );
        }
        from_chat_response(&parsed)
    }
}

#[async_trait]
impl StoryDriver for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(provider = self.provider, model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> LullabyResult<String> {
        Ok(self.send(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
