//! Request types for model generation.

use crate::Message;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Output format hint passed through to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-form text
    #[default]
    Text,
    /// A single JSON object
    JsonObject,
}

/// A single generation request.
///
/// # Examples
///
/// ```
/// use lullaby_core::{GenerateRequest, Message, ResponseFormat};
///
/// let request = GenerateRequest::builder()
///     .system("You write bedtime stories.")
///     .messages(vec![Message::user("Plan a story about a fox.")])
///     .temperature(0.4)
///     .response_format(ResponseFormat::JsonObject)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.temperature, Some(0.4));
/// assert_eq!(request.max_tokens, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder)]
#[builder(default, build_fn(error = "lullaby_error::BuilderError"))]
pub struct GenerateRequest {
    /// System instruction placed ahead of the conversation
    #[builder(setter(into))]
    pub system: String,
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Model identifier; drivers fall back to their own model when unset
    #[builder(setter(into, strip_option))]
    pub model: Option<String>,
    /// Sampling temperature
    #[builder(setter(strip_option))]
    pub temperature: Option<f32>,
    /// Penalty for tokens already present
    #[builder(setter(strip_option))]
    pub presence_penalty: Option<f32>,
    /// Penalty proportional to token frequency
    #[builder(setter(strip_option))]
    pub frequency_penalty: Option<f32>,
    /// Maximum number of tokens to generate
    #[builder(setter(strip_option))]
    pub max_tokens: Option<u32>,
    /// Requested output format
    #[builder(setter(strip_option))]
    pub response_format: Option<ResponseFormat>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}
