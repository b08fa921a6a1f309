//! Model drivers for the Lullaby story pipeline.
//!
//! Any provider that speaks the OpenAI chat-completions protocol (OpenAI,
//! Groq, Together, a local Ollama or vLLM server) is reachable through
//! [`OpenAICompatibleClient`].
//!
//! ```no_run
//! use lullaby_core::{GenerateRequest, Message};
//! use lullaby_interface::StoryDriver;
//! use lullaby_models::OpenAICompatibleClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAICompatibleClient::from_env(
//!     "OPENAI_API_KEY",
//!     "gpt-4o-mini",
//!     OpenAICompatibleClient::endpoint_for("https://api.openai.com/v1"),
//! )?;
//! let request = GenerateRequest::builder()
//!     .system("You write bedtime stories.")
//!     .messages(vec![Message::user("A two-line story about a sleepy owl.")])
//!     .build()?;
//! let text = client.generate(&request).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai_compat;

pub use openai_compat::{
    ChatChoice, ChatChoiceMessage, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse,
    ChatUsage, OpenAICompatibleClient,
};
