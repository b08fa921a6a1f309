//! OpenAI-compatible chat completions.

mod client;
mod conversion;
mod dto;

pub use client::OpenAICompatibleClient;
pub use dto::{
    ChatChoice, ChatChoiceMessage, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse,
    ChatUsage,
};
