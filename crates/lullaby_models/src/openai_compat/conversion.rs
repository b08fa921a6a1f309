//! Conversions between Lullaby requests and the chat-completions wire format.

use super::dto::{ChatMessage, ChatRequest, ChatResponse};
use lullaby_core::{GenerateRequest, Role};
use lullaby_error::{ModelsError, ModelsErrorKind, ModelsResult};

/// Build the wire request, falling back to `default_model`.
pub fn to_chat_request(request: &GenerateRequest, default_model: &str) -> ModelsResult<ChatRequest> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if !request.system.trim().is_empty() {
        messages.push(ChatMessage::new(Role::System, request.system.clone()));
    }
    messages.extend(
        request
            .messages
            .iter()
            .map(|m| ChatMessage::new(m.role, m.content.clone())),
    );

    let model = request
        .model
        .clone()
        .unwrap_or_else(|| default_model.to_string());

    let mut builder = ChatRequest::builder();
    builder
        .model(model)
        .messages(messages)
        .temperature(request.temperature)
        .presence_penalty(request.presence_penalty)
        .frequency_penalty(request.frequency_penalty)
        .max_tokens(request.max_tokens)
        .response_format(request.response_format);

    builder.build().map_err(|e| {
        ModelsError::new(ModelsErrorKind::Builder(format!(
            "Failed to build chat request: {}",
            e.kind()
        )))
    })
}

/// Take the trimmed text of the first choice.
pub fn from_chat_response(response: &ChatResponse) -> ModelsResult<String> {
    let text = response
        .choices()
        .first()
        .and_then(|choice| choice.message().content().as_deref())
        .map(str::trim)
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ModelsError::new(ModelsErrorKind::EmptyResponse));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lullaby_core::{Message, ResponseFormat};

    #[test]
    fn test_request_puts_system_first_and_skips_unset_fields() {
        let request = GenerateRequest::builder()
            .system("Be gentle.")
            .messages(vec![Message::user("Plan a story.")])
            .temperature(0.3)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .unwrap();

        let chat = to_chat_request(&request, "default-model").unwrap();
        let json = serde_json::to_value(&chat).unwrap();

        assert_eq!(json["model"], "default-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "Be gentle.");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["response_format"]["type"], "json_object");
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("presence_penalty").is_none());
    }

    #[test]
    fn test_request_model_override() {
        let request = GenerateRequest::builder()
            .model("story-model")
            .messages(vec![Message::user("Hi")])
            .build()
            .unwrap();

        let chat = to_chat_request(&request, "default-model").unwrap();
        assert_eq!(chat.model(), "story-model");
        // Blank system prompts are not sent.
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_chat_request_without_model_is_builder_error() {
        use lullaby_error::{BuilderErrorKind, LullabyError, LullabyErrorKind};

        let err = ChatRequest::builder()
            .messages(vec![ChatMessage::new(Role::User, "Hi")])
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &BuilderErrorKind::MissingField("model".to_string()));

        let lifted: LullabyError = err.into();
        assert!(matches!(lifted.kind(), LullabyErrorKind::Builder(_)));
    }

    #[test]
    fn test_response_text_is_trimmed() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  DRAFT_STORY: Hi  \n"}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}}"#,
        )
        .unwrap();

        assert_eq!(from_chat_response(&response).unwrap(), "DRAFT_STORY: Hi");
        assert_eq!(response.usage().map(|u| *u.completion_tokens()), Some(4));
    }

    #[test]
    fn test_empty_or_null_content_is_an_error() {
        for body in [
            r#"{"choices": []}"#,
            r#"{"choices": [{"message": {"content": null}}]}"#,
            r#"{"choices": [{"message": {"content": "   "}}]}"#,
        ] {
            let response: ChatResponse = serde_json::from_str(body).unwrap();
            let err = from_chat_response(&response).unwrap_err();
            assert_eq!(err.kind, ModelsErrorKind::EmptyResponse);
        }
    }
}
