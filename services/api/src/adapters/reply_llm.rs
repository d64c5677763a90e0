//! services/api/src/adapters/reply_llm.rs
//!
//! This module contains the adapter for the generative reply LLM.
//! It implements the `ReplyService` port from the `core` crate, speaking the
//! OpenAI-compatible chat-completion API exposed by the Gemini endpoint.

const SYSTEM_INSTRUCTIONS: &str = "You are 'Calmind', a supportive and empathetic AI assistant. \
Your goal is to provide a brief, calming, and constructive response. \
The user's emotional state is detected as: {emotion}. Use this context to reply.";

/// Fixed sampling temperature for reply generation.
const REPLY_TEMPERATURE: f32 = 0.7;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use calmind_core::{
    domain::Emotion,
    ports::{PortError, PortResult, ReplyService},
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ReplyService` against the Gemini
/// OpenAI-compatible chat-completion endpoint.
#[derive(Clone)]
pub struct GeminiReplyAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiReplyAdapter {
    /// Creates a new `GeminiReplyAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `ReplyService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ReplyService for GeminiReplyAdapter {
    /// Generates a supportive reply to the user's text, with the detected
    /// emotion embedded in the system instruction.
    async fn generate_reply(&self, emotion: Emotion, text: &str) -> PortResult<String> {
        let system_prompt = SYSTEM_INSTRUCTIONS.replace("{emotion}", emotion.as_str());

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(text.to_string())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(REPLY_TEMPERATURE)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Upstream(
                    "Reply LLM response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Upstream(
                "Reply LLM returned no choices in its response.".to_string(),
            ))
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use backoff::ExponentialBackoffBuilder;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter_for(server: &MockServer) -> GeminiReplyAdapter {
        let config = OpenAIConfig::new()
            .with_api_key("test-key")
            .with_api_base(server.uri());
        // Use a short backoff so tests exercising retried error responses don't
        // wait out the client's default multi-minute max_elapsed_time.
        let backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(std::time::Duration::from_millis(1))
            .with_max_interval(std::time::Duration::from_millis(5))
            .with_max_elapsed_time(Some(std::time::Duration::from_millis(50)))
            .build();
        GeminiReplyAdapter::new(
            Client::with_config(config).with_backoff(backoff),
            "gemini-2.5-flash".to_string(),
        )
    }

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gemini-2.5-flash",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 20, "total_tokens": 32 }
        })
    }

    #[tokio::test]
    async fn returns_reply_verbatim_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("Take a slow breath. You are doing fine.")),
            )
            .mount(&server)
            .await;

        let adapter = adapter_for(&server);
        let reply = adapter
            .generate_reply(Emotion::Negative, "I had a rough day.")
            .await
            .unwrap();
        assert_eq!(reply, "Take a slow breath. You are doing fine.");
    }

    #[tokio::test]
    async fn maps_server_errors_to_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {
                    "message": "internal error",
                    "type": "server_error",
                    "param": null,
                    "code": null
                }
            })))
            .mount(&server)
            .await;

        let adapter = adapter_for(&server);
        let err = adapter
            .generate_reply(Emotion::Neutral, "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Upstream(_)));
    }

    #[tokio::test]
    async fn rejects_empty_completions() {
        let server = MockServer::start().await;
        let mut body = completion_body("");
        body["choices"][0]["message"]["content"] = serde_json::Value::Null;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let adapter = adapter_for(&server);
        let err = adapter
            .generate_reply(Emotion::Positive, "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Upstream(_)));
    }
}
