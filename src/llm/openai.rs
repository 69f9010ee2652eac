// OpenAI chat completions adapter
// API Reference: https://platform.openai.com/docs/api-reference/chat

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage};
use crate::utils::retry::with_retry;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const OPENAI_API_BASE: &str = "https://api.openai.com";

const MAX_ATTEMPTS: u32 = 3;

pub struct OpenAIAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Deserialize)]
struct OpenAIError {
    message: String,
}

impl OpenAIAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, OPENAI_API_BASE)
    }

    /// Override the API base URL (used by tests against a local mock server).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LLMAdapter for OpenAIAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        // OpenAI takes the system prompt as the leading message.
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system_instruction {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| OpenAIMessage {
            role: m.role.clone(),
            content: m.content.clone(),
        }));

        let body = OpenAIChatRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = with_retry(
            || {
                self.client
                    .post(&url)
                    .bearer_auth(&self.api_key)
                    .json(&body)
                    .send()
            },
            MAX_ATTEMPTS,
        )
        .await
        .map_err(|e| AppError::LLMApi(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAIErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(AppError::LLMApi(format!("OpenAI API {status}: {message}")));
        }

        let parsed: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMApi(format!("Failed to decode OpenAI response: {e}")))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLMApi("OpenAI returned no choices".to_string()))?;

        let usage = parsed.usage.unwrap_or_default();

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".to_string()),
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LLMMessage;

    #[tokio::test]
    async fn parses_chat_completion_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{"message": {"role": "assistant", "content": "Done."}, "finish_reason": "stop"}],
                    "usage": {"prompt_tokens": 7, "completion_tokens": 2, "total_tokens": 9}
                }"#,
            )
            .create_async()
            .await;

        let adapter = OpenAIAdapter::with_base_url("test-key", &server.url());
        let response = adapter
            .create_chat_completion(&LLMRequest {
                provider: "openai".to_string(),
                model: "gpt-4o-mini".to_string(),
                messages: vec![LLMMessage::user("hello")],
                max_tokens: Some(64),
                temperature: Some(0.3),
                system_instruction: None,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, "Done.");
        assert_eq!(response.usage.total_tokens, 9);
    }
}
