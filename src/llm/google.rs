// Google Gemini adapter
// API Reference: https://ai.google.dev/api/generate-content
//
// The workflow defaults to gemini-2.5-flash at temperature 0.3; both come from
// config, this adapter only speaks the wire format.

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage};
use crate::utils::retry::with_retry;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

const MAX_ATTEMPTS: u32 = 3;

pub struct GoogleAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

// Request types for the generateContent endpoint

#[derive(Serialize)]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>, // "user" or "model"
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

// Response types

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata", default)]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: u32,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

impl GoogleAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, GEMINI_API_BASE)
    }

    /// Override the API base URL (used by tests against a local mock server).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_body(request: &LLMRequest) -> GeminiRequest {
        // Gemini carries the system prompt out-of-band and calls assistants "model".
        let system_instruction = request.system_instruction.as_ref().map(|text| GeminiContent {
            role: None,
            parts: vec![GeminiPart { text: text.clone() }],
        });

        let contents = request
            .messages
            .iter()
            .map(|m| GeminiContent {
                role: Some(match m.role.as_str() {
                    "assistant" => "model".to_string(),
                    _ => "user".to_string(),
                }),
                parts: vec![GeminiPart {
                    text: m.content.clone(),
                }],
            })
            .collect();

        GeminiRequest {
            system_instruction,
            contents,
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }

    async fn send(&self, model: &str, body: &GeminiRequest) -> AppResult<GeminiResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        // Transport failures are retried; HTTP-level errors are not.
        let response = with_retry(
            || self.client.post(&url).json(body).send(),
            MAX_ATTEMPTS,
        )
        .await
        .map_err(|e| AppError::LLMApi(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(AppError::LLMApi(format!("Gemini API {status}: {message}")));
        }

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| AppError::LLMApi(format!("Failed to decode Gemini response: {e}")))
    }
}

#[async_trait]
impl LLMAdapter for GoogleAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let body = Self::build_body(request);

        let response = self.send(&request.model, &body).await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLMApi("Gemini returned no candidates".to_string()))?;

        let content = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        let usage = response.usage_metadata.unwrap_or_default();

        Ok(LLMResponse {
            content,
            finish_reason: candidate.finish_reason.unwrap_or_else(|| "STOP".to_string()),
            usage: TokenUsage {
                prompt_tokens: usage.prompt_token_count,
                completion_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LLMMessage;

    fn request() -> LLMRequest {
        LLMRequest {
            provider: "google".to_string(),
            model: "gemini-2.5-flash".to_string(),
            messages: vec![LLMMessage::user("Analyze Metformin")],
            max_tokens: Some(1024),
            temperature: Some(0.3),
            system_instruction: Some("You are an analyst.".to_string()),
        }
    }

    #[tokio::test]
    async fn parses_generate_content_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "Market looks strong."}]},
                        "finishReason": "STOP"
                    }],
                    "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
                }"#,
            )
            .create_async()
            .await;

        let adapter = GoogleAdapter::with_base_url("test-key", &server.url());
        let response = adapter.create_chat_completion(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, "Market looks strong.");
        assert_eq!(response.finish_reason, "STOP");
        assert_eq!(response.usage.total_tokens, 15);
    }

    #[tokio::test]
    async fn surfaces_api_error_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error": {"message": "API key not valid"}}"#)
            .expect_at_least(1)
            .create_async()
            .await;

        let adapter = GoogleAdapter::with_base_url("bad-key", &server.url());
        let err = adapter.create_chat_completion(&request()).await.unwrap_err();
        assert!(err.to_string().contains("API key not valid"));
    }
}
