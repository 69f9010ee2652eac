use crate::types::{AppError, AppResult, LLMRequest, LLMResponse};
use async_trait::async_trait;

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for an LLM provider instance.
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig) -> AppResult<Self> {
        let adapter: Box<dyn LLMAdapter> = match provider.name.as_str() {
            "google" => Box::new(crate::llm::google::GoogleAdapter::new(&provider.api_key)),
            "openai" => Box::new(crate::llm::openai::OpenAIAdapter::new(&provider.api_key)),
            other => {
                return Err(AppError::InvalidRequest(format!(
                    "Unsupported LLM provider: {other}"
                )))
            }
        };

        Ok(Self { adapter })
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}
