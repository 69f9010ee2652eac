//! Worker agent trait and shared LLM plumbing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::llm::provider::{LLMProviderConfig, LLM};
use crate::models::AnalysisContext;
use crate::types::{AppResult, LLMMessage, LLMRequest};

/// The six specialist agents, in their fan-out order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Market,
    Trade,
    Patents,
    Trials,
    Internal,
    Web,
}

impl AgentKind {
    pub fn all() -> [AgentKind; 6] {
        [
            AgentKind::Market,
            AgentKind::Trade,
            AgentKind::Patents,
            AgentKind::Trials,
            AgentKind::Internal,
            AgentKind::Web,
        ]
    }

    /// Stable key used in state maps and progress messages.
    pub fn key(&self) -> &'static str {
        match self {
            AgentKind::Market => "market",
            AgentKind::Trade => "trade",
            AgentKind::Patents => "patents",
            AgentKind::Trials => "trials",
            AgentKind::Internal => "internal",
            AgentKind::Web => "web",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Structured output of one worker agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInsights {
    pub agent_name: String,
    pub role: String,
    pub molecule: String,
    pub raw_data: serde_json::Value,
    pub analysis: String,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
}

#[async_trait]
pub trait WorkerAgent: Send + Sync {
    fn kind(&self) -> AgentKind;
    fn name(&self) -> &'static str;
    fn role(&self) -> &'static str;

    /// Run the agent's tool, analyze the output, and return structured insights.
    async fn analyze(
        &self,
        molecule: &str,
        ctx: &AnalysisContext,
        config: &Config,
    ) -> AppResult<AgentInsights>;
}

/// One LLM analysis call with a deterministic fallback.
///
/// The workflow must complete without an API key (demo and test runs), so a
/// missing key or a failed call degrades to the tool-derived summary instead of
/// erroring out.
pub(crate) async fn llm_analysis(
    config: &Config,
    agent_name: &str,
    system_prompt: &str,
    prompt: String,
    fallback: String,
) -> String {
    let api_key = match config.llm.active_api_key() {
        Some(key) => key,
        None => {
            warn!(agent = agent_name, "No LLM API key configured, using offline summary");
            return fallback;
        }
    };

    let llm = match LLM::new(LLMProviderConfig {
        name: config.llm.default_provider.clone(),
        api_key,
    }) {
        Ok(llm) => llm,
        Err(e) => {
            error!(agent = agent_name, error = %e, "LLM setup failed, using offline summary");
            return fallback;
        }
    };

    let request = LLMRequest {
        provider: config.llm.default_provider.clone(),
        model: config.llm.default_model.clone(),
        messages: vec![LLMMessage::user(&prompt)],
        max_tokens: Some(2048),
        temperature: Some(config.llm.temperature),
        system_instruction: Some(system_prompt.to_string()),
    };

    match llm.create_chat_completion(&request).await {
        Ok(response) => {
            info!(
                agent = agent_name,
                response_len = response.content.len(),
                "Received analysis from LLM"
            );
            response.content
        }
        Err(e) => {
            error!(agent = agent_name, error = %e, "LLM call failed, using offline summary");
            fallback
        }
    }
}

/// Offline analysis text built from the tool's own key insights.
pub(crate) fn offline_summary(agent_name: &str, molecule: &str, insights: &[String]) -> String {
    let bullets = insights
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{agent_name} summary for {molecule} (generated without LLM):\n{bullets}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_kind_keys_are_unique() {
        let keys: std::collections::HashSet<_> =
            AgentKind::all().iter().map(|k| k.key()).collect();
        assert_eq!(keys.len(), 6);
    }

    #[tokio::test]
    async fn llm_analysis_falls_back_without_key() {
        let config = Config::for_tests();
        let result = llm_analysis(
            &config,
            "Test Agent",
            "system",
            "prompt".to_string(),
            "fallback text".to_string(),
        )
        .await;
        assert_eq!(result, "fallback text");
    }
}
