use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub google_api_key: String,
    pub openai_api_key: String,
    pub default_provider: String,
    pub default_model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    pub output_dir: String,
}

impl LLMConfig {
    /// API key for the configured default provider, if one is set.
    pub fn active_api_key(&self) -> Option<String> {
        let key = match self.default_provider.as_str() {
            "google" => &self.google_api_key,
            "openai" => &self.openai_api_key,
            _ => return None,
        };
        if key.is_empty() {
            None
        } else {
            Some(key.clone())
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            llm: LLMConfig {
                google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
                openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                default_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "google".to_string()),
                default_model: env::var("LLM_MODEL")
                    .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
                temperature: env::var("LLM_TEMPERATURE")
                    .unwrap_or_else(|_| "0.3".to_string())
                    .parse()?,
            },
            reports: ReportsConfig {
                output_dir: env::var("REPORTS_OUTPUT_DIR").unwrap_or_else(|_| "outputs".to_string()),
            },
        })
    }

    /// Config with no API keys and temp-friendly defaults, for tests.
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                cors_allowed_origins: vec!["*".to_string()],
            },
            llm: LLMConfig {
                google_api_key: String::new(),
                openai_api_key: String::new(),
                default_provider: "google".to_string(),
                default_model: "gemini-2.5-flash".to_string(),
                temperature: 0.3,
            },
            reports: ReportsConfig {
                output_dir: std::env::temp_dir()
                    .join("pharma-agentic-test-reports")
                    .to_string_lossy()
                    .to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_api_key_empty_means_none() {
        let config = Config::for_tests();
        assert!(config.llm.active_api_key().is_none());
    }

    #[test]
    fn active_api_key_for_configured_provider() {
        let mut config = Config::for_tests();
        config.llm.google_api_key = "test-key".to_string();
        assert_eq!(config.llm.active_api_key().as_deref(), Some("test-key"));

        config.llm.default_provider = "openai".to_string();
        assert!(config.llm.active_api_key().is_none());
    }
}
