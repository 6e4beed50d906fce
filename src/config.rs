use anyhow::{Context, Result};
use std::time::Duration;

use crate::models::ProviderStatus;

pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434/api/chat";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_url: String,
    pub ollama_model: String,
    pub ollama_url: String,
    pub port: u16,
    /// `None` leaves outbound calls without a timeout.
    pub llm_timeout: Option<Duration>,
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = match lookup("PORT").filter(|value| !value.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        let llm_timeout = match lookup("LLM_TIMEOUT_SECS").filter(|value| !value.trim().is_empty()) {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("LLM_TIMEOUT_SECS must be a number of seconds, got '{}'", raw))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            groq_api_key: lookup("GROQ_API_KEY").filter(|key| !key.trim().is_empty()),
            groq_model: or_default("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            groq_url: or_default("GROQ_URL", DEFAULT_GROQ_URL),
            ollama_model: or_default("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            ollama_url: or_default("OLLAMA_URL", DEFAULT_OLLAMA_URL),
            port,
            llm_timeout,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
        })
    }

    pub fn groq_configured(&self) -> bool {
        self.groq_api_key.is_some()
    }

    pub fn provider_status(&self) -> ProviderStatus {
        ProviderStatus {
            groq_configured: self.groq_configured(),
            groq_model: self.groq_model.clone(),
            ollama_model: self.ollama_model.clone(),
        }
    }

    /// HTTP client shared by the coach providers.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.llm_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
