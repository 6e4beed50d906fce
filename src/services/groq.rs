use serde::{Deserialize, Serialize};

use super::coach::{parse_advice, prompt_messages, ChatMessage, CoachAdvice, CoachProvider, ProviderError};
use crate::models::{CoachInput, LlmProvider};

const TEMPERATURE: f32 = 0.4;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: Option<String>,
}

/// Groq, through its OpenAI-compatible chat completions endpoint.
pub struct GroqCoach {
    api_key: String,
    model: String,
    url: String,
    client: reqwest::Client,
}

impl GroqCoach {
    pub fn new(api_key: String, model: String, url: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            model,
            url,
            client,
        }
    }
}

#[async_trait::async_trait]
impl CoachProvider for GroqCoach {
    fn kind(&self) -> LlmProvider {
        LlmProvider::Groq
    }

    async fn attempt(&self, input: &CoachInput) -> Result<CoachAdvice, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured);
        }

        let request = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: prompt_messages(input),
        };

        log::debug!("🤖 Sending coach request to Groq with model: {}", self.model);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Groq response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::debug!("❌ Groq API error ({}): {}", status, error_text);
            return Err(ProviderError::Status(status.as_u16()));
        }

        let response_text = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&response_text)?;

        let content = chat_response
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref());

        parse_advice(content)
    }
}
