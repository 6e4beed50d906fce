use serde::{Deserialize, Serialize};

use super::coach::{parse_advice, prompt_messages, ChatMessage, CoachAdvice, CoachProvider, ProviderError};
use crate::models::{CoachInput, LlmProvider};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: Option<String>,
}

/// Local Ollama server (`/api/chat`), no authentication.
pub struct OllamaCoach {
    model: String,
    url: String,
    client: reqwest::Client,
}

impl OllamaCoach {
    pub fn new(model: String, url: String, client: reqwest::Client) -> Self {
        Self { model, url, client }
    }
}

#[async_trait::async_trait]
impl CoachProvider for OllamaCoach {
    fn kind(&self) -> LlmProvider {
        LlmProvider::Ollama
    }

    async fn attempt(&self, input: &CoachInput) -> Result<CoachAdvice, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            stream: false,
            messages: prompt_messages(input),
        };

        log::debug!("🦙 Sending coach request to Ollama at {} ({})", self.url, self.model);

        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("❌ Ollama error status: {}", status);
            return Err(ProviderError::Status(status.as_u16()));
        }

        let response_text = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&response_text)?;

        let content = chat_response
            .message
            .as_ref()
            .and_then(|message| message.content.as_deref());

        parse_advice(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, Verdict};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn input() -> CoachInput {
        CoachInput {
            meal: "2 oeufs, pain complet, yaourt nature et pomme".to_string(),
            goal: Goal::Maintenir,
            kcal: 561,
            verdict: Verdict::Correct,
        }
    }

    fn coach(url: String) -> OllamaCoach {
        OllamaCoach::new("llama3.1:8b".to_string(), url, reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_successful_chat() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3.1:8b",
                "message": {
                    "role": "assistant",
                    "content": "\n{\"coachMessage\": \"Petit-déj complet.\", \"recipes\": [\"Porridge\"]}\n"
                },
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let advice = coach(format!("{}/api/chat", server.uri()))
            .attempt(&input())
            .await
            .unwrap();
        assert_eq!(advice.coach_message, "Petit-déj complet.");
        assert_eq!(advice.recipes, vec!["Porridge"]);

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["stream"], false);
        assert_eq!(body["model"], "llama3.1:8b");
    }

    #[tokio::test]
    async fn test_missing_recipes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "content": "{\"coachMessage\": \"Top\"}" }
            })))
            .mount(&server)
            .await;

        let err = coach(format!("{}/api/chat", server.uri()))
            .attempt(&input())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingFields));
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = coach(format!("{}/api/chat", server.uri()))
            .attempt(&input())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Status(500)));
    }

    #[tokio::test]
    async fn test_unreachable() {
        // nothing listens on the discard port
        let err = coach("http://127.0.0.1:9/api/chat".to_string())
            .attempt(&input())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Http(_)));
    }
}
