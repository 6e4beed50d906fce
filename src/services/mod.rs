pub mod coach;
pub mod estimator;
pub mod groq; // Groq (OpenAI-compatible) provider
pub mod nutrition;
pub mod ollama; // Local Ollama provider

use std::sync::Arc;

use crate::config::Config;

pub use coach::{CoachChain, CoachProvider};
pub use estimator::estimate_meal;
pub use groq::GroqCoach;
pub use ollama::OllamaCoach;

/// Groq first when a key is configured, then Ollama, then the local coach.
pub fn build_coach_chain(config: &Config, client: reqwest::Client) -> CoachChain {
    let mut providers: Vec<Arc<dyn CoachProvider>> = Vec::new();

    if let Some(api_key) = &config.groq_api_key {
        providers.push(Arc::new(GroqCoach::new(
            api_key.clone(),
            config.groq_model.clone(),
            config.groq_url.clone(),
            client.clone(),
        )));
    }

    providers.push(Arc::new(OllamaCoach::new(
        config.ollama_model.clone(),
        config.ollama_url.clone(),
        client,
    )));

    CoachChain::new(providers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LlmProvider;

    #[test]
    fn test_chain_order() {
        let config = Config::from_lookup(|_| None).unwrap();
        let chain = build_coach_chain(&config, reqwest::Client::new());
        assert_eq!(chain.provider_kinds(), vec![LlmProvider::Ollama]);

        let config = Config::from_lookup(|key| {
            (key == "GROQ_API_KEY").then(|| "gsk_test".to_string())
        })
        .unwrap();
        let chain = build_coach_chain(&config, reqwest::Client::new());
        assert_eq!(
            chain.provider_kinds(),
            vec![LlmProvider::Groq, LlmProvider::Ollama]
        );
    }

    #[tokio::test]
    async fn test_unreachable_ollama_without_key_is_local() {
        let config = Config::from_lookup(|key| {
            (key == "OLLAMA_URL").then(|| "http://127.0.0.1:9/api/chat".to_string())
        })
        .unwrap();
        let chain = build_coach_chain(&config, reqwest::Client::new());

        let result = chain
            .coach(&crate::models::CoachInput {
                meal: "Poke bowl saumon, riz, avocat et mangue".to_string(),
                goal: crate::models::Goal::Perdre,
                kcal: 646,
                verdict: crate::models::Verdict::Correct,
            })
            .await;
        assert!(!result.llm_used);
        assert_eq!(result.llm_provider, LlmProvider::Local);
        assert_eq!(result.recipes, coach::FALLBACK_RECIPES.to_vec());
    }
}
