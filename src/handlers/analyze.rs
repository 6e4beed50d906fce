use std::sync::Arc;

use crate::models::{AnalyzeRequest, AnalyzeResponse, CoachInput};
use crate::services::{estimate_meal, CoachChain};

pub struct AnalyzeHandler {
    coach: Arc<CoachChain>,
}

impl AnalyzeHandler {
    pub fn new(coach: Arc<CoachChain>) -> Self {
        Self { coach }
    }

    /// Estimate the meal, then ask the coach chain with that estimate.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> AnalyzeResponse {
        let estimate = estimate_meal(&request.meal);
        log::debug!(
            "🍽️ Estimated {} kcal ({} keywords matched) for goal {}",
            estimate.kcal,
            estimate.matched_keyword_count,
            request.goal
        );

        let coach = self
            .coach
            .coach(&CoachInput {
                meal: request.meal.clone(),
                goal: request.goal,
                kcal: estimate.kcal,
                verdict: estimate.verdict,
            })
            .await;

        log::info!(
            "✅ Meal analyzed: {} kcal, verdict '{}', coach: {}",
            estimate.kcal,
            estimate.verdict,
            coach.llm_provider
        );

        AnalyzeResponse::compose(estimate, coach)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, LlmProvider, Verdict, DISCLAIMER};
    use crate::services::coach::{CoachAdvice, CoachProvider, ProviderError, FALLBACK_RECIPES};

    /// Answers with the kcal and verdict it was given.
    struct EchoProvider;

    #[async_trait::async_trait]
    impl CoachProvider for EchoProvider {
        fn kind(&self) -> LlmProvider {
            LlmProvider::Groq
        }

        async fn attempt(&self, input: &CoachInput) -> Result<CoachAdvice, ProviderError> {
            Ok(CoachAdvice {
                coach_message: format!("{} kcal, {}", input.kcal, input.verdict),
                recipes: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_estimate_feeds_coach() {
        let chain = CoachChain::new(vec![Arc::new(EchoProvider) as Arc<dyn CoachProvider>]);
        let handler = AnalyzeHandler::new(Arc::new(chain));

        let response = handler
            .analyze(&AnalyzeRequest {
                meal: "Burger maison, frites au four, salade".to_string(),
                goal: Goal::Perdre,
            })
            .await;

        // burger 649 + frites 561.6 + salade 14.4
        assert_eq!(response.kcal_estimate, 1225);
        assert_eq!(response.verdict, Verdict::AEquilibrer);
        assert_eq!(response.coach_message, "1225 kcal, À équilibrer");
        assert!(response.llm_used);
        assert_eq!(response.disclaimer, DISCLAIMER);
    }

    #[tokio::test]
    async fn test_local_fallback_response() {
        let handler = AnalyzeHandler::new(Arc::new(CoachChain::new(vec![])));

        let response = handler
            .analyze(&AnalyzeRequest {
                meal: "Une soupe de légumes".to_string(),
                goal: Goal::Prendre,
            })
            .await;

        assert_eq!(response.kcal_estimate, 550);
        assert_eq!(response.verdict, Verdict::TresBien);
        assert!(!response.llm_used);
        assert_eq!(response.llm_provider, LlmProvider::Local);
        assert_eq!(response.recipes, FALLBACK_RECIPES.to_vec());
    }
}
