use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{CoachInput, CoachResult, Goal, LlmProvider, Verdict};

/// Providers may suggest more recipes; only the first ones are kept.
pub const MAX_RECIPES: usize = 3;

pub const SYSTEM_PROMPT: &str = "Tu es un coach nutrition motivant, concret, bienveillant.
Réponds en français, en JSON strict avec les clés:
- coachMessage: string (2-3 phrases max)
- recipes: string[] (3 idées rapides)
Pas de conseils médicaux. Pas de texte hors JSON.";

pub const FALLBACK_RECIPES: [&str; 3] = [
    "Bowl poulet, quinoa, légumes croquants",
    "Omelette légumes + salade + fruit",
    "Saumon au four, riz complet, brocoli",
];

/// Why a provider could not produce advice. Never shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Guard for a provider built without credentials; the chain builder skips those.
    #[error("provider is not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("model returned no content")]
    EmptyContent,
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("coachMessage or recipes missing or mistyped")]
    MissingFields,
}

/// Message and recipes produced by a remote model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachAdvice {
    pub coach_message: String,
    pub recipes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// A remote model able to coach on a meal.
#[async_trait::async_trait]
pub trait CoachProvider: Send + Sync {
    fn kind(&self) -> LlmProvider;
    async fn attempt(&self, input: &CoachInput) -> Result<CoachAdvice, ProviderError>;
}

pub fn user_prompt(input: &CoachInput) -> String {
    format!(
        "Repas: {}\nObjectif: {}\nEstimation kcal: {}\nVerdict: {}",
        input.meal, input.goal, input.kcal, input.verdict
    )
}

/// System and user messages shared by every provider.
pub fn prompt_messages(input: &CoachInput) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: user_prompt(input),
        },
    ]
}

/// Parse the text a model answered with. It must be a JSON object holding a
/// non-empty `coachMessage` string and a `recipes` array of strings.
pub fn parse_advice(content: Option<&str>) -> Result<CoachAdvice, ProviderError> {
    let content = content.map(str::trim).unwrap_or_default();
    if content.is_empty() {
        return Err(ProviderError::EmptyContent);
    }

    let parsed: Value = serde_json::from_str(content)?;

    let coach_message = match parsed.get("coachMessage") {
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        _ => return Err(ProviderError::MissingFields),
    };

    let recipes = parsed
        .get("recipes")
        .and_then(Value::as_array)
        .ok_or(ProviderError::MissingFields)?
        .iter()
        .map(|recipe| recipe.as_str().map(str::to_string))
        .collect::<Option<Vec<String>>>()
        .ok_or(ProviderError::MissingFields)?;

    Ok(CoachAdvice {
        coach_message,
        recipes: recipes.into_iter().take(MAX_RECIPES).collect(),
    })
}

/// Networkless coach used when every remote provider failed.
pub struct LocalCoach;

impl LocalCoach {
    pub fn message(goal: Goal, kcal: i64) -> &'static str {
        match goal {
            Goal::Perdre if kcal <= Verdict::GOOD_MAX_KCAL => {
                "Super repas pour ton objectif. Garde une bonne source de protéines et ajoute des légumes pour la satiété."
            }
            Goal::Perdre if kcal <= Verdict::FAIR_MAX_KCAL => {
                "Pas mal du tout. Pour optimiser la perte de poids, réduis un peu les aliments denses en calories ou augmente les légumes."
            }
            Goal::Perdre => {
                "Repas un peu riche pour sécher. Tu peux alléger avec une portion plus petite de féculents et une protéine maigre."
            }
            Goal::Maintenir => {
                "Repas globalement cohérent. Vise surtout la régularité et un bon équilibre protéines, fibres et glucides."
            }
            Goal::Prendre => {
                "Bonne base pour prise de masse propre. Ajoute une collation protéinée si besoin pour atteindre ton total journalier."
            }
        }
    }

    pub fn advise(input: &CoachInput) -> CoachResult {
        CoachResult {
            coach_message: Self::message(input.goal, input.kcal).to_string(),
            recipes: FALLBACK_RECIPES.iter().map(|r| r.to_string()).collect(),
            llm_used: false,
            llm_provider: LlmProvider::Local,
        }
    }
}

/// Remote providers tried in order, one attempt each, ending on [`LocalCoach`].
pub struct CoachChain {
    providers: Vec<Arc<dyn CoachProvider>>,
}

impl CoachChain {
    pub fn new(providers: Vec<Arc<dyn CoachProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_kinds(&self) -> Vec<LlmProvider> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    /// Never fails: provider errors are logged and the next one is tried.
    pub async fn coach(&self, input: &CoachInput) -> CoachResult {
        for provider in &self.providers {
            match provider.attempt(input).await {
                Ok(advice) => {
                    log::debug!("✅ Coach advice from {}", provider.kind());
                    return CoachResult {
                        coach_message: advice.coach_message,
                        recipes: advice.recipes,
                        llm_used: true,
                        llm_provider: provider.kind(),
                    };
                }
                Err(e) => {
                    log::warn!("⚠️ Coach provider {} unavailable: {}", provider.kind(), e);
                }
            }
        }

        log::info!("🏠 Using local coach fallback");
        LocalCoach::advise(input)
    }
}
