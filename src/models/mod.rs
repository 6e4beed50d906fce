use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DISCLAIMER: &str = "Conseils bien-être généraux, pas un avis médical.";

/// Minimum meal description length, in UTF-16 code units (so an emoji
/// outside the BMP counts twice, as in browser string lengths).
pub const MIN_MEAL_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    #[default]
    Perdre,
    Maintenir,
    Prendre,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Perdre => "perdre",
            Goal::Maintenir => "maintenir",
            Goal::Prendre => "prendre",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "perdre" => Some(Goal::Perdre),
            "maintenir" => Some(Goal::Maintenir),
            "prendre" => Some(Goal::Prendre),
            _ => None,
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Très bien")]
    TresBien,
    #[serde(rename = "Correct")]
    Correct,
    #[serde(rename = "À équilibrer")]
    AEquilibrer,
}

impl Verdict {
    /// Inclusive upper bound of the "Très bien" tier.
    pub const GOOD_MAX_KCAL: i64 = 550;
    /// Inclusive upper bound of the "Correct" tier.
    pub const FAIR_MAX_KCAL: i64 = 800;

    pub fn from_kcal(kcal: i64) -> Self {
        if kcal <= Self::GOOD_MAX_KCAL {
            Verdict::TresBien
        } else if kcal <= Self::FAIR_MAX_KCAL {
            Verdict::Correct
        } else {
            Verdict::AEquilibrer
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::TresBien => "Très bien",
            Verdict::Correct => "Correct",
            Verdict::AEquilibrer => "À équilibrer",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Groq,
    Ollama,
    Local,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LlmProvider::Groq => "groq",
            LlmProvider::Ollama => "ollama",
            LlmProvider::Local => "local",
        };
        write!(f, "{}", s)
    }
}

/// A rejected analyze request. Carries the single message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub const INVALID_BODY: &'static str = "Requête invalide.";
    pub const MEAL_MISSING: &'static str = "Décris ton repas.";
    pub const MEAL_NOT_TEXT: &'static str = "Le repas doit être un texte.";
    pub const MEAL_TOO_SHORT: &'static str = "Décris un peu plus ton repas.";
    pub const GOAL_INVALID: &'static str =
        "Objectif invalide : choisis perdre, maintenir ou prendre.";

    fn new(message: &str) -> Self {
        Self(message.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub meal: String,
    pub goal: Goal,
}

impl AnalyzeRequest {
    /// Validate a raw request body. Only the first problem is reported,
    /// `meal` being checked before `goal`.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let fields = body
            .as_object()
            .ok_or_else(|| ValidationError::new(ValidationError::INVALID_BODY))?;

        let meal = match fields.get("meal") {
            None => return Err(ValidationError::new(ValidationError::MEAL_MISSING)),
            Some(Value::String(meal)) => meal,
            Some(_) => return Err(ValidationError::new(ValidationError::MEAL_NOT_TEXT)),
        };
        if meal.encode_utf16().count() < MIN_MEAL_LEN {
            return Err(ValidationError::new(ValidationError::MEAL_TOO_SHORT));
        }

        // A missing goal defaults; an explicit null does not.
        let goal = match fields.get("goal") {
            None => Goal::default(),
            Some(value) => value
                .as_str()
                .and_then(Goal::from_string)
                .ok_or_else(|| ValidationError::new(ValidationError::GOAL_INVALID))?,
        };

        Ok(Self {
            meal: meal.clone(),
            goal,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateResult {
    pub kcal: i64,
    pub verdict: Verdict,
    pub matched_keyword_count: usize,
}

/// Context handed to every coach provider.
#[derive(Debug, Clone)]
pub struct CoachInput {
    pub meal: String,
    pub goal: Goal,
    pub kcal: i64,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachResult {
    pub coach_message: String,
    pub recipes: Vec<String>,
    pub llm_used: bool,
    pub llm_provider: LlmProvider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub kcal_estimate: i64,
    pub verdict: Verdict,
    pub coach_message: String,
    pub recipes: Vec<String>,
    pub llm_used: bool,
    pub llm_provider: LlmProvider,
    pub disclaimer: String,
}

impl AnalyzeResponse {
    pub fn compose(estimate: EstimateResult, coach: CoachResult) -> Self {
        Self {
            kcal_estimate: estimate.kcal,
            verdict: estimate.verdict,
            coach_message: coach.coach_message,
            recipes: coach.recipes,
            llm_used: coach.llm_used,
            llm_provider: coach.llm_provider,
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub groq_configured: bool,
    pub groq_model: String,
    pub ollama_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub providers: ProviderStatus,
}
