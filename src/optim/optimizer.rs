use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api_connection::connection::{ApiConnectionError, TextModel};
use crate::api_connection::endpoints::GenerationConfig;
use crate::goals::TargetMacros;
use crate::nutrition::MacroEntry;

use super::gap::{analyze_gaps, balanced_analysis_text, gap_analysis_text};
use super::normalizer::{parse_model_reply, Suggestion};
use super::prompt::build_prompt;

pub const MAX_MODEL_ATTEMPTS: u32 = 3;
pub const MODEL_TEMPERATURE: f32 = 0.3;
pub const MODEL_MAX_OUTPUT_TOKENS: u32 = 4096;

pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "AI optimization service has reached its daily limit. Please try again tomorrow.";
pub const GENERIC_ERROR_MESSAGE: &str = "Unable to process AI optimization. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizationStatus {
    NoSuggestions,
    Success,
    QuotaExceeded,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMeals {
    pub breakfast: MealRef,
    pub lunch: MealRef,
    pub dinner: MealRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub day: String,
    pub current_meals: CurrentMeals,
    pub current_macros: [MacroEntry; 3],
    pub target_macros: TargetMacros,
    pub goal: String,
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Sent by the reference client; accepted but not consulted.
    #[serde(default)]
    pub available_meals: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub status: OptimizationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    pub suggestions: Vec<Suggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OptimizationReport {
    fn no_suggestions(analysis: String) -> Self {
        Self {
            status: OptimizationStatus::NoSuggestions,
            analysis: Some(analysis),
            suggestions: Vec::new(),
            error: None,
        }
    }

    fn success(analysis: String, suggestions: Vec<Suggestion>) -> Self {
        Self {
            status: OptimizationStatus::Success,
            analysis: Some(analysis),
            suggestions,
            error: None,
        }
    }

    fn quota_exceeded() -> Self {
        Self {
            status: OptimizationStatus::QuotaExceeded,
            analysis: None,
            suggestions: Vec::new(),
            error: Some(QUOTA_EXCEEDED_MESSAGE.to_string()),
        }
    }

    fn error() -> Self {
        Self {
            status: OptimizationStatus::Error,
            analysis: None,
            suggestions: Vec::new(),
            error: Some(GENERIC_ERROR_MESSAGE.to_string()),
        }
    }
}

/// Runs one optimization round for a day: gap analysis, then, only when a
/// macro is significantly off target, up to [`MAX_MODEL_ATTEMPTS`] model
/// calls with the identical prompt until one reply normalizes. Internal
/// error detail is logged here; the report carries fixed messages only.
pub async fn optimize_day(model: &dyn TextModel, request: &OptimizeRequest) -> OptimizationReport {
    let gaps = analyze_gaps(&request.current_macros, &request.target_macros);

    if gaps.is_balanced() {
        return OptimizationReport::no_suggestions(balanced_analysis_text(
            &request.day,
            &request.goal,
            &request.current_macros,
        ));
    }

    let analysis = gap_analysis_text(&request.current_macros, &request.target_macros, &gaps.needs);
    let prompt = build_prompt(request, &gaps.needs);
    let config = GenerationConfig {
        temperature: Some(MODEL_TEMPERATURE),
        max_output_tokens: Some(MODEL_MAX_OUTPUT_TOKENS),
    };

    let mut last_error = String::new();
    for attempt in 1..=MAX_MODEL_ATTEMPTS {
        match model.generate(&prompt, config).await {
            Ok(reply_text) => match parse_model_reply(&reply_text) {
                Ok(reply) => {
                    if reply.suggestions.is_empty() {
                        return OptimizationReport::no_suggestions(analysis);
                    }
                    return OptimizationReport::success(analysis, reply.suggestions);
                }
                Err(err) => {
                    warn!(attempt, error = %err, "model reply did not normalize");
                    last_error = err.to_string();
                }
            },
            Err(ApiConnectionError::RateLimited { .. }) => {
                warn!(attempt, "model service rate-limited the call");
                return OptimizationReport::quota_exceeded();
            }
            Err(err) => {
                warn!(attempt, error = %err, "model call failed");
                last_error = err.to_string();
            }
        }
    }

    warn!(
        attempts = MAX_MODEL_ATTEMPTS,
        last_error = %last_error,
        "optimization attempts exhausted"
    );
    OptimizationReport::error()
}
