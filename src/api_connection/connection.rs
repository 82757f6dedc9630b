use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::error::Error;
use std::fmt;

use super::endpoints::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, DEFAULT_GEMINI_MODEL,
    GEMINI_API_BASE_URL,
};

#[derive(Debug)]
pub enum ApiConnectionError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    RateLimited {
        error_body: String,
    },
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    EmptyResponse,
}

impl fmt::Display for ApiConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ApiConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            ApiConnectionError::RateLimited { error_body } => {
                write!(f, "Rate limited by model service: {}", error_body)
            }
            ApiConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
            ApiConnectionError::EmptyResponse => {
                write!(f, "Model returned no candidates with text content")
            }
        }
    }
}

impl Error for ApiConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiConnectionError::NetworkError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ApiConnectionError::NetworkError(err)
    }
}

/// The model-service boundary. Stateless per call; handlers hold one behind
/// an `Arc` and tests substitute stubs. Rate limiting surfaces as the typed
/// `RateLimited` variant decided here, never by inspecting error prose
/// downstream.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, ApiConnectionError>;
}

#[derive(Debug, Clone)]
pub enum Provider {
    Gemini {
        api_key_env_var: String,
        model: String,
    },
}

impl Provider {
    pub fn gemini(api_key_env_var: &str) -> Self {
        dotenv().ok();
        Self::Gemini {
            api_key_env_var: api_key_env_var.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }

    pub async fn call_generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiConnectionError> {
        match self {
            Provider::Gemini {
                api_key_env_var,
                model,
            } => {
                dotenv().ok();
                let api_key = env::var(api_key_env_var)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var.clone()))?;

                let client = Client::new();
                let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE_URL, model);

                let response = client
                    .post(&url)
                    .header("x-goog-api-key", api_key)
                    .header("Content-Type", "application/json")
                    .json(&request)
                    .send()
                    .await?;

                if response.status().is_success() {
                    let generated = response.json::<GenerateContentResponse>().await?;
                    Ok(generated)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        Err(ApiConnectionError::RateLimited { error_body })
                    } else {
                        Err(ApiConnectionError::ApiError { status, error_body })
                    }
                }
            }
        }
    }
}

#[async_trait]
impl TextModel for Provider {
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String, ApiConnectionError> {
        let request = GenerateContentRequest::from_prompt(prompt, config);
        let response = self.call_generate_content(request).await?;
        response
            .first_text()
            .map(|text| text.trim().to_string())
            .ok_or(ApiConnectionError::EmptyResponse)
    }
}
