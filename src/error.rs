use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No recipes in catalog for category: {0}")]
    EmptyCategory(&'static str),
}

pub type Result<T> = std::result::Result<T, AppError>;
