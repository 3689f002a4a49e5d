use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Caller-visible failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Error)]
pub enum OutfitError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Label detection error: {0}")]
    LabelDetection(String),

    #[error("Item store error: {0}")]
    Store(String),

    #[error("Similarity index error: {0}")]
    SimilarityIndex(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Google auth error: {0}")]
    Auth(String),

    #[error("Embedding has {actual} dimensions but the index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OutfitResult<T> = Result<T, OutfitError>;

impl OutfitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OutfitError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            OutfitError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for OutfitError {
    fn from(err: serde_json::Error) -> Self {
        OutfitError::Internal(format!("JSON error: {}", err))
    }
}

impl From<core_config::ConfigError> for OutfitError {
    fn from(err: core_config::ConfigError) -> Self {
        OutfitError::Config(err.to_string())
    }
}

/// Convert OutfitError to AppError for standardized HTTP error responses.
///
/// Internal kinds keep their detail only for the server log; `AppError`
/// answers them with a generic message.
impl From<OutfitError> for AppError {
    fn from(err: OutfitError) -> Self {
        match err {
            OutfitError::InvalidArgument(msg) => AppError::BadRequest(msg),
            OutfitError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for OutfitError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
