use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::catalog::CatalogError;
use crate::engine::EngineError;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Engine(e) => (engine_status(e), self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Catalog(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Query-time engine errors are client errors; build-time ones can only
/// surface here through a bug, so they map to 500.
fn engine_status(error: &EngineError) -> StatusCode {
    match error {
        EngineError::UnknownTitle(_) | EngineError::UnknownMovie(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        EngineError::MalformedRecord(_)
        | EngineError::EmptyCorpus
        | EngineError::DegenerateVocabulary => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub type AppResult<T> = Result<T, AppError>;
