use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

use crate::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A storage fault, reported to the client as `message` only.
    #[error("{message}: {source}")]
    Fault {
        message: &'static str,
        source: StoreError,
    },
}

impl AppError {
    /// Attaches the client-facing message used if `self` is a storage fault.
    pub fn or_fault(self, message: &'static str) -> Self {
        match self {
            AppError::Store(source @ (StoreError::Unavailable(_) | StoreError::Database(_))) => {
                AppError::Fault { message, source }
            }
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(StoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.to_owned()),
            AppError::Store(StoreError::NotFound(what)) => {
                (StatusCode::NOT_FOUND, format!("{} not found.", capitalize(what)))
            }
            AppError::Store(source) => {
                tracing::error!(error = %source, "storage fault");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.".to_owned())
            }
            AppError::Fault { message, source } => {
                tracing::error!(error = %source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned())
            }
        };

        (status, Json(json!({ "error": error }))).into_response()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
