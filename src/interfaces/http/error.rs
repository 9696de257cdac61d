use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::domain::errors::ScoringError;

/// Client-visible error for the prediction endpoints.
#[derive(Debug)]
pub enum ApiError {
    /// The payload failed type or range constraints. Maps to HTTP 422 with
    /// the offending field named when known.
    Validation {
        field: Option<String>,
        message: String,
    },
    /// A model invocation failed. Details are logged, never returned.
    Internal(String),
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::Validation(v) => ApiError::Validation {
                field: Some(v.field.to_string()),
                message: v.to_string(),
            },
            ScoringError::Inference(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            field: None,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { field, message } => {
                let body = match field {
                    Some(field) => json!({ "error": message, "field": field }),
                    None => json!({ "error": message }),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Internal(detail) => {
                error!("Inference failed: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error" })),
                )
                    .into_response()
            }
        }
    }
}
