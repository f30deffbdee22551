//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Pricing(PricingError::InvalidField { field, message }) => {
                tracing::debug!("Rejected quote request: {} ({})", message, field);
                (
                    StatusCode::BAD_REQUEST,
                    PricingErrorResponse {
                        error_type: "invalid_field".to_string(),
                        message,
                        details: Some(serde_json::json!({ "field": field })),
                    },
                )
            }
            AppError::Pricing(PricingError::Configuration { message, errors }) => {
                tracing::warn!("Rejected rate policy: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    PricingErrorResponse {
                        error_type: "configuration_error".to_string(),
                        message,
                        details: Some(serde_json::json!({ "errors": errors })),
                    },
                )
            }
            AppError::MalformedPayload(msg) => {
                tracing::debug!("Malformed payload: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    PricingErrorResponse {
                        error_type: "malformed_payload".to_string(),
                        message: msg,
                        details: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
