//! Response types for the payroll API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{DashboardStats, DataKind};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
            EngineError::InvalidPolicy { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Invalid salary policy", message),
            ),
            EngineError::PricingNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("PRICING_NOT_FOUND", message),
            ),
            EngineError::InvalidPricing { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_PRICING",
                    message,
                    "The pricing entry contains invalid information",
                ),
            ),
            EngineError::DuplicatePricing { key } => Self::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DUPLICATE_PRICING",
                    message,
                    format!("Update the existing entry for '{}' instead", key),
                ),
            ),
            EngineError::TeacherNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("TEACHER_NOT_FOUND", message),
            ),
            EngineError::PaymentNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("PAYMENT_NOT_FOUND", message),
            ),
            EngineError::InvalidPaymentTransition { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "INVALID_PAYMENT_TRANSITION",
                    message,
                    "Only pending payments can be reviewed",
                ),
            ),
            EngineError::ValidationError { .. } => {
                Self::new(StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            EngineError::DataSource { .. } => Self::new(
                StatusCode::BAD_GATEWAY,
                ApiError::with_details(
                    "DATA_SOURCE_ERROR",
                    "The data source request failed",
                    message,
                ),
            ),
        }
    }
}

/// Response body for `/admin/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// The table refreshed, or none for a full reload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DataKind>,
    /// Stats after the refresh.
    pub stats: DashboardStats,
}
