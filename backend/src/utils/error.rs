use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use super::i18n::get_locale;
use crate::models::Locale;

/// API Error with rich context and automatic error trait implementations
///
/// Each variant carries enough context for the log line; the client sees
/// the localized message from [`ApiError::localized_message`].
#[derive(Error, Debug)]
pub enum ApiError {
    // Resource errors 3xxx
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Font {0} is not in the catalog")]
    FontNotFound(String),

    // Validation errors 4xxx
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Upstream request failed: {0}")]
    UpstreamFailed(String),

    #[error("Feature not configured: {0}")]
    NotConfigured(String),

    // Generic wrapper for other errors - auto-convert from anyhow::Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Helper to create invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Helper to create not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound(message.into())
    }

    /// Helper to create upstream failure error
    pub fn upstream_failed(message: impl Into<String>) -> Self {
        Self::UpstreamFailed(message.into())
    }

    pub fn error_code(&self) -> i32 {
        match self {
            // Resource errors 3xxx
            Self::ResourceNotFound(_) => 3000,
            Self::FontNotFound(_) => 3001,

            // Validation errors 4xxx
            Self::ValidationError(_) => 4001,
            Self::InvalidInput(_) => 4002,
            Self::MissingParameter(_) => 4003,

            // System errors 5xxx
            Self::InternalError(_) => 5001,
            Self::Other(_) => 5001,
            Self::UpstreamFailed(_) => 5003,
            Self::NotConfigured(_) => 5004,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error_code() {
            3000..=3999 => StatusCode::NOT_FOUND,
            4001..=4999 => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
}

impl ApiError {
    /// Get localized error message based on current locale
    pub fn localized_message(&self) -> String {
        self.message_in(get_locale())
    }

    pub fn message_in(&self, locale: Locale) -> String {
        let locale = locale.code();
        match self {
            Self::ResourceNotFound(name) => {
                t!("resource.not_found", locale = locale, name = name).to_string()
            },
            Self::FontNotFound(key) => t!("font.not_found", locale = locale, key = key).to_string(),
            Self::ValidationError(details) => {
                t!("validation.failed", locale = locale, details = details).to_string()
            },
            Self::InvalidInput(msg) => msg.clone(),
            Self::MissingParameter(name) => {
                t!("validation.missing_parameter", locale = locale, name = name).to_string()
            },
            // Upstream and internal details stay in the logs.
            Self::UpstreamFailed(_) => t!("upstream.failed", locale = locale).to_string(),
            Self::NotConfigured(feature) => {
                t!("internal.not_configured", locale = locale, feature = feature).to_string()
            },
            Self::InternalError(_) | Self::Other(_) => {
                t!("internal.error", locale = locale).to_string()
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let response =
            ApiErrorResponse { code: self.error_code(), message: self.localized_message() };

        (status, Json(response)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::validation_error(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
