//! Planner error types and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{Value, json};
use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid request: {details}")]
    InvalidRequest { details: String },

    #[error("{message}: {status}")]
    UpstreamError { status: String, message: String, details: Value },

    #[error("Transport error: {message}")]
    TransportError { message: String },

    #[error("Visit store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Server startup error: {0}")]
    ServerStartup(String),
}

impl PlannerError {
    pub fn invalid(details: impl Into<String>) -> Self {
        Self::InvalidRequest { details: details.into() }
    }

    /// Directions provider rejection carrying the provider's full response
    pub fn upstream(status: impl Into<String>, details: Value) -> Self {
        Self::UpstreamError {
            status: status.into(),
            message: "Directions API error".to_string(),
            details,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// HTTP status code surfaced to API callers
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            PlannerError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            PlannerError::UpstreamError { .. }
            | PlannerError::TransportError { .. }
            | PlannerError::Config { .. }
            | PlannerError::ServerStartup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SharedError> for PlannerError {
    fn from(e: SharedError) -> Self {
        match e {
            SharedError::StoreUnavailable { message } => PlannerError::StoreUnavailable { message },
            SharedError::InvalidUserId { .. } => PlannerError::invalid(e.to_string()),
            SharedError::SerializationError { .. } => PlannerError::StoreUnavailable { message: e.to_string() },
        }
    }
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            PlannerError::InvalidRequest { details } => json!({ "error": details }),
            PlannerError::UpstreamError { message, details, .. } if details.is_null() => json!({ "error": message }),
            PlannerError::UpstreamError { status, message, details } => json!({
                "error": format!("{message}: {status}"),
                "details": details,
            }),
            PlannerError::TransportError { message } => json!({
                "error": "Failed to reach upstream service",
                "details": message,
            }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
