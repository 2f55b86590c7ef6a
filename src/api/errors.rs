//! API Error Handling
//!
//! Structured error responses with proper HTTP status codes and request tracking.

use crate::errors::PlinkoError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned for every internal failure; details stay in the logs
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Top-level API error response with request tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub error: ErrorBody,
}

/// Error body with structured information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code (BAD_REQUEST, NOT_FOUND, METHOD_NOT_ALLOWED, TIMEOUT, INTERNAL_ERROR)
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API error types with request tracking
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub request_id: String,
}

#[derive(Debug)]
pub enum ApiErrorKind {
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed(String),
    Timeout(String),
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(request_id: String, message: String) -> Self {
        Self {
            kind: ApiErrorKind::BadRequest(message),
            request_id,
        }
    }

    pub fn not_found(request_id: String, message: String) -> Self {
        Self {
            kind: ApiErrorKind::NotFound(message),
            request_id,
        }
    }

    pub fn method_not_allowed(request_id: String, message: String) -> Self {
        Self {
            kind: ApiErrorKind::MethodNotAllowed(message),
            request_id,
        }
    }

    pub fn timeout(request_id: String, message: String) -> Self {
        Self {
            kind: ApiErrorKind::Timeout(message),
            request_id,
        }
    }

    pub fn internal_error(request_id: String, message: String) -> Self {
        Self {
            kind: ApiErrorKind::InternalError(message),
            request_id,
        }
    }

    /// Map a service error: validation failures are echoed, anything else is
    /// logged and replaced by the generic message.
    pub fn from_plinko(request_id: String, error: PlinkoError) -> Self {
        match error {
            PlinkoError::Validation(e) => Self::bad_request(request_id, e.to_string()),
            other => {
                tracing::error!(request_id = %request_id, error = %other, "Play failed");
                Self::internal_error(request_id, GENERIC_FAILURE.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ApiErrorKind::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
            ApiErrorKind::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiErrorKind::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiErrorKind::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ApiErrorKind::BadRequest(msg) => write!(f, "[{}] Bad Request: {}", self.request_id, msg),
            ApiErrorKind::NotFound(msg) => write!(f, "[{}] Not Found: {}", self.request_id, msg),
            ApiErrorKind::MethodNotAllowed(msg) => write!(f, "[{}] Method Not Allowed: {}", self.request_id, msg),
            ApiErrorKind::Timeout(msg) => write!(f, "[{}] Timeout: {}", self.request_id, msg),
            ApiErrorKind::InternalError(msg) => write!(f, "[{}] Internal Error: {}", self.request_id, msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self.kind {
            ApiErrorKind::BadRequest(msg) => ("BAD_REQUEST", msg),
            ApiErrorKind::NotFound(msg) => ("NOT_FOUND", msg),
            ApiErrorKind::MethodNotAllowed(msg) => ("METHOD_NOT_ALLOWED", msg),
            ApiErrorKind::Timeout(msg) => ("TIMEOUT", msg),
            ApiErrorKind::InternalError(msg) => ("INTERNAL_ERROR", msg),
        };

        let body = Json(ErrorResponse {
            request_id: self.request_id,
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}
