//! The `{ success, data, error }` envelope every endpoint answers with.

use std::error::Error;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::StoreError;

/// Uniform response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ApiResponse {
    /// A successful response carrying `data`.
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A successful response carrying any serializable value.
    pub fn from_data<T: Serialize>(data: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(data).map_err(StoreError::from)?;
        Ok(Self::ok(value))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                message: message.into(),
            }),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub type ApiResult = Result<ApiResponse, ApiError>;

/// Error type for route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The addressed resource does not exist.
    NotFound(String),
    /// The request cannot be applied in the current state (e.g. a full event).
    BadRequest(String),
    /// The request body or parameters failed validation.
    Rejected(String),
    /// No caller identity, or one that does not resolve to a user.
    Unauthorized(String),
    /// The caller may not act on this resource.
    Forbidden(String),
    /// Store failure.
    Store(StoreError),
}

impl ApiError {
    /// `"<what> not found"`, the message the 404s carry.
    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{} not found", what))
    }

    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::BadRequest(_) => 400,
            ApiError::Rejected(_) => 422,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::Store(e) if e.is_not_found() => 404,
            ApiError::Store(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Rejected(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg) => f.write_str(msg),
            ApiError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}
