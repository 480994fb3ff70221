use reqwest::StatusCode;
use thiserror::Error;

/// Everything a call to the Business Manager API can fail with.
///
/// `Status` is the single user-facing kind: its display is exactly the
/// message the service sent (or the generic status fallback).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("auth token is not a valid header value")]
    InvalidToken,

    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Message for a non-2xx response whose body carried no usable `detail`.
    pub fn status_fallback(status: StatusCode) -> Self {
        ApiError::Status {
            status,
            message: format!("HTTP error! status: {}", status.as_u16()),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Registration response did not contain a user id")]
    MissingUserId,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}
