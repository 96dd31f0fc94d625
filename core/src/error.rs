//! Error types for the User API client.
//!
//! # Design
//! `Validation` is raised before any request is built, so it never implies
//! network traffic. `Request` covers every non-2xx response and carries the
//! server's `error` message when one was sent. Transport and codec failures
//! keep their own variants with the underlying message.

use thiserror::Error;

pub const INVALID_USER_ID: &str = "Invalid user ID";
pub const MISSING_FIELDS: &str = "Username and email are required";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const REQUEST_FAILED: &str = "Request failed";

/// Errors returned by `UserClient` and `ApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A client-side precondition failed; no request was issued.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body was not valid JSON for the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub(crate) fn validation(message: &str) -> Self {
        ApiError::Validation(message.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    pub fn is_request(&self) -> bool {
        matches!(self, ApiError::Request { .. })
    }

    /// HTTP status of a `Request` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
