//! Client error types

use thiserror::Error;

use crate::store::StoreError;

/// Client error type
///
/// HTTP 状态码与服务端错误信封 `{success, message, data}` 的 message
/// 一起映射到这里；向导自身的步骤错误用 [`ClientError::Flow`]。
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (401)
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected as conflicting (409): tables already reserved,
    /// duplicate feedback, duplicate account
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation error (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Wizard step out of order, or input outside the allowed window
    #[error("Flow error: {0}")]
    Flow(String),

    /// Local store I/O
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub(crate) fn flow(message: impl Into<String>) -> Self {
        ClientError::Flow(message.into())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
