//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//!
//! 所有错误最终序列化为统一响应信封：
//!
//! ```json
//! { "success": false, "message": "Tables already reserved: 2" }
//! ```
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Order QR009 not found"))
//!
//! // 返回成功响应
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::ApiResponse;
use tracing::error;

use crate::db::repository::RepoError;

/// 应用错误枚举
///
/// # 错误分类
///
/// | 分类 | 状态码 |
/// |------|--------|
/// | 认证错误 | 401 |
/// | 权限错误 | 403 |
/// | 资源不存在 | 404 |
/// | 资源冲突 | 409 |
/// | 验证/业务规则 | 400 |
/// | 数据库/内部错误 | 500 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ========== 权限错误 (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    // ========== 系统错误 (500) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Authentication errors (401)
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Please login first".to_string())
            }
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
            AppError::InvalidToken(_) => {
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }

            // Authorization errors (403)
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            // Conflict (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),

            // Validation / business rules (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // Database errors (500) - driver message passed through, internal tool
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = Json(ApiResponse::<()>::error(message));
        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an invalid credentials error with unified message
    /// Used to prevent username enumeration during login
    pub fn invalid_credentials() -> Self {
        Self::Invalid("Invalid username or password".to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Field-level messages, joined in field order
        let mut messages: Vec<String> = Vec::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                match &err.message {
                    Some(msg) => messages.push(msg.to_string()),
                    None => messages.push(format!("{field} is invalid")),
                }
            }
        }
        messages.sort();
        messages.dedup();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok_with_message(data, message))
}
