//! API Response types
//!
//! Standardized response envelope for the entire platform

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "success": true,
///     "message": "Reservation confirmed",
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message (optional on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Create a successful response carrying only a message
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Create an error response with data (e.g. conflict details)
    pub fn error_with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_skips_empty_fields() {
        let resp = ApiResponse::ok(42);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_error_has_message() {
        let resp: ApiResponse<()> = ApiResponse::error("Tables already reserved: 2");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Tables already reserved: 2");
    }
}
