//! Shared error response structure and error codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (retry hints, field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const INVALID_CODE: &str = "INVALID_CODE";
    pub const EXPIRED_CODE: &str = "EXPIRED_CODE";
    pub const ALREADY_USED: &str = "ALREADY_USED";
    pub const PROVISIONING_FAILED: &str = "PROVISIONING_FAILED";
    pub const MAIL_DISPATCH_FAILED: &str = "MAIL_DISPATCH_FAILED";
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serializes_without_empty_details() {
        let response = ErrorResponse::new(error_codes::INVALID_CODE, "Kode OTP salah");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "INVALID_CODE");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_response_with_detail() {
        let response = ErrorResponse::new(error_codes::RATE_LIMITED, "Terlalu banyak request")
            .add_detail("retry_after_seconds", 120);
        let details = response.details.unwrap();
        assert_eq!(details["retry_after_seconds"], 120);
    }
}
