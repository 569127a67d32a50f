//! Domain-specific error types and error handling.

use kas_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Authentication and OTP-flow errors
///
/// `InvalidCode` deliberately covers both "wrong code" and "no such
/// email" so responses never reveal whether an address is registered.
/// `ExpiredCode` stays distinct so clients can prompt a re-request
/// instead of re-entry.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Kode OTP salah")]
    InvalidCode,

    #[error("Kode OTP sudah kedaluwarsa, minta kode baru")]
    ExpiredCode,

    #[error("Kode OTP sudah dipakai")]
    AlreadyUsed,

    #[error("Terlalu banyak request, coba lagi dalam {retry_after_seconds} detik")]
    RateLimited { retry_after_seconds: i64 },

    #[error("Gagal membuat akun: {message}")]
    ProvisioningFailed { message: String },

    #[error("Gagal mengirim email OTP")]
    MailDispatchFailed,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to the auth-specific taxonomy
    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Convenience constructor for missing-field validation failures,
    /// phrased the way the original gateway did ("email wajib")
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::Validation {
            message: format!("{} wajib", fields.join(", ")),
        }
    }

    /// Machine-readable error code for the JSON error payload
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => error_codes::VALIDATION_ERROR,
            Self::NotFound { .. } => error_codes::NOT_FOUND,
            Self::StoreUnavailable { .. } => error_codes::STORE_UNAVAILABLE,
            Self::Internal { .. } => error_codes::INTERNAL_ERROR,
            Self::Auth(auth) => match auth {
                AuthError::InvalidCode => error_codes::INVALID_CODE,
                AuthError::ExpiredCode => error_codes::EXPIRED_CODE,
                AuthError::AlreadyUsed => error_codes::ALREADY_USED,
                AuthError::RateLimited { .. } => error_codes::RATE_LIMITED,
                AuthError::ProvisioningFailed { .. } => error_codes::PROVISIONING_FAILED,
                AuthError::MailDispatchFailed => error_codes::MAIL_DISPATCH_FAILED,
            },
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let response = ErrorResponse::new(err.error_code(), err.to_string());
        match err {
            DomainError::Auth(AuthError::RateLimited {
                retry_after_seconds,
            }) => response.add_detail("retry_after_seconds", retry_after_seconds),
            _ => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DomainError::Auth(AuthError::InvalidCode).error_code(),
            "INVALID_CODE"
        );
        assert_eq!(
            DomainError::Auth(AuthError::ExpiredCode).error_code(),
            "EXPIRED_CODE"
        );
        assert_eq!(
            DomainError::Auth(AuthError::AlreadyUsed).error_code(),
            "ALREADY_USED"
        );
        assert_eq!(
            DomainError::missing_fields(&["email"]).error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_missing_fields_message() {
        let err = DomainError::missing_fields(&["email", "password"]);
        assert_eq!(err.to_string(), "email, password wajib");
    }

    #[test]
    fn test_rate_limited_response_carries_retry_hint() {
        let err = DomainError::Auth(AuthError::RateLimited {
            retry_after_seconds: 120,
        });
        let response: ErrorResponse = (&err).into();
        assert_eq!(response.error, "RATE_LIMITED");
        assert_eq!(response.details.unwrap()["retry_after_seconds"], 120);
    }

    #[test]
    fn test_invalid_code_does_not_mention_email() {
        // the same error for wrong code and unknown email
        let message = DomainError::Auth(AuthError::InvalidCode).to_string();
        assert!(!message.contains("email"));
    }
}
