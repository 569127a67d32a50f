//! # Infrastructure Layer
//!
//! Concrete implementations of the core collaborator traits:
//! - **Store**: the managed Postgres-over-REST store (OTP codes, ledgers,
//!   profiles) and its identity/admin API
//! - **Mail**: SMTP transport for OTP codes and admin notifications
//!
//! Everything here speaks to the outside world; the core crate only
//! sees the traits.

// Re-export core error types for convenience
pub use kas_core::errors::*;

/// Managed store module - REST data access and identity provider
pub mod store;

/// Mail module - SMTP delivery
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error against the managed store
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mail transport error
    #[error("Mail error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
