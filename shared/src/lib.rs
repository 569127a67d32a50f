//! Shared utilities and common types for the kas-backend server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures and error codes
//! - Validation helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{MailConfig, RateLimitConfig, ServerConfig, StoreConfig};
pub use errors::{error_codes, ErrorResponse};
