//! # Kas Core
//!
//! Core business logic and domain layer for the kas-backend gateway.
//! This crate contains the domain entities, the OTP issuance and
//! verification services, repository interfaces for the managed store,
//! and the error taxonomy shared by every layer above it.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
