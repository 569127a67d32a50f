//! Authentication service module
//!
//! This module orchestrates the OTP flow end to end:
//! - OTP issuance gated by the per-client rate limiter
//! - OTP verification followed by account provisioning or session issuance
//! - The identity-provider seam to the managed auth store

mod rate_limiter;
mod service;
mod traits;

pub mod mock;

#[cfg(test)]
mod tests;

pub use mock::MockIdentityProvider;
pub use rate_limiter::{
    InMemoryRateLimiter, RateLimitCategory, RateLimitDecision, RateLimiterTrait,
};
pub use service::{AuthService, RegistrationFields, VerifyOtpOutcome};
pub use traits::IdentityProvider;
