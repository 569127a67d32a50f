//! Business services containing domain logic and use cases.

pub mod auth;
pub mod otp;

// Re-export commonly used types
pub use auth::{
    AuthService, IdentityProvider, InMemoryRateLimiter, RateLimitCategory, RateLimitDecision,
    RateLimiterTrait, RegistrationFields, VerifyOtpOutcome,
};
pub use otp::{Mailer, OtpService, OtpServiceConfig};
