//! OTP issuance and verification for email-based authentication
//!
//! This module owns the one component of the gateway with real
//! temporal state: issuing 6-digit codes, dispatching them by mail,
//! and redeeming them exactly once before expiry.

mod config;
mod service;
mod traits;

pub mod mock;


pub use config::OtpServiceConfig;
pub use mock::MockMailer;
pub use service::OtpService;
pub use traits::Mailer;
