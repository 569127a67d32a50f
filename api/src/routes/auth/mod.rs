//! Authentication route handlers
//!
//! - `POST /auth/request-otp`: issue and mail a one-time code
//! - `POST /auth/verify-otp`: redeem a code; register or log in

pub mod request_otp;
pub mod verify_otp;
