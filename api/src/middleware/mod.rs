//! HTTP middleware: CORS and the general request rate limit

pub mod cors;
pub mod rate_limit;
