//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// A single fixed-window limit: at most `max_requests` per `window_seconds`
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CategoryLimit {
    /// Window length in seconds
    pub window_seconds: u64,

    /// Maximum requests allowed within one window
    pub max_requests: u32,
}

/// Rate limiting configuration
///
/// Two categories mirror the gateway's protection tiers: a `general`
/// limit applied to every route and a stricter `otp` limit applied to
/// OTP issuance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Limit applied to all routes, keyed per client IP
    pub general: CategoryLimit,

    /// Limit applied to OTP issuance, keyed per client IP
    pub otp: CategoryLimit,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            general: CategoryLimit {
                window_seconds: 15 * 60,
                max_requests: 100,
            },
            otp: CategoryLimit {
                window_seconds: 5 * 60,
                max_requests: 3,
            },
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            enabled: true,
            general: CategoryLimit {
                window_seconds: 15 * 60,
                max_requests: 10_000,
            },
            otp: CategoryLimit {
                window_seconds: 5 * 60,
                max_requests: 100,
            },
        }
    }

    /// Create a production configuration (the defaults)
    pub fn production() -> Self {
        Self::default()
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.general.max_requests, 100);
        assert_eq!(config.general.window_seconds, 900);
        assert_eq!(config.otp.max_requests, 3);
        assert_eq!(config.otp.window_seconds, 300);
    }
}
