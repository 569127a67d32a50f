//! Fixed-window rate limiting for the gateway
//!
//! Process-wide counters bound request volume per client per window.
//! The limiter is an injected, explicitly owned component; tests drive
//! it deterministically through `check_at`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use kas_shared::config::rate_limit::{CategoryLimit, RateLimitConfig};

/// Protection tier a request falls under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitCategory {
    /// Every route: 100 requests per 15 minutes per client
    General,
    /// OTP issuance: 3 requests per 5 minutes per client
    Otp,
}

/// Allow/deny decision for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed {
        remaining: u32,
    },
    Limited {
        retry_after_seconds: i64,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Rate limiting service trait
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Record a request from `client` and decide allow/deny
    async fn check(&self, client: &str, category: RateLimitCategory) -> RateLimitDecision;
}

struct Window {
    count: u32,
    started_at: DateTime<Utc>,
}

/// In-process fixed-window rate limiter
///
/// Counter updates happen inside one mutex-guarded critical section so
/// concurrent bursts from the same client cannot undercount.
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<(String, RateLimitCategory), Window>>,
}

impl InMemoryRateLimiter {
    /// Create a limiter with the given limits
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn limit_for(&self, category: RateLimitCategory) -> CategoryLimit {
        match category {
            RateLimitCategory::General => self.config.general,
            RateLimitCategory::Otp => self.config.otp,
        }
    }

    /// Record a request at an explicit instant (time-injection seam for tests)
    pub fn check_at(
        &self,
        client: &str,
        category: RateLimitCategory,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        if !self.config.enabled {
            return RateLimitDecision::Allowed { remaining: u32::MAX };
        }

        let limit = self.limit_for(category);
        let window_len = Duration::seconds(limit.window_seconds as i64);

        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // evict elapsed windows so one-off clients do not accumulate
        windows.retain(|(_, cat), window| {
            now - window.started_at < Duration::seconds(self.limit_for(*cat).window_seconds as i64)
        });

        let window = windows
            .entry((client.to_string(), category))
            .or_insert(Window {
                count: 0,
                started_at: now,
            });

        window.count += 1;
        if window.count > limit.max_requests {
            let retry_after_seconds =
                (window.started_at + window_len - now).num_seconds().max(1);
            tracing::warn!(
                client = client,
                category = ?category,
                event = "rate_limited",
                retry_after_seconds,
                "Request rejected by rate limiter"
            );
            RateLimitDecision::Limited {
                retry_after_seconds,
            }
        } else {
            RateLimitDecision::Allowed {
                remaining: limit.max_requests - window.count,
            }
        }
    }

    /// Number of live windows currently tracked
    #[cfg(test)]
    fn tracked_windows(&self) -> usize {
        self.windows.lock().unwrap().len()
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check(&self, client: &str, category: RateLimitCategory) -> RateLimitDecision {
        self.check_at(client, category, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(RateLimitConfig::default())
    }

    #[test]
    fn test_fourth_otp_request_in_window_is_rejected() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..3 {
            assert!(limiter
                .check_at("10.0.0.1", RateLimitCategory::Otp, now)
                .is_allowed());
        }
        let fourth = limiter.check_at("10.0.0.1", RateLimitCategory::Otp, now);
        assert!(matches!(fourth, RateLimitDecision::Limited { .. }));
    }

    #[test]
    fn test_new_window_resets_the_counter() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..4 {
            limiter.check_at("10.0.0.1", RateLimitCategory::Otp, now);
        }

        let later = now + Duration::minutes(5);
        assert!(limiter
            .check_at("10.0.0.1", RateLimitCategory::Otp, later)
            .is_allowed());
    }

    #[test]
    fn test_stale_client_windows_are_evicted() {
        let limiter = limiter();
        let now = Utc::now();

        limiter.check_at("10.0.0.1", RateLimitCategory::Otp, now);
        limiter.check_at("10.0.0.2", RateLimitCategory::Otp, now);
        limiter.check_at("10.0.0.1", RateLimitCategory::General, now);
        assert_eq!(limiter.tracked_windows(), 3);

        // both otp windows have elapsed; the general window (15 min) has not
        let later = now + Duration::minutes(5);
        limiter.check_at("10.0.0.3", RateLimitCategory::Otp, later);
        assert_eq!(limiter.tracked_windows(), 2);
    }

    #[test]
    fn test_clients_and_categories_are_independent() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..4 {
            limiter.check_at("10.0.0.1", RateLimitCategory::Otp, now);
        }

        // another client is unaffected
        assert!(limiter
            .check_at("10.0.0.2", RateLimitCategory::Otp, now)
            .is_allowed());
        // the same client's general bucket is unaffected
        assert!(limiter
            .check_at("10.0.0.1", RateLimitCategory::General, now)
            .is_allowed());
    }

    #[test]
    fn test_general_limit_allows_one_hundred() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..100 {
            assert!(limiter
                .check_at("10.0.0.1", RateLimitCategory::General, now)
                .is_allowed());
        }
        assert!(matches!(
            limiter.check_at("10.0.0.1", RateLimitCategory::General, now),
            RateLimitDecision::Limited { .. }
        ));
    }

    #[test]
    fn test_retry_after_counts_down_to_window_end() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..3 {
            limiter.check_at("10.0.0.1", RateLimitCategory::Otp, now);
        }
        let decision =
            limiter.check_at("10.0.0.1", RateLimitCategory::Otp, now + Duration::minutes(2));
        match decision {
            RateLimitDecision::Limited {
                retry_after_seconds,
            } => assert_eq!(retry_after_seconds, 180),
            other => panic!("expected Limited, got {:?}", other),
        }
    }

    #[test]
    fn test_disabled_limiter_always_allows() {
        let config = RateLimitConfig {
            enabled: false,
            ..RateLimitConfig::default()
        };
        let limiter = InMemoryRateLimiter::new(config);
        let now = Utc::now();

        for _ in 0..500 {
            assert!(limiter
                .check_at("10.0.0.1", RateLimitCategory::Otp, now)
                .is_allowed());
        }
    }

    #[tokio::test]
    async fn test_trait_check_uses_wall_clock() {
        let limiter = limiter();
        assert!(limiter.check("10.0.0.1", RateLimitCategory::Otp).await.is_allowed());
    }
}
