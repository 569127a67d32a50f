//! One-time-password record entity for email-based authentication.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Default expiration window for issued codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// One-time-password record keyed by email
///
/// A record is created on issuance and mutated exactly once: `used`
/// flips to `true` on successful verification. Expired records stay in
/// the store but are inert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier, used as the key for the conditional mark-used update
    pub id: Uuid,

    /// Email address the code was sent to (natural key, case-sensitive)
    pub email: String,

    /// The 6-digit code
    pub code: String,

    /// Whether the code has been successfully redeemed
    pub used: bool,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a new record with a random 6-digit code and the default
    /// 5-minute expiry window
    pub fn new(email: String) -> Self {
        Self::new_with_expiration(email, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new record with a custom expiration window
    ///
    /// # Arguments
    ///
    /// * `email` - The address the code will be sent to
    /// * `expiration_minutes` - Minutes until the code expires
    pub fn new_with_expiration(email: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            code: Self::generate_code(),
            used: false,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generates a uniformly random 6-digit code in the range 100000-999999
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Checks whether the code has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks whether the code has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// A record is redeemable while it is unused and unexpired
    pub fn is_redeemable(&self) -> bool {
        !self.used && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_otp_record() {
        let record = OtpRecord::new("budi@example.com".to_string());

        assert_eq!(record.email, "budi@example.com");
        assert_eq!(record.code.len(), CODE_LENGTH);
        assert!(!record.used);
        assert!(!record.is_expired());
        assert!(record.is_redeemable());
        assert_eq!(
            record.expires_at,
            record.created_at + Duration::minutes(DEFAULT_EXPIRATION_MINUTES)
        );
    }

    #[test]
    fn test_generate_code_range() {
        for _ in 0..100 {
            let code = OtpRecord::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);

            let num: u32 = code.parse().expect("code should be numeric");
            assert!((100_000..=999_999).contains(&num));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: Vec<String> = (0..100).map(|_| OtpRecord::generate_code()).collect();

        let unique_count = codes.iter().collect::<std::collections::HashSet<_>>().len();
        assert!(unique_count > 1);
    }

    #[test]
    fn test_custom_expiration() {
        let record = OtpRecord::new_with_expiration("budi@example.com".to_string(), 10);
        assert_eq!(record.expires_at, record.created_at + Duration::minutes(10));
    }

    #[test]
    fn test_expired_record_is_not_redeemable() {
        let mut record = OtpRecord::new("budi@example.com".to_string());
        record.expires_at = Utc::now() - Duration::minutes(1);

        assert!(record.is_expired());
        assert!(!record.is_redeemable());
    }

    #[test]
    fn test_used_record_is_not_redeemable() {
        let mut record = OtpRecord::new("budi@example.com".to_string());
        record.used = true;

        assert!(!record.is_expired());
        assert!(!record.is_redeemable());
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let record = OtpRecord::new("budi@example.com".to_string());

        // Exactly at expires_at the code is still valid; only strictly after
        assert!(!record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_serialization_round_trip() {
        let record = OtpRecord::new("budi@example.com".to_string());

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: OtpRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
