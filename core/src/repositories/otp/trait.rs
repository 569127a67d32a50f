//! OTP repository trait defining the interface for one-time-code persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

/// Outcome of the conditional mark-used update
///
/// The update succeeds only if the record was still unused at update
/// time; its result is the sole arbiter when two verifications race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkUsedOutcome {
    /// This caller flipped `used` from false to true
    Marked,
    /// Another caller got there first (or the record was already redeemed)
    AlreadyUsed,
}

/// Repository trait for OtpRecord persistence operations
///
/// Implementations sit in front of the managed store's `otp_codes`
/// table. Issuance upserts by email so at most one record per address
/// is ever live; the lookup still orders by `created_at` so stores
/// with historical rows behave identically.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Insert or replace the record for `record.email`
    ///
    /// # Returns
    /// * `Ok(())` - Record persisted
    /// * `Err(DomainError::StoreUnavailable)` - Store call failed
    async fn upsert(&self, record: OtpRecord) -> Result<(), DomainError>;

    /// Find the most recently created unused record matching `email` and `code`
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - A matching unused record exists (it may be expired)
    /// * `Ok(None)` - No match; callers must not distinguish "wrong code"
    ///   from "unknown email"
    async fn find_latest_unused(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Atomically flip `used` to true if it was still false
    ///
    /// Must be a single conditional update, never a read-check-write
    /// sequence spread over multiple store calls.
    async fn mark_used(&self, id: Uuid) -> Result<MarkUsedOutcome, DomainError>;
}
