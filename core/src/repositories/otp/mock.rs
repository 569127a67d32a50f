//! Mock implementation of OtpRepository for testing

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

use super::trait_::{MarkUsedOutcome, OtpRepository};

/// In-memory OTP repository keyed by email
///
/// Mirrors the upsert-by-email semantics of the store table. The
/// write lock makes `mark_used` a single check-and-set critical
/// section, matching the conditional-update contract.
pub struct MockOtpRepository {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
    fail: bool,
}

impl MockOtpRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail: false,
        }
    }

    /// Create a mock whose every operation fails with `StoreUnavailable`
    pub fn failing() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail: true,
        }
    }

    /// Fetch the stored record for an email (test helper)
    pub async fn stored_record(&self, email: &str) -> Option<OtpRecord> {
        self.records.read().await.get(email).cloned()
    }

    /// Overwrite the stored record (test helper for expiry scenarios)
    pub async fn put_record(&self, record: OtpRecord) {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record);
    }

    fn unavailable(&self) -> DomainError {
        DomainError::StoreUnavailable {
            message: "mock store failure".to_string(),
        }
    }
}

impl Default for MockOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn upsert(&self, record: OtpRecord) -> Result<(), DomainError> {
        if self.fail {
            return Err(self.unavailable());
        }
        self.records
            .write()
            .await
            .insert(record.email.clone(), record);
        Ok(())
    }

    async fn find_latest_unused(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError> {
        if self.fail {
            return Err(self.unavailable());
        }
        let records = self.records.read().await;
        Ok(records
            .get(email)
            .filter(|r| !r.used && constant_time_eq(r.code.as_bytes(), code.as_bytes()))
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<MarkUsedOutcome, DomainError> {
        if self.fail {
            return Err(self.unavailable());
        }
        let mut records = self.records.write().await;
        match records.values_mut().find(|r| r.id == id) {
            Some(record) if !record.used => {
                record.used = true;
                Ok(MarkUsedOutcome::Marked)
            }
            _ => Ok(MarkUsedOutcome::AlreadyUsed),
        }
    }
}
