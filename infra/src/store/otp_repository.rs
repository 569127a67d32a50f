//! OTP repository backed by the store's `otp_codes` table

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use kas_core::domain::entities::OtpRecord;
use kas_core::errors::DomainError;
use kas_core::repositories::otp::{MarkUsedOutcome, OtpRepository};

use super::client::StoreClient;

const TABLE: &str = "otp_codes";

pub struct SupabaseOtpRepository {
    client: Arc<StoreClient>,
}

impl SupabaseOtpRepository {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OtpRepository for SupabaseOtpRepository {
    async fn upsert(&self, record: OtpRecord) -> Result<(), DomainError> {
        // merge-duplicates on the email unique key: one live code per address
        let request = self
            .client
            .table(Method::POST, TABLE)
            .query(&[("on_conflict", "email")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&record);

        self.client
            .rows::<OtpRecord>(request, "otp upsert")
            .await?;
        Ok(())
    }

    async fn find_latest_unused(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let request = self.client.table(Method::GET, TABLE).query(&[
            ("email", format!("eq.{}", email)),
            ("code", format!("eq.{}", code)),
            ("used", "eq.false".to_string()),
            ("order", "created_at.desc".to_string()),
            ("limit", "1".to_string()),
        ]);

        let mut rows = self
            .client
            .rows::<OtpRecord>(request, "otp lookup")
            .await?;
        let row = rows.drain(..).next();
        Ok(row)
    }

    async fn mark_used(&self, id: Uuid) -> Result<MarkUsedOutcome, DomainError> {
        // conditional update; the affected-row count arbitrates races
        let request = self
            .client
            .table(Method::PATCH, TABLE)
            .query(&[
                ("id", format!("eq.{}", id)),
                ("used", "eq.false".to_string()),
            ])
            .header("Prefer", "return=representation")
            .json(&json!({ "used": true }));

        let rows = self
            .client
            .rows::<OtpRecord>(request, "otp mark used")
            .await?;
        if rows.is_empty() {
            Ok(MarkUsedOutcome::AlreadyUsed)
        } else {
            Ok(MarkUsedOutcome::Marked)
        }
    }
}
