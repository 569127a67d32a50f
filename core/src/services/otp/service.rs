//! OTP issuance and verification service

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::otp::{MarkUsedOutcome, OtpRepository};

use super::config::OtpServiceConfig;
use super::traits::Mailer;

/// Service handling the OTP lifecycle: generate, persist, dispatch, redeem
pub struct OtpService<O: OtpRepository, M: Mailer> {
    /// Store for OTP records
    otp_repository: Arc<O>,
    /// Mail collaborator for code delivery
    mailer: Arc<M>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<O: OtpRepository, M: Mailer> OtpService<O, M> {
    /// Create a new OTP service
    pub fn new(otp_repository: Arc<O>, mailer: Arc<M>, config: OtpServiceConfig) -> Self {
        Self {
            otp_repository,
            mailer,
            config,
        }
    }

    /// Issue a one-time code for an email address
    ///
    /// This method:
    /// 1. Generates a uniformly random 6-digit code with a 5-minute expiry
    /// 2. Upserts the record keyed by email, invalidating any prior code
    /// 3. Dispatches the code by mail
    ///
    /// Mail failure is loud: the user has no code without it. The
    /// persisted record stays redeemable after a failed dispatch; a
    /// re-request replaces it via the upsert.
    ///
    /// # Returns
    ///
    /// * `Ok(OtpRecord)` - The issued record (the code never reaches the HTTP response)
    /// * `Err(DomainError)` - `StoreUnavailable` or `MailDispatchFailed`
    pub async fn issue_code(&self, email: &str) -> DomainResult<OtpRecord> {
        let record =
            OtpRecord::new_with_expiration(email.to_string(), self.config.code_expiration_minutes);

        tracing::info!(
            email = email,
            event = "otp_issued",
            otp_id = %record.id,
            "Generated new OTP record"
        );

        self.otp_repository.upsert(record.clone()).await.map_err(|e| {
            tracing::error!(
                email = email,
                error = %e,
                event = "otp_store_failed",
                "Failed to persist OTP record"
            );
            e
        })?;

        let subject = "Kode OTP Kas App";
        let body = otp_email_body(&record.code, self.config.code_expiration_minutes);
        self.mailer.send(email, subject, &body).await.map_err(|e| {
            tracing::error!(
                email = email,
                error = %e,
                event = "otp_mail_failed",
                "Failed to dispatch OTP email"
            );
            DomainError::Auth(AuthError::MailDispatchFailed)
        })?;

        Ok(record)
    }

    /// Verify a submitted code and consume it
    ///
    /// Lookup misses (wrong code or unknown email) are one
    /// indistinguishable `InvalidCode`. Expiry is checked before
    /// consumption so an expired code reports `ExpiredCode` even while
    /// unused. The conditional mark-used update arbitrates concurrent
    /// redemptions: the loser gets `AlreadyUsed`.
    ///
    /// # Returns
    ///
    /// * `Ok(OtpRecord)` - The consumed record
    /// * `Err(DomainError)` - `InvalidCode`, `ExpiredCode`, `AlreadyUsed`,
    ///   or `StoreUnavailable`
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<OtpRecord> {
        let record = self
            .otp_repository
            .find_latest_unused(email, code)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCode))?;

        if record.is_expired_at(Utc::now()) {
            tracing::info!(
                email = email,
                event = "otp_expired",
                otp_id = %record.id,
                "Verification attempted with expired code"
            );
            return Err(DomainError::Auth(AuthError::ExpiredCode));
        }

        match self.otp_repository.mark_used(record.id).await? {
            MarkUsedOutcome::Marked => {
                tracing::info!(
                    email = email,
                    event = "otp_redeemed",
                    otp_id = %record.id,
                    "OTP verified and consumed"
                );
                Ok(record)
            }
            MarkUsedOutcome::AlreadyUsed => {
                tracing::warn!(
                    email = email,
                    event = "otp_replay",
                    otp_id = %record.id,
                    "Lost mark-used race or replayed code"
                );
                Err(DomainError::Auth(AuthError::AlreadyUsed))
            }
        }
    }
}

/// Render the OTP email body with the plaintext code and expiry notice
fn otp_email_body(code: &str, expiration_minutes: i64) -> String {
    format!(
        "<p>Hai,</p>\
         <p>Kode OTP kamu: <b>{}</b></p>\
         <p>Kode ini berlaku {} menit. Jangan bagikan ke siapa pun.</p>",
        code, expiration_minutes
    )
}
