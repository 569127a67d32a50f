//! Authentication orchestration: OTP issuance gating and post-verification
//! provisioning or login.

use std::sync::Arc;
use uuid::Uuid;

use kas_shared::utils::validation::is_present;

use crate::domain::entities::{Account, SessionToken, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::otp::OtpRepository;
use crate::services::otp::{Mailer, OtpService};

use super::rate_limiter::{RateLimitCategory, RateLimitDecision, RateLimiterTrait};
use super::traits::IdentityProvider;

/// Optional registration payload accompanying a verification request
///
/// Password and full name travel together: both present means register,
/// both absent means login, anything in between is rejected before the
/// code is consumed.
#[derive(Debug, Clone, Default)]
pub struct RegistrationFields {
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub kelas_id: Option<Uuid>,
    pub absen: Option<i32>,
}

impl RegistrationFields {
    fn is_empty(&self) -> bool {
        self.password.is_none() && self.full_name.is_none()
    }
}

/// Result of a successful OTP verification
#[derive(Debug, Clone)]
pub enum VerifyOtpOutcome {
    /// A new account and profile were provisioned
    Registered { user_id: Uuid },
    /// An existing account got a fresh session
    LoggedIn {
        session: SessionToken,
        account: Account,
    },
}

/// Authentication service coordinating OTP, rate limiting and the
/// identity provider
pub struct AuthService<O, M, I, R>
where
    O: OtpRepository,
    M: Mailer,
    I: IdentityProvider,
    R: RateLimiterTrait,
{
    otp_service: Arc<OtpService<O, M>>,
    identity: Arc<I>,
    rate_limiter: Arc<R>,
}

impl<O, M, I, R> AuthService<O, M, I, R>
where
    O: OtpRepository,
    M: Mailer,
    I: IdentityProvider,
    R: RateLimiterTrait,
{
    pub fn new(otp_service: Arc<OtpService<O, M>>, identity: Arc<I>, rate_limiter: Arc<R>) -> Self {
        Self {
            otp_service,
            identity,
            rate_limiter,
        }
    }

    /// Request an OTP for an email address
    ///
    /// The per-client OTP limit (3 per 5 minutes) is checked before any
    /// code is generated, so a throttled request leaves no trace in the
    /// store and sends no mail.
    pub async fn request_otp(&self, email: &str, client: &str) -> DomainResult<()> {
        if !is_present(email) {
            return Err(DomainError::missing_fields(&["email"]));
        }

        match self
            .rate_limiter
            .check(client, RateLimitCategory::Otp)
            .await
        {
            RateLimitDecision::Limited {
                retry_after_seconds,
            } => {
                return Err(DomainError::Auth(AuthError::RateLimited {
                    retry_after_seconds,
                }));
            }
            RateLimitDecision::Allowed { .. } => {}
        }

        self.otp_service.issue_code(email).await?;
        Ok(())
    }

    /// Verify an OTP and either provision a new account or log in
    ///
    /// The code is consumed exactly once, before any identity-provider
    /// call. A provisioning failure after consumption does not restore
    /// the code; the user requests a new one.
    pub async fn verify_otp(
        &self,
        email: &str,
        code: &str,
        registration: Option<RegistrationFields>,
    ) -> DomainResult<VerifyOtpOutcome> {
        let missing = kas_shared::utils::validation::missing_fields(&[
            ("email", email),
            ("otp_code", code),
        ]);
        if !missing.is_empty() {
            return Err(DomainError::missing_fields(&missing));
        }

        let registration = registration.filter(|r| !r.is_empty());
        if let Some(fields) = &registration {
            // both or neither; a lone password or name is a client bug
            let mut missing = Vec::new();
            if fields.password.is_none() {
                missing.push("password");
            }
            if fields.full_name.is_none() {
                missing.push("full_name");
            }
            if !missing.is_empty() {
                return Err(DomainError::missing_fields(&missing));
            }
        }

        self.otp_service.verify_code(email, code).await?;

        match registration {
            Some(fields) => self.register(email, fields).await,
            None => self.login(email).await,
        }
    }

    async fn register(
        &self,
        email: &str,
        fields: RegistrationFields,
    ) -> DomainResult<VerifyOtpOutcome> {
        let password = fields.password.as_deref();
        let full_name = fields.full_name.clone().unwrap_or_default();

        let user_id = self
            .identity
            .create_account(email, password)
            .await
            .map_err(provisioning_failure)?;

        let profile = UserProfile::new_registration(full_name, fields.kelas_id, fields.absen);
        self.identity
            .upsert_profile(user_id, profile)
            .await
            .map_err(provisioning_failure)?;

        tracing::info!(
            email = email,
            user_id = %user_id,
            event = "account_registered",
            "Provisioned new account and profile"
        );
        Ok(VerifyOtpOutcome::Registered { user_id })
    }

    async fn login(&self, email: &str) -> DomainResult<VerifyOtpOutcome> {
        let account = self
            .identity
            .find_account_by_email(email)
            .await
            .map_err(provisioning_failure)?
            .ok_or_else(|| {
                DomainError::Auth(AuthError::ProvisioningFailed {
                    message: "akun belum terdaftar".to_string(),
                })
            })?;

        let session = self
            .identity
            .create_session(account.id)
            .await
            .map_err(provisioning_failure)?;

        tracing::info!(
            email = email,
            user_id = %account.id,
            event = "session_issued",
            "Issued session after OTP login"
        );
        Ok(VerifyOtpOutcome::LoggedIn { session, account })
    }
}

fn provisioning_failure(err: DomainError) -> DomainError {
    tracing::error!(
        error = %err,
        event = "provisioning_failed",
        "Identity provider call failed"
    );
    DomainError::Auth(AuthError::ProvisioningFailed {
        message: err.to_string(),
    })
}
