//! Trait for the identity + profile store collaborator

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::{Account, SessionToken, UserProfile};
use crate::errors::DomainError;

/// Interface to the managed identity provider and its profile table
///
/// The gateway never sees password hashes or session internals; it
/// calls these operations and forwards the results.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account, returning the provider-assigned id
    ///
    /// The password is optional: OTP-verified registrations may set one
    /// for later password login, or omit it entirely.
    async fn create_account(
        &self,
        email: &str,
        password: Option<&str>,
    ) -> Result<Uuid, DomainError>;

    /// Look up an account by email
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Issue a session for an account (no password involved; the OTP
    /// check already authenticated the caller)
    async fn create_session(&self, account_id: Uuid) -> Result<SessionToken, DomainError>;

    /// Insert or replace the profile row for an account
    async fn upsert_profile(
        &self,
        account_id: Uuid,
        profile: UserProfile,
    ) -> Result<(), DomainError>;

    /// Update only the role field of a profile
    async fn set_profile_role(&self, account_id: Uuid, role: &str) -> Result<(), DomainError>;
}
