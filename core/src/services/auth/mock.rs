//! In-memory identity provider for unit and integration tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Account, SessionToken, UserProfile};
use crate::errors::DomainError;
use crate::services::auth::traits::IdentityProvider;

/// Account store backed by a `HashMap`, keyed by account id
#[derive(Clone, Default)]
pub struct MockIdentityProvider {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    profiles: Arc<RwLock<HashMap<Uuid, UserProfile>>>,
    sessions: Arc<RwLock<Vec<Uuid>>>,
    fail: bool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every call fails, for error-path tests
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Seed an existing account, returning its id
    pub async fn put_account(&self, email: &str) -> Uuid {
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
        };
        let id = account.id;
        self.accounts.write().await.insert(id, account);
        id
    }

    pub async fn profile_for(&self, account_id: Uuid) -> Option<UserProfile> {
        self.profiles.read().await.get(&account_id).cloned()
    }

    /// Account ids a session was created for, in order
    pub async fn created_sessions(&self) -> Vec<Uuid> {
        self.sessions.read().await.clone()
    }

    fn guard(&self) -> Result<(), DomainError> {
        if self.fail {
            Err(DomainError::StoreUnavailable {
                message: "mock identity provider failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        _password: Option<&str>,
    ) -> Result<Uuid, DomainError> {
        self.guard()?;
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == email) {
            return Err(DomainError::StoreUnavailable {
                message: format!("account already exists for {}", email),
            });
        }
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
        };
        let id = account.id;
        accounts.insert(id, account);
        Ok(id)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.guard()?;
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn create_session(&self, account_id: Uuid) -> Result<SessionToken, DomainError> {
        self.guard()?;
        self.sessions.write().await.push(account_id);
        Ok(SessionToken {
            access_token: format!("mock-session-{}", account_id),
        })
    }

    async fn upsert_profile(
        &self,
        account_id: Uuid,
        profile: UserProfile,
    ) -> Result<(), DomainError> {
        self.guard()?;
        self.profiles.write().await.insert(account_id, profile);
        Ok(())
    }

    async fn set_profile_role(&self, account_id: Uuid, role: &str) -> Result<(), DomainError> {
        self.guard()?;
        let mut profiles = self.profiles.write().await;
        match profiles.get_mut(&account_id) {
            Some(profile) => {
                profile.role = role.to_string();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "user_profiles".to_string(),
            }),
        }
    }
}
