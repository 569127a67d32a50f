//! Identity provider backed by the store's GoTrue admin API
//!
//! Accounts live in the managed auth schema; profiles in the
//! `user_profiles` table keyed by the account id. Sessions are minted
//! server-side by generating a magic link and immediately redeeming its
//! token hash, so no password ever passes through the login path.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use kas_core::domain::entities::{Account, SessionToken, UserProfile};
use kas_core::errors::DomainError;
use kas_core::services::auth::IdentityProvider;

use super::client::StoreClient;

const PROFILE_TABLE: &str = "user_profiles";

pub struct SupabaseIdentityProvider {
    client: Arc<StoreClient>,
}

#[derive(Deserialize)]
struct AuthUser {
    id: Uuid,
    email: String,
}

#[derive(Deserialize)]
struct UserListing {
    users: Vec<AuthUser>,
}

#[derive(Deserialize)]
struct GeneratedLink {
    hashed_token: String,
}

#[derive(Deserialize)]
struct VerifiedSession {
    access_token: String,
}

impl SupabaseIdentityProvider {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }

    async fn account_email(&self, account_id: Uuid) -> Result<String, DomainError> {
        let request = self
            .client
            .auth_admin(Method::GET, &format!("users/{}", account_id));
        let user: AuthUser = self.client.json(request, "account fetch").await?;
        Ok(user.email)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: Option<&str>,
    ) -> Result<Uuid, DomainError> {
        // the OTP check already proved mailbox ownership
        let mut body = json!({
            "email": email,
            "email_confirm": true,
        });
        if let Some(password) = password {
            body["password"] = json!(password);
        }

        let request = self.client.auth_admin(Method::POST, "users").json(&body);
        let user: AuthUser = self.client.json(request, "account create").await?;

        tracing::info!(
            email = email,
            user_id = %user.id,
            event = "account_created",
            "Created account in identity provider"
        );
        Ok(user.id)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let request = self
            .client
            .auth_admin(Method::GET, "users")
            .query(&[("email", email)]);
        let listing: UserListing = self.client.json(request, "account lookup").await?;

        Ok(listing
            .users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| Account {
                id: u.id,
                email: u.email,
            }))
    }

    async fn create_session(&self, account_id: Uuid) -> Result<SessionToken, DomainError> {
        let email = self.account_email(account_id).await?;

        let link_request = self
            .client
            .auth_admin(Method::POST, "generate_link")
            .json(&json!({ "type": "magiclink", "email": email }));
        let link: GeneratedLink = self.client.json(link_request, "session link").await?;

        let verify_request = self.client.auth(Method::POST, "verify").json(&json!({
            "type": "magiclink",
            "token_hash": link.hashed_token,
        }));
        let session: VerifiedSession =
            self.client.json(verify_request, "session verify").await?;

        Ok(SessionToken {
            access_token: session.access_token,
        })
    }

    async fn upsert_profile(
        &self,
        account_id: Uuid,
        profile: UserProfile,
    ) -> Result<(), DomainError> {
        let body = json!({
            "id": account_id,
            "full_name": profile.full_name,
            "kelas_id": profile.kelas_id,
            "absen": profile.absen,
            "role": profile.role,
        });

        let request = self
            .client
            .table(Method::POST, PROFILE_TABLE)
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&body);

        self.client
            .rows::<serde_json::Value>(request, "profile upsert")
            .await?;
        Ok(())
    }

    async fn set_profile_role(&self, account_id: Uuid, role: &str) -> Result<(), DomainError> {
        let request = self
            .client
            .table(Method::PATCH, PROFILE_TABLE)
            .query(&[("id", format!("eq.{}", account_id))])
            .header("Prefer", "return=representation")
            .json(&json!({ "role": role }));

        let rows = self
            .client
            .rows::<serde_json::Value>(request, "profile role update")
            .await?;
        if rows.is_empty() {
            return Err(DomainError::NotFound {
                resource: PROFILE_TABLE.to_string(),
            });
        }
        Ok(())
    }
}
