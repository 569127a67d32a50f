//! Account and profile entities mirrored from the managed identity store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to freshly provisioned profiles
pub const DEFAULT_ROLE: &str = "user";

/// An account in the managed identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Provider-assigned account id
    pub id: Uuid,

    /// Email the account was registered with
    pub email: String,
}

/// Profile row stored alongside an account (`user_profiles` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub full_name: String,

    /// Class the student belongs to, if selected at registration
    pub kelas_id: Option<Uuid>,

    /// Attendance number within the class
    pub absen: Option<i32>,

    /// Access role, `"user"` by default; promoted to `"admin"` on approval
    pub role: String,
}

impl UserProfile {
    /// Build a profile for a new registration with the default role
    pub fn new_registration(
        full_name: String,
        kelas_id: Option<Uuid>,
        absen: Option<i32>,
    ) -> Self {
        Self {
            full_name,
            kelas_id,
            absen,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

/// Session issued by the identity provider on the login path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Bearer token the client presents on subsequent requests
    pub access_token: String,
}
