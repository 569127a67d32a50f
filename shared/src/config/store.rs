//! Managed store (Supabase) configuration module

use serde::{Deserialize, Serialize};

/// Connection settings for the managed backend-as-a-service
///
/// The gateway talks to a Supabase project: the PostgREST endpoint for
/// tables and the GoTrue admin API for accounts and sessions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// Service-role key (server-side only, bypasses row level security)
    pub service_role_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Load the configuration from environment variables
    ///
    /// Requires `SUPABASE_URL` and `SUPABASE_SERVICE_ROLE_KEY`.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            url: std::env::var("SUPABASE_URL").ok()?,
            service_role_key: std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok()?,
            timeout_secs: std::env::var("SUPABASE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout_secs),
        })
    }

    /// PostgREST endpoint for a table
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), table)
    }

    /// GoTrue endpoint
    pub fn auth_url(&self, path: &str) -> String {
        format!(
            "{}/auth/v1/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// GoTrue admin endpoint
    pub fn auth_admin_url(&self, path: &str) -> String {
        self.auth_url(&format!("admin/{}", path.trim_start_matches('/')))
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = StoreConfig {
            url: "https://xyz.supabase.co/".to_string(),
            service_role_key: "key".to_string(),
            timeout_secs: 30,
        };
        assert_eq!(
            config.table_url("otp_codes"),
            "https://xyz.supabase.co/rest/v1/otp_codes"
        );
        assert_eq!(
            config.auth_admin_url("users"),
            "https://xyz.supabase.co/auth/v1/admin/users"
        );
    }
}
