//! SMTP mail configuration module

use serde::{Deserialize, Serialize};

/// SMTP transport configuration for transactional email
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP port (STARTTLS submission port by default)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username (also used as the From address)
    pub smtp_user: String,

    /// SMTP password
    pub smtp_pass: String,

    /// Address receiving admin-request notifications
    pub admin_email: String,
}

impl MailConfig {
    /// Load the configuration from environment variables
    ///
    /// Returns `None` when `SMTP_HOST` is unset so the binary can fail
    /// with a clear message instead of sending into the void.
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_smtp_port),
            smtp_user: std::env::var("SMTP_USER").unwrap_or_default(),
            smtp_pass: std::env::var("SMTP_PASS").unwrap_or_default(),
            admin_email: std::env::var("ADMIN_EMAIL").unwrap_or_default(),
        })
    }

    /// The From header used on outgoing mail
    pub fn from_address(&self) -> String {
        format!("\"Kas App\" <{}>", self.smtp_user)
    }
}

fn default_smtp_port() -> u16 {
    587
}
