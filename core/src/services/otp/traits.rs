//! Trait for the transactional mail collaborator

use async_trait::async_trait;

/// Trait for transactional email dispatch
///
/// OTP mail is on the critical path: callers surface a send failure to
/// the user. Non-critical notifications go through `send_silent`,
/// which logs and swallows errors instead.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email; failure is returned to the caller
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String>;

    /// Send a non-critical email; failures are logged, never propagated
    async fn send_silent(&self, to: &str, subject: &str, html_body: &str) {
        if let Err(e) = self.send(to, subject, html_body).await {
            tracing::warn!(to = to, error = %e, event = "mail_silent_failure", "Non-critical email failed");
        }
    }
}
