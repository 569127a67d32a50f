//! SMTP mailer over STARTTLS
//!
//! Implements the core `Mailer` trait with an async lettre transport.
//! Errors are stringly typed at this seam; the OTP service decides
//! whether a failed send is loud or silent.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use kas_core::services::otp::Mailer;
use kas_shared::config::MailConfig;

use crate::InfrastructureError;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: MailConfig,
}

impl SmtpMailer {
    /// Build a mailer against the configured STARTTLS relay
    pub fn new(config: MailConfig) -> Result<Self, InfrastructureError> {
        let credentials =
            Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Mail(e.to_string()))?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self { transport, config })
    }

    /// Address receiving admin-request notifications
    pub fn admin_email(&self) -> &str {
        &self.config.admin_email
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.config
                    .from_address()
                    .parse()
                    .map_err(|e| format!("invalid from address: {}", e))?,
            )
            .to(to
                .parse()
                .map_err(|e| format!("invalid recipient address: {}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| e.to_string())?;

        self.transport
            .send(message)
            .await
            .map_err(|e| e.to_string())?;

        tracing::debug!(to = to, subject = subject, event = "mail_sent", "Mail dispatched");
        Ok(())
    }
}
