//! Mock mailer for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::Mailer;

/// Sent mail captured by the mock
#[derive(Debug, Clone)]
pub struct SentMail {
    pub subject: String,
    pub body: String,
}

/// Mock mailer that records every send, keyed by recipient
pub struct MockMailer {
    sent: Arc<Mutex<HashMap<String, Vec<SentMail>>>>,
    should_fail: bool,
}

impl MockMailer {
    /// Create a mailer that accepts every send
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Create a mailer whose every send fails
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            should_fail: true,
        }
    }

    /// All mail sent to an address
    pub fn sent_to(&self, to: &str) -> Vec<SentMail> {
        self.sent.lock().unwrap().get(to).cloned().unwrap_or_default()
    }

    /// Extract the 6-digit code from the last mail sent to an address
    pub fn last_code_sent_to(&self, to: &str) -> Option<String> {
        let mails = self.sent_to(to);
        let body = &mails.last()?.body;
        body.split(|c: char| !c.is_ascii_digit())
            .find(|s| s.len() == 6)
            .map(|s| s.to_string())
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("mock mail failure".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .entry(to.to_string())
            .or_default()
            .push(SentMail {
                subject: subject.to_string(),
                body: html_body.to_string(),
            });
        Ok(())
    }
}
