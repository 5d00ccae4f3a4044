//! Outbound email capability.
//!
//! Delivery goes through [`EmailSender`]. The only built-in sender logs the
//! message; a provider-backed sender plugs in behind the same trait.

use async_trait::async_trait;

use crate::intake::sanitize::sanitize;
use crate::notify::NotifyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: Option<String>,
    pub from: Option<String>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            html: html.into(),
            text: None,
            from: None,
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Plain-text body: the explicit text part, or the HTML with tags removed.
    pub fn text_body(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => sanitize(&self.html),
        }
    }
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// Writes the message to the log and reports success.
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        tracing::info!(
            to = ?message.to,
            from = message.from.as_deref().unwrap_or("default"),
            subject = %message.subject,
            text = %message.text_body(),
            "Email would be sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_body_falls_back_to_stripped_html() {
        let msg = EmailMessage::new("a@b.co", "Hi", "<p><strong>Name:</strong> Jane</p>");
        assert_eq!(msg.text_body(), "Name: Jane");

        let msg = EmailMessage {
            text: Some("plain".into()),
            ..msg
        };
        assert_eq!(msg.text_body(), "plain");
    }

    #[tokio::test]
    async fn test_log_sender_succeeds() {
        let msg = EmailMessage::new("a@b.co", "Hi", "<p>x</p>").with_from("me@b.co");
        assert!(LogEmailSender.send(&msg).await.is_ok());
    }
}
