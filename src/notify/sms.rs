//! Outbound SMS capability.

use async_trait::async_trait;

use crate::notify::NotifyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    pub to: String,
    pub body: String,
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, message: &SmsMessage) -> Result<(), NotifyError>;
}

/// Writes the message to the log and reports success.
#[derive(Debug, Default, Clone)]
pub struct LogSmsSender;

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send(&self, message: &SmsMessage) -> Result<(), NotifyError> {
        if message.to.is_empty() {
            return Err(NotifyError::Rejected("empty recipient".into()));
        }
        tracing::info!(to = %message.to, body = %message.body, "SMS would be sent");
        Ok(())
    }
}
