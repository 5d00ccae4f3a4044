/// Failures from the notification layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    /// Provider refused the message; resending will not help.
    #[error("provider rejected message: {0}")]
    Rejected(String),

    /// Provider unreachable or failing; safe to retry.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("notification queue is full")]
    QueueFull,

    #[error("notification worker has stopped")]
    Closed,
}

impl NotifyError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, NotifyError::Unavailable(_))
    }
}
