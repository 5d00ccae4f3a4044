//! Fire-and-forget notification queue.
//!
//! The request handler only enqueues. A single background worker drains the
//! queue, sending email and SMS concurrently for each submission and retrying
//! transient provider failures. Nothing a provider does can change the
//! response the client already received.
//!
//! The worker has no shutdown signal of its own. It stops once every
//! [`Dispatcher`] is dropped and the queue is empty, so submissions accepted
//! while the server drains in-flight requests are still delivered.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::intake::ValidSubmission;
use crate::notify::email::{EmailMessage, EmailSender};
use crate::notify::sms::{SmsMessage, SmsSender};
use crate::notify::templates::Templates;
use crate::notify::NotifyError;
use crate::observability::metrics;
use crate::resilience::{retry_with_backoff, BackoffPolicy};

/// Handle used by request handlers to queue accepted submissions.
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<ValidSubmission>,
}

impl Dispatcher {
    /// Never waits: a full queue drops the submission's notifications.
    pub fn enqueue(&self, submission: ValidSubmission) -> Result<(), NotifyError> {
        self.tx.try_send(submission).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => NotifyError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => NotifyError::Closed,
        })
    }
}

/// Background side of the queue.
pub struct NotificationWorker {
    rx: mpsc::Receiver<ValidSubmission>,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
    templates: Templates,
    policy: BackoffPolicy,
}

/// Create a connected dispatcher/worker pair.
pub fn channel(
    capacity: usize,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
    templates: Templates,
    policy: BackoffPolicy,
) -> (Dispatcher, NotificationWorker) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        Dispatcher { tx },
        NotificationWorker {
            rx,
            email,
            sms,
            templates,
            policy,
        },
    )
}

impl NotificationWorker {
    /// Process submissions until every dispatcher is gone and the queue is empty.
    pub async fn run(mut self) {
        tracing::info!("Notification worker started");

        while let Some(submission) = self.rx.recv().await {
            self.notify(&submission).await;
        }

        tracing::info!("Notification worker stopped");
    }

    async fn notify(&self, sub: &ValidSubmission) {
        let contact = self.templates.contact_email(sub);
        let confirmation = self.templates.confirmation_email(sub);
        let lead = self.templates.lead_sms(sub);
        let customer = self.templates.customer_sms(sub);

        let lead_fut = async {
            match &lead {
                Some(msg) => self.deliver_sms("lead_sms", msg).await,
                None => tracing::debug!("No business SMS number configured, skipping lead alert"),
            }
        };

        tokio::join!(
            self.deliver_email("contact_email", &contact),
            self.deliver_email("confirmation_email", &confirmation),
            lead_fut,
            self.deliver_sms("customer_sms", &customer),
        );
    }

    async fn deliver_email(&self, label: &'static str, msg: &EmailMessage) {
        let result = retry_with_backoff(&self.policy, label, || self.email.send(msg)).await;
        report(label, result);
    }

    async fn deliver_sms(&self, label: &'static str, msg: &SmsMessage) {
        let result = retry_with_backoff(&self.policy, label, || self.sms.send(msg)).await;
        report(label, result);
    }
}

fn report(label: &'static str, result: Result<(), NotifyError>) {
    match result {
        Ok(()) => {
            metrics::record_notification(label, true);
            tracing::debug!(channel = label, "Notification delivered");
        }
        Err(e) => {
            metrics::record_notification(label, false);
            tracing::error!(channel = label, error = %e, "Notification failed, giving up");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BusinessConfig, NotificationConfig};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingEmail {
        sent: Mutex<Vec<EmailMessage>>,
        failures_left: AtomicU32,
    }

    #[async_trait]
    impl EmailSender for RecordingEmail {
        async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(NotifyError::Unavailable("smtp down".into()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSms {
        sent: Mutex<Vec<SmsMessage>>,
    }

    #[async_trait]
    impl SmsSender for RecordingSms {
        async fn send(&self, message: &SmsMessage) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn submission() -> ValidSubmission {
        ValidSubmission {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "615-555-1234".into(),
            service: String::new(),
            message: String::new(),
            received_at: Utc::now(),
        }
    }

    fn policy() -> BackoffPolicy {
        BackoffPolicy {
            max_attempts: 3,
            base: Duration::from_millis(1),
            max: Duration::from_millis(2),
        }
    }

    fn templates(business_phone: &str) -> Templates {
        let notifications = NotificationConfig {
            business_phone: business_phone.into(),
            ..NotificationConfig::default()
        };
        Templates::new(&BusinessConfig::default(), &notifications)
    }

    #[tokio::test]
    async fn test_worker_drains_queue_after_dispatchers_drop() {
        let email = Arc::new(RecordingEmail::default());
        email.failures_left.store(1, Ordering::SeqCst);
        let sms = Arc::new(RecordingSms::default());

        let (dispatcher, worker) =
            channel(8, email.clone(), sms.clone(), templates("+16155550000"), policy());
        let handler_copy = dispatcher.clone();
        dispatcher.enqueue(submission()).unwrap();
        handler_copy.enqueue(submission()).unwrap();
        drop(dispatcher);
        drop(handler_copy);

        tokio::time::timeout(Duration::from_secs(5), worker.run())
            .await
            .expect("worker did not stop");

        // One transient failure is retried, so every email still lands.
        assert_eq!(email.sent.lock().unwrap().len(), 4);
        assert_eq!(sms.sent.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_enqueue_after_worker_gone_is_closed() {
        let (dispatcher, worker) = channel(
            8,
            Arc::new(RecordingEmail::default()),
            Arc::new(RecordingSms::default()),
            templates(""),
            policy(),
        );
        drop(worker);
        assert!(matches!(dispatcher.enqueue(submission()), Err(NotifyError::Closed)));
    }

    #[tokio::test]
    async fn test_lead_sms_skipped_without_number() {
        let email = Arc::new(RecordingEmail::default());
        let sms = Arc::new(RecordingSms::default());
        let (dispatcher, worker) = channel(8, email.clone(), sms.clone(), templates(""), policy());
        dispatcher.enqueue(submission()).unwrap();
        drop(dispatcher);
        worker.run().await;

        let sent = sms.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "615-555-1234");
    }

    #[test]
    fn test_full_queue_is_reported() {
        let (dispatcher, _worker) = channel(
            1,
            Arc::new(RecordingEmail::default()),
            Arc::new(RecordingSms::default()),
            templates(""),
            policy(),
        );
        dispatcher.enqueue(submission()).unwrap();
        assert!(matches!(dispatcher.enqueue(submission()), Err(NotifyError::QueueFull)));
    }
}
