//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use contact_intake::config::IntakeConfig;
use contact_intake::notify::{EmailMessage, EmailSender, NotifyError, SmsMessage, SmsSender};
use contact_intake::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Email and SMS senders that keep everything they are asked to send.
#[derive(Default)]
pub struct Outbox {
    pub emails: Mutex<Vec<EmailMessage>>,
    pub sms: Mutex<Vec<SmsMessage>>,
}

#[allow(dead_code)]
impl Outbox {
    pub fn email_count(&self) -> usize {
        self.emails.lock().unwrap().len()
    }

    pub fn sms_count(&self) -> usize {
        self.sms.lock().unwrap().len()
    }
}

pub struct OutboxEmail(pub Arc<Outbox>);
pub struct OutboxSms(pub Arc<Outbox>);

#[async_trait]
impl EmailSender for OutboxEmail {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        self.0.emails.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[async_trait]
impl SmsSender for OutboxSms {
    async fn send(&self, message: &SmsMessage) -> Result<(), NotifyError> {
        self.0.sms.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub outbox: Arc<Outbox>,
    pub shutdown: Shutdown,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn contact_url(&self) -> String {
        format!("http://{}/api/contact", self.addr)
    }

    /// Trigger shutdown and wait for `HttpServer::run` to return.
    pub async fn stop(mut self) {
        self.shutdown.trigger();
        if let Some(task) = self.task.take() {
            tokio::time::timeout(Duration::from_secs(10), task)
                .await
                .expect("server did not stop")
                .unwrap()
                .unwrap();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config tuned for tests: ephemeral port, no sweeper, quick retries.
pub fn test_config() -> IntakeConfig {
    let mut config = IntakeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.rate_limit.sweep_interval_secs = 0;
    config.notifications.business_phone = "+16155550000".into();
    config.notifications.retry.base_delay_ms = 1;
    config.notifications.retry.max_delay_ms = 5;
    config
}

/// Start the intake server on an ephemeral port with recording senders.
pub async fn start_server(config: IntakeConfig) -> TestServer {
    let outbox = Arc::new(Outbox::default());
    let email = Arc::new(OutboxEmail(outbox.clone()));
    let sms = Arc::new(OutboxSms(outbox.clone()));
    spawn_server(config, outbox, email, sms).await
}

/// Start the intake server with caller-supplied senders. The returned outbox
/// stays empty.
#[allow(dead_code)]
pub async fn start_server_with_senders(
    config: IntakeConfig,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
) -> TestServer {
    spawn_server(config, Arc::new(Outbox::default()), email, sms).await
}

async fn spawn_server(
    config: IntakeConfig,
    outbox: Arc<Outbox>,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::with_senders(config, email, sms);

    let shutdown = Shutdown::new();
    let task = tokio::spawn(server.run(listener, shutdown.clone()));

    TestServer {
        addr,
        outbox,
        shutdown,
        task: Some(task),
    }
}

/// Poll until `f` holds or the deadline passes.
#[allow(dead_code)]
pub async fn eventually<F: Fn() -> bool>(f: F) -> bool {
    for _ in 0..100 {
        if f() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    f()
}
