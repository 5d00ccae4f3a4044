//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the shared rate limiter, pipeline and notification queue
//! - Create the Axum router with the contact and health handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Spawn background tasks and stop them on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::HeaderName,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::IntakeConfig;
use crate::http::contact::contact_handler;
use crate::http::health::health_handler;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::intake::ContactPipeline;
use crate::lifecycle::Shutdown;
use crate::notify::{
    Dispatcher, EmailSender, LogEmailSender, LogSmsSender, NotificationWorker, SmsSender,
    Templates,
};
use crate::resilience::BackoffPolicy;
use crate::security::rate_limit::RateLimiter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ContactPipeline,
    pub dispatcher: Option<Dispatcher>,
    pub client_ip_header: HeaderName,
    pub max_body_size: usize,
}

/// HTTP server for the contact intake service.
pub struct HttpServer {
    router: Router,
    config: IntakeConfig,
    limiter: RateLimiter,
    worker: Option<NotificationWorker>,
}

impl HttpServer {
    /// Server whose notifications are only logged.
    pub fn new(config: IntakeConfig) -> Self {
        Self::with_senders(config, Arc::new(LogEmailSender), Arc::new(LogSmsSender))
    }

    /// Server delivering notifications through the given senders.
    pub fn with_senders(
        config: IntakeConfig,
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
    ) -> Self {
        let limiter = RateLimiter::from_config(&config.rate_limit);
        let pipeline = ContactPipeline::new(limiter.clone());

        let (dispatcher, worker) = if config.notifications.enabled {
            let (dispatcher, worker) = crate::notify::dispatcher::channel(
                config.notifications.queue_capacity,
                email,
                sms,
                Templates::new(&config.business, &config.notifications),
                BackoffPolicy::from_config(&config.notifications.retry),
            );
            (Some(dispatcher), Some(worker))
        } else {
            (None, None)
        };

        let client_ip_header = HeaderName::from_bytes(config.rate_limit.client_ip_header.as_bytes())
            .unwrap_or_else(|_| HeaderName::from_static("x-forwarded-for"));

        let state = AppState {
            pipeline,
            dispatcher,
            client_ip_header,
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            limiter,
            worker,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &IntakeConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/contact", post(contact_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Returns only after in-flight requests have finished, the notification
    /// queue has drained and the sweeper has stopped.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let mut stop = shutdown.subscribe();
        tracing::info!(
            address = %addr,
            max_requests = self.config.rate_limit.max_requests,
            window_ms = self.config.rate_limit.window_ms,
            "HTTP server starting"
        );

        let worker = self.worker.map(|worker| tokio::spawn(worker.run()));

        let rl = &self.config.rate_limit;
        let sweeper = if rl.enabled && rl.sweep_interval_secs > 0 {
            let interval = Duration::from_secs(rl.sweep_interval_secs);
            Some(tokio::spawn(self.limiter.clone().run_sweeper(interval, shutdown.subscribe())))
        } else {
            None
        };

        // The router owns every dispatcher handle; once it is dropped here the
        // worker sees a closed queue and exits after draining it.
        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = stop.recv().await;
            })
            .await;
        tracing::info!("HTTP server stopped accepting requests");

        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "Notification worker failed");
            }
        }
        if let Some(sweeper) = sweeper {
            shutdown.trigger();
            if let Err(e) = sweeper.await {
                tracing::error!(error = %e, "Rate-limit sweeper failed");
            }
        }

        tracing::info!("HTTP server stopped");
        served
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Shared limiter handle, for inspection.
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}
