//! Contact intake service.
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /api/contact
//!     ─────────────────▶ request ID ─▶ trace ─▶ contact handler
//!                                                   │
//!                        ┌──────────────────────────┤
//!                        ▼                          ▼
//!                 ┌─────────────┐          ┌────────────────┐
//!                 │ rate limiter│          │    pipeline    │
//!                 │ (per client)│          │ parse/sanitize │
//!                 └─────────────┘          │   /validate    │
//!                                          └───────┬────────┘
//!                                                  │ accepted
//!                                                  ▼
//!                                          ┌────────────────┐
//!                                          │  notification  │──▶ email / SMS
//!                                          │     worker     │
//!                                          └────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use contact_intake::config::{load_config, IntakeConfig};
use contact_intake::lifecycle::{termination_signal, Shutdown};
use contact_intake::observability::{logging, metrics};
use contact_intake::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "contact-intake")]
#[command(about = "Contact form intake service", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => IntakeConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("contact-intake v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        max_requests = config.rate_limit.max_requests,
        window_ms = config.rate_limit.window_ms,
        notifications = config.notifications.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        termination_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
