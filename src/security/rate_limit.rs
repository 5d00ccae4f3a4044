//! Fixed-window submission throttling per client identifier.
//!
//! Each identifier gets `max_requests` admissions per window. The window starts
//! at the first admission and resets wholesale once it has elapsed, so a client
//! straddling a boundary can land up to twice the quota back to back.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::config::RateLimitConfig;
use crate::observability::metrics;

/// Counter state for one client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_reset_at: Instant,
}

impl RateLimitEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.window_reset_at
    }
}

/// In-memory, process-local limiter. Cloning shares the same store.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<RateLimiterInner>,
}

struct RateLimiterInner {
    enabled: bool,
    max_requests: u32,
    window: Duration,
    max_tracked: usize,
    entries: DashMap<String, RateLimitEntry>,
}

impl RateLimiter {
    /// Creates an enabled limiter with no cap on tracked identifiers.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::build(true, max_requests, window, 0)
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::build(
            config.enabled,
            config.max_requests,
            Duration::from_millis(config.window_ms),
            config.max_tracked_clients,
        )
    }

    /// Enabled limiter tracking at most `max_tracked` identifiers. Zero means unbounded.
    pub fn with_capacity(max_requests: u32, window: Duration, max_tracked: usize) -> Self {
        Self::build(true, max_requests, window, max_tracked)
    }

    fn build(enabled: bool, max_requests: u32, window: Duration, max_tracked: usize) -> Self {
        Self {
            inner: Arc::new(RateLimiterInner {
                enabled,
                max_requests,
                window,
                max_tracked,
                entries: DashMap::new(),
            }),
        }
    }

    pub fn window(&self) -> Duration {
        self.inner.window
    }

    /// Returns `true` if the submission is admitted.
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    /// Admission decision against an explicit clock reading.
    pub fn check_at(&self, client: &str, now: Instant) -> bool {
        if !self.inner.enabled {
            return true;
        }

        // Must run before taking the entry lock: sweeping touches every shard.
        if self.at_capacity(client) {
            self.sweep_at(now);
            if self.at_capacity(client) {
                tracing::warn!(
                    client = %client,
                    tracked = self.inner.entries.len(),
                    "Rate limiter at capacity, rejecting new client"
                );
                return false;
            }
        }

        let window = self.inner.window;
        match self.inner.entries.entry(client.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(RateLimitEntry {
                    count: 1,
                    window_reset_at: now + window,
                });
                true
            }
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.is_expired(now) {
                    entry.count = 1;
                    entry.window_reset_at = now + window;
                    true
                } else if entry.count < self.inner.max_requests {
                    entry.count += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn at_capacity(&self, client: &str) -> bool {
        let max = self.inner.max_tracked;
        max > 0 && self.inner.entries.len() >= max && !self.inner.entries.contains_key(client)
    }

    /// Snapshot of the entry for `client`, if tracked.
    pub fn entry(&self, client: &str) -> Option<RateLimitEntry> {
        self.inner.entries.get(client).map(|e| *e)
    }

    pub fn tracked_clients(&self) -> usize {
        self.inner.entries.len()
    }

    /// Drops every entry whose window has elapsed. Returns how many were removed.
    pub fn sweep_at(&self, now: Instant) -> usize {
        let before = self.inner.entries.len();
        self.inner.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.inner.entries.len())
    }

    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    /// Periodically evict expired entries until shutdown fires.
    pub async fn run_sweeper(self, interval: Duration, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let evicted = self.sweep();
                    let tracked = self.tracked_clients();
                    metrics::record_tracked_clients(tracked);
                    if evicted > 0 {
                        tracing::debug!(evicted, tracked, "Swept expired rate-limit entries");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Rate-limit sweeper stopping");
                    break;
                }
            }
        }
    }
}
