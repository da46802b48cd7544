//! Periodic purge of stale pending codes
//!
//! This module provides the background sweep that removes pending records
//! whose TTL has elapsed, independently of request traffic. The API layer
//! additionally purges opportunistically before dispatching each request.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use pv_shared::config::OtpConfig;

use crate::errors::DomainResult;
use crate::repositories::otp::OtpStore;

/// Configuration for the purge sweeper
#[derive(Debug, Clone)]
pub struct OtpSweeperConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for OtpSweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

/// Background service that periodically purges expired pending codes
pub struct OtpSweeper<R: OtpStore + 'static> {
    store: Arc<R>,
    otp_config: OtpConfig,
    config: OtpSweeperConfig,
}

impl<R: OtpStore> OtpSweeper<R> {
    /// Create a new sweeper
    pub fn new(store: Arc<R>, otp_config: OtpConfig, config: OtpSweeperConfig) -> Self {
        Self {
            store,
            otp_config,
            config,
        }
    }

    /// Run a single sweep cycle
    ///
    /// Deletes pending records older than the configured TTL and returns
    /// the number removed. The sweep is idempotent; a failed cycle simply
    /// runs again on the next tick.
    pub async fn run_once(&self) -> DomainResult<u64> {
        let cutoff = Utc::now() - Duration::seconds(self.otp_config.ttl_seconds);
        let purged = self.store.purge_expired_pending(cutoff).await?;
        if purged > 0 {
            info!(purged, "Sweep removed expired pending codes");
        }
        Ok(purged)
    }

    /// Start the sweeper as a background task
    ///
    /// Spawns a tokio task that runs the sweep at the configured interval.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("OTP purge sweeper is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "OTP purge sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_once().await {
                    error!("OTP purge sweep failed: {}", e);
                }
            }
        });
    }
}
