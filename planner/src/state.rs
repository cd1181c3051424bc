//! Webserver state management
//!
//! Configuration and runtime counters shared by every request handler.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use shared::PlannerConfig;
use crate::core::SheetIdValidator;
use crate::error::PlannerResult;

/// Core webserver state
#[derive(Debug)]
pub struct WebServerState {
    pub config: PlannerConfig,
    pub sheet_ids: SheetIdValidator,
    pub server_start_time: Instant,
    pub optimize_count: AtomicU64,
    pub sheet_fetch_count: AtomicU64,
}

impl WebServerState {
    /// Create a new webserver state
    pub fn new(config: PlannerConfig) -> PlannerResult<Self> {
        Ok(Self {
            config,
            sheet_ids: SheetIdValidator::new()?,
            server_start_time: Instant::now(),
            optimize_count: AtomicU64::new(0),
            sheet_fetch_count: AtomicU64::new(0),
        })
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    /// Deadline for one outbound provider call
    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// Increment optimize-route counter
    pub fn increment_optimize_count(&self) -> u64 {
        self.optimize_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Increment sheet fetch counter
    pub fn increment_sheet_fetch_count(&self) -> u64 {
        self.sheet_fetch_count.fetch_add(1, Ordering::Relaxed) + 1
    }
}
