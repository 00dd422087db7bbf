// src/feed/scheduler.rs
//! Periodic refresh trigger with a swappable callback.
//!
//! The scheduler is an explicit value owned by the caller with a
//! `create -> configure -> teardown` lifecycle. Two contract points:
//!
//! - a tick always invokes the most recently registered callback, so a
//!   registration made between ticks can never be shadowed by a stale
//!   closure captured when the schedule was installed;
//! - disabling does not cancel the timer. Ticks keep firing on the paced
//!   schedule and skip the callback while disabled, matching the UI toggle
//!   that gated the refresh action rather than the interval.
//!
//! Ticks await the callback inline on the scheduler task, so a slow fetch
//! delays later ticks instead of overlapping them. A failed callback is
//! logged and counted; the schedule continues.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use metrics::counter;
use tokio::task::JoinHandle;

/// Boxed future produced by a refresh callback.
pub type RefreshFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Callback invoked on every enabled tick.
pub type RefreshFn = Arc<dyn Fn() -> RefreshFuture + Send + Sync>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// `configure` requires a strictly positive period; the prior schedule,
    /// if any, is left untouched on rejection.
    #[error("refresh period must be greater than zero")]
    InvalidPeriod,
}

struct Shared {
    callback: Mutex<Option<RefreshFn>>,
    enabled: AtomicBool,
}

/// Cloneable control surface for a running scheduler; the API layer uses it
/// to gate auto-refresh without owning the scheduler itself.
#[derive(Clone)]
pub struct SchedulerHandle {
    shared: Arc<Shared>,
}

impl SchedulerHandle {
    pub fn set_enabled(&self, enabled: bool) {
        self.shared.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::Relaxed)
    }
}

pub struct RefreshScheduler {
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// New idle scheduler: enabled, no callback, nothing scheduled.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                callback: Mutex::new(None),
                enabled: AtomicBool::new(true),
            }),
            task: None,
        }
    }

    /// Replace the callback used by subsequent ticks. Never cancels or
    /// restarts the schedule; a tick already sleeping picks up the new
    /// registration when it fires.
    pub fn set_callback<F, Fut>(&self, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let cb: RefreshFn = Arc::new(move || Box::pin(f()) as RefreshFuture);
        *self
            .shared
            .callback
            .lock()
            .expect("scheduler mutex poisoned") = Some(cb);
    }

    /// Install (or restart) the periodic trigger. Any previously scheduled
    /// trigger is cancelled first, so two timers never run at once.
    pub fn configure(&mut self, period: Duration) -> Result<(), SchedulerError> {
        if period.is_zero() {
            return Err(SchedulerError::InvalidPeriod);
        }
        crate::feed::ensure_metrics_described();
        self.cancel_task();

        let shared = Arc::clone(&self.shared);
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // interval yields immediately; the initial fetch is the caller's
            // job, the schedule starts one full period out
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !shared.enabled.load(Ordering::Relaxed) {
                    counter!("refresh_ticks_skipped_total").increment(1);
                    continue;
                }
                let cb = shared
                    .callback
                    .lock()
                    .expect("scheduler mutex poisoned")
                    .clone();
                let Some(cb) = cb else { continue };
                counter!("refresh_ticks_total").increment(1);
                if let Err(e) = cb().await {
                    counter!("refresh_tick_errors_total").increment(1);
                    tracing::warn!(target: "feed", error = ?e, "refresh tick failed");
                }
            }
        }));
        Ok(())
    }

    /// While disabled, ticks still fire on the paced schedule but skip the
    /// callback; re-enabling resumes without reconfiguring.
    pub fn set_enabled(&self, enabled: bool) {
        self.shared.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::Relaxed)
    }

    /// Whether a periodic trigger is currently installed.
    pub fn is_scheduled(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Cancel the pending trigger. Idempotent; `configure` re-arms.
    pub fn teardown(&mut self) {
        self.cancel_task();
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancel_task();
    }
}
