use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard, Notify};
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::error::{GatewayError, Result};
use crate::observability::metrics;

/// Granularity of the request window. One unit is the window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Whole milliseconds in one unit; sub-millisecond units truncate to zero
    pub fn as_millis(&self) -> u64 {
        match self {
            TimeUnit::Nanoseconds | TimeUnit::Microseconds => 0,
            TimeUnit::Milliseconds => 1,
            TimeUnit::Seconds => 1_000,
            TimeUnit::Minutes => 60_000,
            TimeUnit::Hours => 3_600_000,
            TimeUnit::Days => 86_400_000,
        }
    }
}

/// Admits one submission at a time, spacing dispatches at least one interval
/// apart and refusing once `request_limit` requests have been counted.
///
/// The lock is held for the whole interval wait and for the network call made
/// under the returned [`GatePermit`], so concurrent callers queue in FIFO
/// order and at most one request is in flight per gate.
#[derive(Debug)]
pub struct RateGate {
    state: Mutex<GateState>,
    request_limit: u32,
    request_interval: Duration,
    interrupted: AtomicBool,
    interrupt: Notify,
}

#[derive(Debug, Default)]
struct GateState {
    request_count: u32,
    last_request_at: Option<Instant>,
}

/// Point-in-time view of the gate's bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSnapshot {
    pub request_count: u32,
    pub request_limit: u32,
    pub last_request_at: Option<Instant>,
}

impl GateSnapshot {
    pub fn remaining(&self) -> u32 {
        self.request_limit.saturating_sub(self.request_count)
    }
}

/// Exclusive right to dispatch one request. Dropping it records the attempt
/// (timestamp + count) and releases the gate, whatever the outcome of the call.
#[derive(Debug)]
pub struct GatePermit<'a> {
    state: MutexGuard<'a, GateState>,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.state.last_request_at = Some(Instant::now());
        self.state.request_count = self.state.request_count.saturating_add(1);
        debug!(request_count = self.state.request_count, "Recorded request against gate");
    }
}

impl RateGate {
    pub fn new(time_unit: TimeUnit, request_limit: u32) -> Result<Self> {
        if time_unit.as_millis() == 0 {
            return Err(GatewayError::Config(format!(
                "time unit {:?} is shorter than one millisecond",
                time_unit
            )));
        }
        Self::with_interval(Duration::from_millis(time_unit.as_millis()), request_limit)
    }

    pub fn with_interval(request_interval: Duration, request_limit: u32) -> Result<Self> {
        if request_limit < 1 {
            return Err(GatewayError::Config(
                "request limit cannot be less than one".to_string(),
            ));
        }
        if request_interval < Duration::from_millis(1) {
            return Err(GatewayError::Config(format!(
                "request interval {:?} is shorter than one millisecond",
                request_interval
            )));
        }

        Ok(Self {
            state: Mutex::new(GateState::default()),
            request_limit,
            request_interval,
            interrupted: AtomicBool::new(false),
            interrupt: Notify::new(),
        })
    }

    pub fn request_limit(&self) -> u32 {
        self.request_limit
    }

    pub fn request_interval(&self) -> Duration {
        self.request_interval
    }

    /// Wait for the gate, then for the remainder of the current interval.
    ///
    /// Fails with [`GatewayError::RateLimit`] once the quota is used up and with
    /// [`GatewayError::Interrupted`] once [`RateGate::interrupt`] has fired,
    /// whether before or during the wait. Neither failure is counted.
    pub async fn acquire(&self) -> Result<GatePermit<'_>> {
        let state = self.state.lock().await;

        // Registered before the flag check so an interrupt landing in between still wakes us
        let notified = self.interrupt.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.is_interrupted() {
            debug!("Gate interrupted, refusing request");
            return Err(GatewayError::Interrupted);
        }

        if let Some(last) = state.last_request_at {
            let elapsed = last.elapsed();
            if elapsed < self.request_interval {
                let wait = self.request_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "Waiting for request interval");
                metrics::gate::wait_seconds(wait.as_secs_f64());

                tokio::select! {
                    _ = time::sleep(wait) => {}
                    _ = &mut notified => {
                        warn!("Interrupted while waiting for request interval");
                        return Err(GatewayError::Interrupted);
                    }
                }
            }
        }

        if state.request_count >= self.request_limit {
            warn!(
                request_count = state.request_count,
                request_limit = self.request_limit,
                "Request quota exceeded"
            );
            metrics::gate::rate_limited();
            return Err(GatewayError::RateLimit {
                used: state.request_count,
                limit: self.request_limit,
            });
        }

        Ok(GatePermit { state })
    }

    /// Interrupt the gate for good: the caller waiting out an interval and every
    /// caller queued behind it or arriving later fail with `Interrupted`.
    /// A request already in flight is left to finish.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
        self.interrupt.notify_waiters();
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Waits for the gate like any submission, so it never observes a
    /// half-finished attempt.
    pub async fn snapshot(&self) -> GateSnapshot {
        let state = self.state.lock().await;
        GateSnapshot {
            request_count: state.request_count,
            request_limit: self.request_limit,
            last_request_at: state.last_request_at,
        }
    }
}
