//! The Convergence Waiter.
//!
//! A remote write is accepted immediately but its effect lands later;
//! the only way to know it landed is to poll a status string. This
//! module is the single bounded polling loop every resource kind shares,
//! parameterized by a [`WaitSpec`] instead of being re-implemented per
//! status vocabulary.
//!
//! A status in the target set ends the wait successfully. A status in
//! the pending set keeps polling until the deadline. Any other status
//! fails immediately: an operator-visible error state must surface, not
//! be mistaken for "still pending".

use crate::config::RetryConfig;
use crate::error::ConvergenceError;
use crate::transport::TransportError;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// The statuses and timing that define one wait.
///
/// `pending` and `target` must be disjoint; a status in both would make
/// the outcome ambiguous, so [`WaitSpec::new`] panics on overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitSpec {
    /// Statuses that mean "keep polling"
    pub pending: HashSet<String>,
    /// Statuses that end the wait successfully
    pub target: HashSet<String>,
    /// Deadline for reaching a target status
    pub timeout: Duration,
    /// Upper bound on the pause between polls
    pub poll_interval: Duration,
    /// Lower bound on the pause between polls
    pub min_poll_interval: Duration,
}

impl WaitSpec {
    /// Build a spec from status sets and shared timing.
    pub fn new(
        pending: impl IntoIterator<Item = impl Into<String>>,
        target: impl IntoIterator<Item = impl Into<String>>,
        timing: &RetryConfig,
    ) -> Self {
        let pending: HashSet<String> = pending.into_iter().map(Into::into).collect();
        let target: HashSet<String> = target.into_iter().map(Into::into).collect();
        assert!(
            pending.is_disjoint(&target),
            "pending and target statuses overlap"
        );
        Self {
            pending,
            target,
            timeout: timing.timeout,
            poll_interval: timing.poll_interval,
            min_poll_interval: timing.min_poll_interval,
        }
    }

    /// Replace the deadline, e.g. with a shorter teardown timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Poll `fetch_status` until it lands in the spec's target set.
///
/// Returns the terminal status on success. The pause between polls
/// starts at `min_poll_interval` and backs off up to `poll_interval`;
/// at least one status fetch is guaranteed, and total wall-clock time is
/// bounded by `timeout` plus one final poll interval.
///
/// Transport errors are returned immediately, not retried - transient
/// network retry is the transport collaborator's job.
pub async fn await_convergence<F, Fut>(
    spec: &WaitSpec,
    fetch_status: F,
) -> Result<String, ConvergenceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, TransportError>>,
{
    await_convergence_until(spec, fetch_status, std::future::pending::<()>()).await
}

/// [`await_convergence`] with an external cancellation signal.
///
/// The `cancel` future is raced against the poll pauses and against the
/// status fetches themselves; when it resolves the wait stops promptly
/// with [`ConvergenceError::Cancelled`] instead of running to its own
/// deadline, even if the transport is hung. An enclosing operation
/// timeout or a caller-level abort plugs in here.
pub async fn await_convergence_until<F, Fut, C>(
    spec: &WaitSpec,
    mut fetch_status: F,
    cancel: C,
) -> Result<String, ConvergenceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, TransportError>>,
    C: Future<Output = ()>,
{
    let started = Instant::now();
    let mut interval = spec.min_poll_interval;
    tokio::pin!(cancel);

    loop {
        tokio::select! {
            _ = &mut cancel => {
                debug!("convergence wait cancelled");
                return Err(ConvergenceError::Cancelled);
            }
            _ = sleep(interval) => {}
        }

        let status = tokio::select! {
            _ = &mut cancel => {
                debug!("convergence wait cancelled mid-fetch");
                return Err(ConvergenceError::Cancelled);
            }
            fetched = fetch_status() => fetched?,
        };

        if spec.target.contains(&status) {
            debug!(%status, "reached target status");
            return Ok(status);
        }
        if !spec.pending.contains(&status) {
            warn!(%status, "unexpected status, giving up");
            return Err(ConvergenceError::UnexpectedState(status));
        }

        let waited = started.elapsed();
        if waited >= spec.timeout {
            return Err(ConvergenceError::Timeout {
                last_status: status,
                waited,
            });
        }

        debug!(%status, ?waited, "still pending");
        interval = (interval * 2).min(spec.poll_interval);
    }
}
