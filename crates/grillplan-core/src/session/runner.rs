//! Periodic session sampling loop.
//!
//! Drives a [`SessionClock`] off a monotonic clock in a tokio task,
//! forwarding each [`SessionView`] through an `mpsc` channel so the
//! presentation side can consume them without shared mutable state. The
//! loop stops on its own when the session completes or the receiver goes
//! away; [`SessionHandle::abort`] stops it immediately.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time;

use super::clock::{SessionClock, SessionView};
use super::plan::SessionPlan;

/// Standard sampling period of a live session.
pub const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

/// Background sampler for one session.
///
/// Call [`SessionRunner::start`] to spin the loop up in a dedicated tokio
/// task and receive a channel endpoint for [`SessionView`] updates.
pub struct SessionRunner {
    clock: SessionClock,
    period: Duration,
}

impl SessionRunner {
    /// Runner over `plan` with the standard one-second period.
    pub fn new(plan: SessionPlan) -> Self {
        Self {
            clock: SessionClock::new(plan),
            period: SAMPLE_PERIOD,
        }
    }

    /// Override the sampling period. Mostly useful to keep tests fast.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Start the sampling loop.
    ///
    /// Spawns a tokio task that samples the clock once per period, starting
    /// immediately. Returns:
    /// - An `mpsc::Receiver<SessionView>` for the caller to poll.
    /// - A [`SessionHandle`] that can be used to abort the loop.
    pub fn start(self) -> (mpsc::Receiver<SessionView>, SessionHandle) {
        // Buffer a few views so a slow consumer doesn't stall the loop.
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            self.sample_loop(tx).await;
        });

        (rx, SessionHandle { handle })
    }

    /// The sampling loop itself.
    ///
    /// Elapsed time comes from a monotonic [`Instant`] taken at loop start,
    /// truncated to whole seconds, so a delayed tick can never skew the
    /// schedule. Exits once the session completes or the receiver is gone.
    async fn sample_loop(mut self, tx: mpsc::Sender<SessionView>) {
        let started = Instant::now();
        let mut interval = time::interval(self.period);

        loop {
            // The first tick completes immediately, so the opening view
            // goes out at elapsed zero.
            interval.tick().await;

            if tx.is_closed() {
                tracing::debug!("session channel closed; exiting loop");
                break;
            }

            let view = self.clock.sample(started.elapsed().as_secs());
            let complete = view.complete;

            if tx.send(view).await.is_err() {
                tracing::debug!("session receiver dropped; exiting loop");
                break;
            }
            if complete {
                tracing::debug!("session complete; exiting loop");
                break;
            }
        }
    }
}

/// A handle to the background sampling task.
///
/// Call [`SessionHandle::abort`] to stop the loop; aborting an already
/// finished loop is a no-op.
pub struct SessionHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl SessionHandle {
    /// Immediately abort the sampling loop.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Whether the sampling task has stopped for any reason.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
