//! Per-schedule cancellation handles.

use tokio::sync::watch;
use uuid::Uuid;

/// Handle to one scheduled chain, returned by every scheduling call.
///
/// Cancellation is cooperative and terminal: once [`cancel`](Self::cancel) is
/// called, a pending wait aborts before its job runs, an in-flight invocation
/// finishes but does not reschedule, and the signal cannot be reset.
///
/// Dropping the handle does not cancel anything; the chain keeps running
/// fire-and-forget.
#[derive(Debug, Clone)]
pub struct ScheduleHandle {
    id: Uuid,
    cancel_tx: watch::Sender<bool>,
}

impl ScheduleHandle {
    /// Create a handle and the receiver its chain watches.
    pub(crate) fn new() -> (Self, watch::Receiver<bool>) {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        (
            Self {
                id: Uuid::new_v4(),
                cancel_tx,
            },
            cancel_rx,
        )
    }

    /// Unique id of this schedule, usable for log correlation.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Cancel this chain. Idempotent; a no-op once the chain has finished.
    pub fn cancel(&self) {
        // send_replace stores the value even after the chain task is gone,
        // keeping is_cancelled truthful.
        self.cancel_tx.send_replace(true);
        tracing::debug!(id = %self.id, "schedule cancelled");
    }

    /// Whether this handle's chain has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }
}
