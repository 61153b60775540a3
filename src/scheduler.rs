//! The scheduler itself.
//!
//! Each scheduling call validates its arguments, then spawns one task that
//! owns the whole chain: sleep until the target, fire, advance, repeat. The
//! loop is iterative (an occurrence never re-enters the scheduler), so a
//! chain that has fired a million times costs the same as one that has fired
//! once.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::handle::ScheduleHandle;
use crate::job::Job;
use crate::recurrence::Recurrence;
use crate::runtime::{Spawn, TokioSpawner};
use crate::util::clock::delay_until;

/// Schedules one-shot and recurring work on an async runtime.
///
/// The scheduler owns one instance-wide cancellation signal shared by every
/// chain it starts ([`cancel_all`](Self::cancel_all)); in addition, each
/// scheduling call returns a [`ScheduleHandle`] wrapping an independent
/// per-chain signal. Dropping the scheduler cancels nothing.
#[derive(Debug)]
pub struct Scheduler<S: Spawn = TokioSpawner> {
    cancel_all_tx: watch::Sender<bool>,
    spawner: S,
}

impl Scheduler<TokioSpawner> {
    /// Create a scheduler that spawns chains on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime context.
    #[must_use]
    pub fn new() -> Self {
        Self::with_spawner(TokioSpawner::current())
    }
}

impl Default for Scheduler<TokioSpawner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Spawn> Scheduler<S> {
    /// Create a scheduler over an explicit spawner.
    pub fn with_spawner(spawner: S) -> Self {
        let (cancel_all_tx, _) = watch::channel(false);
        Self {
            cancel_all_tx,
            spawner,
        }
    }

    /// Schedule `job` to run exactly once at `target`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::TargetNotInFuture`] if `target` is not strictly
    /// later than the current time. Checked synchronously, before any wait
    /// is created.
    pub fn schedule_once<J>(
        &self,
        target: DateTime<Utc>,
        job: J,
    ) -> Result<ScheduleHandle, ScheduleError>
    where
        J: Job<()>,
    {
        self.schedule_once_with(target, job, ())
    }

    /// Schedule `job` to run exactly once at `target`, with a bound payload.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::TargetNotInFuture`] if `target` is not strictly
    /// later than the current time.
    pub fn schedule_once_with<P, J>(
        &self,
        target: DateTime<Utc>,
        job: J,
        payload: P,
    ) -> Result<ScheduleHandle, ScheduleError>
    where
        P: Clone + Send + Sync + 'static,
        J: Job<P>,
    {
        let now = Utc::now();
        if target <= now {
            return Err(ScheduleError::TargetNotInFuture { target, now });
        }
        Ok(self.spawn_chain(target, None, job, payload))
    }

    /// Schedule `job` to recur per `rule`, starting from `anchor`.
    ///
    /// The first fire time is `rule.advance(anchor)`, the occurrence after
    /// the anchor, never the anchor itself. The anchor is not required to be
    /// in the future; occurrences whose nominal time has already passed fire
    /// immediately until the grid catches up.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::DateOverflow`] if advancing the anchor overflows the
    /// date range.
    pub fn schedule_recurring<J>(
        &self,
        anchor: DateTime<Utc>,
        rule: Recurrence,
        job: J,
    ) -> Result<ScheduleHandle, ScheduleError>
    where
        J: Job<()>,
    {
        self.schedule_recurring_with(anchor, rule, job, ())
    }

    /// Schedule `job` to recur per `rule`, with a bound payload cloned into
    /// every occurrence.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::DateOverflow`] if advancing the anchor overflows the
    /// date range.
    pub fn schedule_recurring_with<P, J>(
        &self,
        anchor: DateTime<Utc>,
        rule: Recurrence,
        job: J,
        payload: P,
    ) -> Result<ScheduleHandle, ScheduleError>
    where
        P: Clone + Send + Sync + 'static,
        J: Job<P>,
    {
        let first = rule.advance(anchor)?;
        Ok(self.spawn_chain(first, Some(rule), job, payload))
    }

    /// Cancel every chain started by this scheduler instance.
    ///
    /// Terminal: pending waits abort before their job runs, in-flight
    /// invocations complete but do not reschedule, and no chain started
    /// before or after this call will fire again.
    pub fn cancel_all(&self) {
        // send_replace stores the value even with no live receivers, so the
        // signal stays terminal for chains scheduled later.
        self.cancel_all_tx.send_replace(true);
        tracing::info!("all schedules cancelled");
    }

    fn spawn_chain<P, J>(
        &self,
        first: DateTime<Utc>,
        rule: Option<Recurrence>,
        job: J,
        payload: P,
    ) -> ScheduleHandle
    where
        P: Clone + Send + Sync + 'static,
        J: Job<P>,
    {
        let (handle, chain_rx) = ScheduleHandle::new();
        let all_rx = self.cancel_all_tx.subscribe();
        let id = handle.id();
        tracing::debug!(%id, first = %first, ?rule, "chain scheduled");
        self.spawner
            .spawn(run_chain(id, first, rule, job, payload, all_rx, chain_rx));
        handle
    }
}

/// One chain: sleep until the target, fire, advance, repeat until the rule
/// runs out or a cancellation signal is observed.
async fn run_chain<P, J>(
    id: Uuid,
    mut target: DateTime<Utc>,
    rule: Option<Recurrence>,
    job: J,
    payload: P,
    mut all_rx: watch::Receiver<bool>,
    mut chain_rx: watch::Receiver<bool>,
) where
    P: Clone + Send + Sync + 'static,
    J: Job<P>,
{
    loop {
        // Biased so a cancellation that raced the deadline always wins,
        // even when the computed delay is zero.
        tokio::select! {
            biased;
            () = cancelled(&mut all_rx) => {
                tracing::debug!(%id, "chain cancelled while pending");
                return;
            }
            () = cancelled(&mut chain_rx) => {
                tracing::debug!(%id, "chain cancelled while pending");
                return;
            }
            () = tokio::time::sleep(delay_until(target)) => {}
        }

        tracing::debug!(%id, nominal = %target, "firing occurrence");
        if let Err(err) = job.run(payload.clone()).await {
            tracing::error!(%id, error = %err, "job failed, chain terminated");
            return;
        }

        let Some(rule) = rule else {
            tracing::debug!(%id, "one-shot complete");
            return;
        };

        // Cancellation during the invocation lets it finish but suppresses
        // the reschedule.
        if *all_rx.borrow() || *chain_rx.borrow() {
            tracing::debug!(%id, "chain cancelled while firing, not rescheduled");
            return;
        }

        target = match rule.advance(target) {
            Ok(next) => next,
            Err(err) => {
                tracing::error!(%id, error = %err, "advance failed, chain terminated");
                return;
            }
        };
    }
}

/// Resolves when the watch value becomes true. If the sender is dropped
/// without ever signalling, this pends forever: a dropped handle or
/// scheduler must not cancel its chains.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|cancel| *cancel).await.is_err() {
        std::future::pending::<()>().await;
    }
}
