//! Error types for scheduling operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::recurrence::Recurrence;

/// Errors surfaced synchronously by scheduling calls.
#[derive(Debug, Clone, Copy, Error)]
pub enum ScheduleError {
    /// One-shot target time is not strictly later than the current time.
    #[error("target time {target} is not later than current time {now}")]
    TargetNotInFuture {
        /// The rejected target time.
        target: DateTime<Utc>,
        /// The clock reading the target was compared against.
        now: DateTime<Utc>,
    },
    /// Calendar arithmetic overflowed the representable date range.
    ///
    /// Only reachable near chrono's maximum year; treated as a
    /// programming-error-level fault, not a recoverable condition.
    #[error("date overflow advancing {from} by {rule}")]
    DateOverflow {
        /// The date being advanced.
        from: DateTime<Utc>,
        /// The rule that was applied.
        rule: Recurrence,
    },
}

/// Application-facing result using anyhow, for job bodies and higher-level
/// contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
