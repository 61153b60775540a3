//! # fire-later
//!
//! A small, calendar-aware scheduler for one-shot and recurring work on async
//! runtimes.
//!
//! The crate does one thing: run a unit of work at an absolute point in time,
//! optionally repeating on a fixed calendar cadence (every minute, hour,
//! half-day, day, week, month, or year) until cancelled. There is no
//! persistence, no distributed coordination, and no misfire recovery: if the
//! process is not running when a target time elapses, that occurrence is lost.
//!
//! ## Model
//!
//! - **Occurrence**: one invocation of the work at one target time.
//! - **Chain**: the sequence of occurrences produced by a recurring schedule.
//!   Each chain runs as a single spawned task that sleeps, fires, advances,
//!   and repeats, so memory stays bounded no matter how long it runs.
//! - **Anchor**: the time passed to a scheduling call. A recurring schedule
//!   fires first at `advance(anchor, rule)`, the occurrence *after* the
//!   anchor, never the anchor itself.
//!
//! Every occurrence's target is computed from the previous *nominal* target,
//! not from when the work actually ran, so a slow job does not shift the
//! calendar grid (and no drift correction is applied over long chains).
//!
//! ## Cancellation
//!
//! Each scheduling call returns a [`ScheduleHandle`] whose
//! [`cancel`](ScheduleHandle::cancel) stops that chain alone;
//! [`Scheduler::cancel_all`] stops every chain started by that scheduler
//! instance. Both signals are terminal. A wait observing either signal aborts
//! before the work runs; work already executing finishes but does not
//! reschedule. Dropping a handle or the scheduler cancels nothing; chains
//! are fire-and-forget unless explicitly cancelled.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::{Duration, Utc};
//! use fire_later::{Recurrence, Scheduler};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let scheduler = Scheduler::new();
//!
//!     // One-shot: must be strictly in the future.
//!     scheduler.schedule_once(Utc::now() + Duration::seconds(5), |()| async {
//!         println!("hello from the future");
//!         anyhow::Ok(())
//!     })?;
//!
//!     // Recurring: first fire at advance(anchor), then hourly until cancelled.
//!     let handle =
//!         scheduler.schedule_recurring(Utc::now(), Recurrence::EveryHour, |()| async {
//!             println!("tick");
//!             anyhow::Ok(())
//!         })?;
//!
//!     handle.cancel();
//!     Ok(())
//! }
//! ```
//!
//! ## Failure policy
//!
//! A job returning `Err` terminates its chain: the error is logged at error
//! level and no further occurrences fire. There are no retries. Silent
//! infinite-failure loops are worse than a dead chain.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Error types for scheduling operations.
pub mod error;
/// Per-schedule cancellation handles.
#[cfg(feature = "tokio-runtime")]
pub mod handle;
/// The unit-of-work abstraction.
pub mod job;
/// Calendar recurrence rules and the advance function.
pub mod recurrence;
/// Runtime adapters for spawning chain tasks.
pub mod runtime;
/// The scheduler itself.
#[cfg(feature = "tokio-runtime")]
pub mod scheduler;
/// Shared utilities.
pub mod util;

pub use error::{AppResult, ScheduleError};
#[cfg(feature = "tokio-runtime")]
pub use handle::ScheduleHandle;
pub use job::Job;
pub use recurrence::Recurrence;
pub use runtime::Spawn;
#[cfg(feature = "tokio-runtime")]
pub use runtime::TokioSpawner;
#[cfg(feature = "tokio-runtime")]
pub use scheduler::Scheduler;
