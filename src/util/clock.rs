//! Wall-clock helpers.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Duration from now until `target`, clamped to zero if `target` has passed.
///
/// The clamp is what lets a recurring chain whose anchor lies in the past
/// fire its elapsed occurrences immediately, one by one, until the nominal
/// grid catches up with the present.
#[must_use]
pub fn delay_until(target: DateTime<Utc>) -> Duration {
    (target - Utc::now()).to_std().unwrap_or(Duration::ZERO)
}
