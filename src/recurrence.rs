//! Calendar recurrence rules and the advance function.
//!
//! [`Recurrence`] is a closed set of fixed cadences. [`Recurrence::advance`]
//! is the pure mapping from a date and a rule to the next occurrence; the
//! scheduler calls it once per fire, and callers can use it directly to
//! predict a chain's grid.

use std::fmt;

use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// A fixed calendar cadence for recurring schedules.
///
/// The sub-day rules are exact durations; `EveryMonth` and `EveryYear` are
/// calendar-aware and clamp the day-of-month when the target month is
/// shorter (`2024-01-31` + one month is `2024-02-29`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// Every minute.
    EveryMinute,
    /// Every hour.
    EveryHour,
    /// Every twelve hours.
    EveryHalfDay,
    /// Every day.
    EveryDay,
    /// Every seven days.
    EveryWeek,
    /// Every calendar month, day-of-month preserved where valid.
    EveryMonth,
    /// Every calendar year, Feb 29 clamped to Feb 28 off leap years.
    EveryYear,
}

impl Recurrence {
    /// Compute the occurrence after `from` under this rule.
    ///
    /// Always strictly later than `from`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::DateOverflow`] if the result exceeds the
    /// representable date range. Unreachable for any realistic date.
    pub fn advance(self, from: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        let next = match self {
            Self::EveryMinute => from.checked_add_signed(TimeDelta::minutes(1)),
            Self::EveryHour => from.checked_add_signed(TimeDelta::hours(1)),
            Self::EveryHalfDay => from.checked_add_signed(TimeDelta::hours(12)),
            Self::EveryDay => from.checked_add_days(Days::new(1)),
            Self::EveryWeek => from.checked_add_days(Days::new(7)),
            Self::EveryMonth => from.checked_add_months(Months::new(1)),
            Self::EveryYear => from.checked_add_months(Months::new(12)),
        };
        next.ok_or(ScheduleError::DateOverflow { from, rule: self })
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EveryMinute => "every_minute",
            Self::EveryHour => "every_hour",
            Self::EveryHalfDay => "every_half_day",
            Self::EveryDay => "every_day",
            Self::EveryWeek => "every_week",
            Self::EveryMonth => "every_month",
            Self::EveryYear => "every_year",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn fixed_duration_rules_add_exact_deltas() {
        let from = utc(2024, 3, 15, 10, 30, 0);
        assert_eq!(
            Recurrence::EveryMinute.advance(from).unwrap(),
            utc(2024, 3, 15, 10, 31, 0)
        );
        assert_eq!(
            Recurrence::EveryHour.advance(from).unwrap(),
            utc(2024, 3, 15, 11, 30, 0)
        );
        assert_eq!(
            Recurrence::EveryHalfDay.advance(from).unwrap(),
            utc(2024, 3, 15, 22, 30, 0)
        );
        assert_eq!(
            Recurrence::EveryDay.advance(from).unwrap(),
            utc(2024, 3, 16, 10, 30, 0)
        );
        assert_eq!(
            Recurrence::EveryWeek.advance(from).unwrap(),
            utc(2024, 3, 22, 10, 30, 0)
        );
    }

    #[test]
    fn month_advance_preserves_day_where_valid() {
        assert_eq!(
            Recurrence::EveryMonth.advance(utc(2024, 3, 15, 0, 0, 0)).unwrap(),
            utc(2024, 4, 15, 0, 0, 0)
        );
    }

    #[test]
    fn month_advance_clamps_to_shorter_month() {
        assert_eq!(
            Recurrence::EveryMonth.advance(utc(2024, 1, 31, 8, 0, 0)).unwrap(),
            utc(2024, 2, 29, 8, 0, 0)
        );
        assert_eq!(
            Recurrence::EveryMonth.advance(utc(2023, 1, 31, 8, 0, 0)).unwrap(),
            utc(2023, 2, 28, 8, 0, 0)
        );
    }

    #[test]
    fn month_advance_rolls_over_year_boundary() {
        assert_eq!(
            Recurrence::EveryMonth.advance(utc(2024, 12, 10, 0, 0, 0)).unwrap(),
            utc(2025, 1, 10, 0, 0, 0)
        );
    }

    #[test]
    fn year_advance_preserves_date() {
        assert_eq!(
            Recurrence::EveryYear.advance(utc(2024, 2, 28, 12, 0, 0)).unwrap(),
            utc(2025, 2, 28, 12, 0, 0)
        );
    }

    #[test]
    fn year_advance_clamps_leap_day() {
        assert_eq!(
            Recurrence::EveryYear.advance(utc(2024, 2, 29, 12, 0, 0)).unwrap(),
            utc(2025, 2, 28, 12, 0, 0)
        );
    }

    #[test]
    fn advance_is_strictly_increasing_for_every_rule() {
        let rules = [
            Recurrence::EveryMinute,
            Recurrence::EveryHour,
            Recurrence::EveryHalfDay,
            Recurrence::EveryDay,
            Recurrence::EveryWeek,
            Recurrence::EveryMonth,
            Recurrence::EveryYear,
        ];
        let dates = [
            utc(1999, 12, 31, 23, 59, 59),
            utc(2024, 2, 29, 0, 0, 0),
            utc(2024, 6, 1, 12, 0, 0),
        ];
        for rule in rules {
            for from in dates {
                let next = rule.advance(from).unwrap();
                assert!(next > from, "{rule} did not advance past {from}");
            }
        }
    }

    #[test]
    fn advance_overflow_is_reported() {
        let err = Recurrence::EveryYear.advance(DateTime::<Utc>::MAX_UTC).unwrap_err();
        assert!(matches!(err, ScheduleError::DateOverflow { .. }));
    }

    #[test]
    fn serde_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&Recurrence::EveryHalfDay).unwrap(),
            "\"every_half_day\""
        );
        let parsed: Recurrence = serde_json::from_str("\"every_week\"").unwrap();
        assert_eq!(parsed, Recurrence::EveryWeek);
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(Recurrence::EveryMinute.to_string(), "every_minute");
        assert_eq!(Recurrence::EveryYear.to_string(), "every_year");
    }
}
