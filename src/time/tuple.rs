//! Interchange representation of a calendar date
//!
//! Text parsers, pretty printers and command line front-ends exchange dates
//! in one of three shapes: a bare date, a date with a time of day, or a date
//! and time tagged with a time scale.

use serde::{Deserialize, Serialize};

use super::calendar::{days_in_month, is_reform_gap};
use super::TimeScale;
use crate::{AstroError, Result};

/// A date, optionally with a time of day and a time scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DateTuple {
    DateOnly {
        year: i32,
        month: u32,
        day: u32,
    },
    DateTime {
        year: i32,
        month: u32,
        day: u32,
        hours: u32,
        minutes: u32,
        seconds: f64,
    },
    DateTimeWithScale {
        year: i32,
        month: u32,
        day: u32,
        hours: u32,
        minutes: u32,
        seconds: f64,
        scale: TimeScale,
    },
}

impl DateTuple {
    /// The calendar date part
    pub fn date(&self) -> (i32, u32, u32) {
        match *self {
            DateTuple::DateOnly { year, month, day }
            | DateTuple::DateTime {
                year, month, day, ..
            }
            | DateTuple::DateTimeWithScale {
                year, month, day, ..
            } => (year, month, day),
        }
    }

    /// The time of day, if present
    pub fn time(&self) -> Option<(u32, u32, f64)> {
        match *self {
            DateTuple::DateOnly { .. } => None,
            DateTuple::DateTime {
                hours,
                minutes,
                seconds,
                ..
            }
            | DateTuple::DateTimeWithScale {
                hours,
                minutes,
                seconds,
                ..
            } => Some((hours, minutes, seconds)),
        }
    }

    /// The time scale tag, if present
    pub fn scale(&self) -> Option<TimeScale> {
        match *self {
            DateTuple::DateTimeWithScale { scale, .. } => Some(scale),
            _ => None,
        }
    }

    /// Check every field, failing on the first one out of range
    ///
    /// With `require_time` set, a bare date is rejected as well.
    pub fn validate(&self, require_time: bool) -> Result<()> {
        let (year, month, day) = self.date();
        validate_date(year, month, day)?;
        match self.time() {
            Some((hours, minutes, seconds)) => validate_time(hours, minutes, seconds),
            None if require_time => Err(AstroError::InvalidDate(format!(
                "{:04}-{:02}-{:02}: time required but missing",
                year, month, day
            ))),
            None => Ok(()),
        }
    }
}

/// Strict check of a calendar date
pub fn validate_date(year: i32, month: u32, day: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(AstroError::InvalidDate(format!(
            "month {} is not in 1-12",
            month
        )));
    }
    let length = days_in_month(year, month);
    if day < 1 || day > length {
        return Err(AstroError::InvalidDate(format!(
            "day {} is not in 1-{} for {:04}-{:02}",
            day, length, year, month
        )));
    }
    if is_reform_gap(year, month, day) {
        return Err(AstroError::InvalidDate(format!(
            "{:04}-{:02}-{:02} was dropped by the Gregorian reform",
            year, month, day
        )));
    }
    Ok(())
}

/// Strict check of a time of day
pub fn validate_time(hours: u32, minutes: u32, seconds: f64) -> Result<()> {
    if hours > 23 {
        return Err(AstroError::InvalidTime(format!(
            "hours {} is not in 0-23",
            hours
        )));
    }
    if minutes > 59 {
        return Err(AstroError::InvalidTime(format!(
            "minutes {} is not in 0-59",
            minutes
        )));
    }
    if !(0.0..60.0).contains(&seconds) {
        return Err(AstroError::InvalidTime(format!(
            "seconds {} is not in [0, 60)",
            seconds
        )));
    }
    Ok(())
}

impl From<(i32, u32, u32)> for DateTuple {
    fn from(date: (i32, u32, u32)) -> Self {
        DateTuple::DateOnly {
            year: date.0,
            month: date.1,
            day: date.2,
        }
    }
}

impl From<(i32, u32, u32, u32, u32, f64)> for DateTuple {
    fn from(tuple: (i32, u32, u32, u32, u32, f64)) -> Self {
        DateTuple::DateTime {
            year: tuple.0,
            month: tuple.1,
            day: tuple.2,
            hours: tuple.3,
            minutes: tuple.4,
            seconds: tuple.5,
        }
    }
}

impl From<(i32, u32, u32, u32, u32, f64, TimeScale)> for DateTuple {
    fn from(tuple: (i32, u32, u32, u32, u32, f64, TimeScale)) -> Self {
        DateTuple::DateTimeWithScale {
            year: tuple.0,
            month: tuple.1,
            day: tuple.2,
            hours: tuple.3,
            minutes: tuple.4,
            seconds: tuple.5,
            scale: tuple.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_from_tuples() {
        let date: DateTuple = (2013, 3, 31).into();
        assert_eq!(date.date(), (2013, 3, 31));
        assert!(date.time().is_none());
        assert!(date.scale().is_none());

        let date_time: DateTuple = (1980, 4, 22, 14, 36, 51.67).into();
        assert_eq!(date_time.time(), Some((14, 36, 51.67)));
        assert!(date_time.scale().is_none());

        let tagged: DateTuple = (1980, 4, 22, 14, 36, 51.67, TimeScale::Universal).into();
        assert_eq!(tagged.scale(), Some(TimeScale::Universal));
    }

    #[test]
    fn test_validate_accepts_good_dates() {
        let leap_day: DateTuple = (2012, 2, 29, 0, 0, 0.0).into();
        assert!(leap_day.validate(true).is_ok());
        let date: DateTuple = (2014, 12, 31).into();
        assert!(date.validate(false).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_dates() {
        let no_leap: DateTuple = (2014, 2, 29, 0, 0, 0.0).into();
        assert!(matches!(no_leap.validate(true), Err(AstroError::InvalidDate(_))));

        let month: DateTuple = (2014, 13, 1).into();
        assert!(matches!(month.validate(false), Err(AstroError::InvalidDate(_))));

        let day_zero: DateTuple = (2014, 1, 0).into();
        assert!(matches!(day_zero.validate(false), Err(AstroError::InvalidDate(_))));

        for day in 5..=14 {
            let dropped: DateTuple = (1582, 10, day).into();
            assert!(matches!(dropped.validate(false), Err(AstroError::InvalidDate(_))));
        }
        assert!(validate_date(1582, 10, 4).is_ok());
        assert!(validate_date(1582, 10, 15).is_ok());
        assert!(validate_date(1500, 2, 29).is_ok());
    }

    #[test]
    fn test_validate_requires_time() {
        let date: DateTuple = (2014, 1, 1).into();
        assert!(matches!(date.validate(true), Err(AstroError::InvalidDate(_))));
    }

    #[test]
    fn test_validate_rejects_bad_times() {
        for (h, m, s) in [(24, 0, 0.0), (0, 60, 0.0), (0, 0, 60.0), (0, 0, -0.5)] {
            let tuple: DateTuple = (2014, 1, 1, h, m, s).into();
            assert!(
                matches!(tuple.validate(true), Err(AstroError::InvalidTime(_))),
                "{:?} should be rejected",
                tuple
            );
        }
    }
}
