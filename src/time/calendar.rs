//! Calendar date and Julian date conversion functions
//!
//! This module provides functionality for converting between Julian dates and
//! calendar dates, along with the calendar queries the date engine needs.
//! Dates on or after 1582-10-15 are Gregorian, earlier dates are Julian.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DAY_S, FIRST_EASTER_YEAR, GREGORIAN_START, GREGORIAN_START_DATE, HOUR_S, J2000,
    JULIAN_YEAR_DAYS, REFORM_DAYS_DROPPED,
};
use crate::numeric::{round_scaled, units_per_second};
use crate::{AstroError, Result};

/// Calendar fields recovered from a Julian date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarTuple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// Leap year rule of the calendar in force: Julian up to 1582, Gregorian after
pub fn is_leap_year(year: i32) -> bool {
    if year <= GREGORIAN_START_DATE.0 {
        year.rem_euclid(4) == 0
    } else {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }
}

/// True for the ten dates dropped by the Gregorian reform, 1582-10-05 to 1582-10-14
pub fn is_reform_gap(year: i32, month: u32, day: u32) -> bool {
    let (y, m, d) = GREGORIAN_START_DATE;
    year == y && month == m && (d - REFORM_DAYS_DROPPED..d).contains(&day)
}

/// Number of days in `month` of `year`, or 0 when the month is not 1-12
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// True when the date falls on or after the Gregorian cutover
pub fn is_gregorian(year: i32, month: u32, day: u32) -> bool {
    (year, month, day) >= GREGORIAN_START_DATE
}

/// Julian date of a calendar date, where `day` may carry a day fraction
///
/// Meeus, Astronomical Algorithms, chapter 7.
pub fn julian_day(year: i32, month: u32, day: f64) -> f64 {
    let gregorian = is_gregorian(year, month, day.floor() as u32);
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };

    let b = if gregorian {
        let a = (y / 100.0).floor();
        2.0 - a + (a / 4.0).floor()
    } else {
        0.0
    };

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Julian date of a full calendar date and time
pub fn julian_day_from_parts(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
) -> f64 {
    let fraction = hours_from_time(hour, minute, second) / 24.0;
    julian_day(year, month, day as f64 + fraction)
}

/// Recover calendar fields from a Julian date
///
/// The day fraction is rounded to `precision` decimal places of a second
/// before it is split, so a value that rounds up to midnight lands on the
/// following day rather than producing 24:00:00.
pub fn calendar_from_julian_day(jd: f64, precision: u32) -> CalendarTuple {
    let shifted = jd + 0.5;
    let mut z = shifted.floor() as i64;
    let fraction = shifted - z as f64;

    let per_day = DAY_S as i64 * units_per_second(precision);
    let mut units = round_scaled(fraction * DAY_S, precision);
    if units >= per_day {
        z += 1;
        units -= per_day;
    }

    let a = if z < GREGORIAN_START as i64 {
        z
    } else {
        let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
        z + 1 + alpha - alpha.div_euclid(4)
    };
    let b = a + 1524;
    let c = ((b as f64 - 122.1) / JULIAN_YEAR_DAYS).floor() as i64;
    let d = (JULIAN_YEAR_DAYS * c as f64).floor() as i64;
    let e = ((b - d) as f64 / 30.6001).floor() as i64;

    let day = b - d - (30.6001 * e as f64).floor() as i64;
    let month = if e < 14 { e - 1 } else { e - 13 };
    let year = if month > 2 { c - 4716 } else { c - 4715 };

    let (hour, minute, second) = split_units(units, precision);
    CalendarTuple {
        year: year as i32,
        month: month as u32,
        day: day as u32,
        hour,
        minute,
        second,
    }
}

/// Decimal hours from a time of day
pub fn hours_from_time(hour: u32, minute: u32, second: f64) -> f64 {
    hour as f64 + (minute as f64 + second / 60.0) / 60.0
}

/// Split a non-negative count of `10^-precision` second units into h, m, s
///
/// Hours are not wrapped; callers decide what a carry past 24 means.
pub fn split_units(units: i64, precision: u32) -> (u32, u32, f64) {
    let per_second = units_per_second(precision);
    let per_minute = 60 * per_second;
    let per_hour = 60 * per_minute;

    let hour = units.div_euclid(per_hour);
    let rest = units.rem_euclid(per_hour);
    let minute = rest / per_minute;
    let rest = rest % per_minute;

    (hour as u32, minute as u32, rest as f64 / per_second as f64)
}

/// Round decimal hours to seconds precision, as a count of sub-second units
pub fn units_from_hours(hours: f64, precision: u32) -> i64 {
    round_scaled(hours * HOUR_S, precision)
}

/// Date of Easter Sunday in the Gregorian calendar as (year, month, day)
///
/// Anonymous Gregorian algorithm (Meeus/Jones/Butcher). Undefined before 1583.
pub fn date_of_easter(year: i32) -> Result<(i32, u32, u32)> {
    if year < FIRST_EASTER_YEAR {
        return Err(AstroError::UnsupportedYearRange(year));
    }

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let t = h + l - 7 * m + 114;

    Ok((year, (t / 31) as u32, (t % 31 + 1) as u32))
}

/// Day of the week for a Julian date
pub fn day_of_week(jd: f64) -> Weekday {
    let index = (jd + 1.5).floor().rem_euclid(7.0) as u32;
    match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Julian date of a Julian epoch such as 1980.0
pub fn julian_epoch(epoch: f64) -> f64 {
    J2000 + (epoch - 2000.0) * JULIAN_YEAR_DAYS
}

/// Format a Julian date as a calendar date string (YYYY-MM-DD)
pub fn format_date(jd: f64) -> String {
    let cal = calendar_from_julian_day(jd, 0);
    format!("{:04}-{:02}-{:02}", cal.year, cal.month, cal.day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(-4712, 1, 1, 12, 0, 0.0, 0.0)]
    #[case(1582, 10, 15, 0, 0, 0.0, 2_299_160.5)]
    #[case(1990, 12, 25, 19, 30, 0.0, 2_448_251.3125)]
    #[case(1993, 1, 1, 0, 0, 0.0, 2_448_988.5)]
    #[case(1993, 1, 1, 12, 0, 0.0, 2_448_989.0)]
    #[case(1993, 4, 1, 0, 0, 0.0, 2_449_078.5)]
    #[case(2000, 1, 1, 12, 0, 0.0, 2_451_545.0)]
    fn test_julian_day_vectors(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] second: f64,
        #[case] expected: f64,
    ) {
        let jd = julian_day_from_parts(year, month, day, hour, minute, second);
        assert_relative_eq!(jd, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_gregorian_cutover_is_contiguous() {
        // 1582-10-04 (Julian) is followed directly by 1582-10-15 (Gregorian)
        let last_julian = julian_day(1582, 10, 4.0);
        let first_gregorian = julian_day(1582, 10, 15.0);
        assert_relative_eq!(first_gregorian - last_julian, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_calendar_from_julian_day() {
        let cal = calendar_from_julian_day(2_451_545.0, 2);
        assert_eq!((cal.year, cal.month, cal.day, cal.hour, cal.minute), (2000, 1, 1, 12, 0));
        assert_relative_eq!(cal.second, 0.0);

        let cal = calendar_from_julian_day(2_448_251.3125, 2);
        assert_eq!((cal.year, cal.month, cal.day, cal.hour, cal.minute), (1990, 12, 25, 19, 30));

        let cal = calendar_from_julian_day(0.0, 2);
        assert_eq!((cal.year, cal.month, cal.day, cal.hour), (-4712, 1, 1, 12));

        let cal = calendar_from_julian_day(2_299_160.5, 2);
        assert_eq!((cal.year, cal.month, cal.day), (1582, 10, 15));
    }

    #[test]
    fn test_rounding_carries_into_next_day() {
        // 0.004 seconds before midnight rounds up to the next day at 2 decimals
        let jd = julian_day(1999, 12, 31.0) + 1.0 - 0.004 / DAY_S;
        let cal = calendar_from_julian_day(jd, 2);
        assert_eq!((cal.year, cal.month, cal.day, cal.hour, cal.minute), (2000, 1, 1, 0, 0));
        assert_relative_eq!(cal.second, 0.0);
    }

    #[test]
    fn test_julian_round_trip() {
        for &(y, mo, d, h, mi, s) in &[
            (1993, 1, 1, 12, 0, 0.0),
            (2000, 1, 1, 12, 0, 0.0),
            (1980, 4, 22, 14, 36, 51.67),
            (1066, 10, 14, 9, 0, 0.0),
            (-500, 3, 1, 6, 30, 15.25),
        ] {
            let jd = julian_day_from_parts(y, mo, d, h, mi, s);
            let cal = calendar_from_julian_day(jd, 2);
            assert_eq!((cal.year, cal.month, cal.day, cal.hour, cal.minute), (y, mo, d, h, mi));
            assert_relative_eq!(cal.second, s, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(1500));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(1582));
        assert!(!is_leap_year(1700));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(1901));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2012));
        assert!(!is_leap_year(2014));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2012, 2), 29);
        assert_eq!(days_in_month(2014, 2), 28);
        assert_eq!(days_in_month(2014, 4), 30);
        assert_eq!(days_in_month(2014, 12), 31);
        assert_eq!(days_in_month(2014, 13), 0);
        assert_eq!(days_in_month(1500, 2), 29);
    }

    #[test]
    fn test_reform_gap() {
        assert!(!is_reform_gap(1582, 10, 4));
        assert!(is_reform_gap(1582, 10, 5));
        assert!(is_reform_gap(1582, 10, 14));
        assert!(!is_reform_gap(1582, 10, 15));
        assert!(!is_reform_gap(1583, 10, 10));
        // Julian Thursday 4 October is followed by Gregorian Friday 15 October
        assert_relative_eq!(
            julian_day(1582, 10, 15.0) - julian_day(1582, 10, 4.0),
            1.0
        );
    }

    #[test]
    fn test_julian_calendar_leap_day_round_trips() {
        let jd = julian_day(1500, 2, 29.5);
        assert_relative_eq!(jd, 2_268_992.0);
        let cal = calendar_from_julian_day(jd, 2);
        assert_eq!((cal.year, cal.month, cal.day, cal.hour), (1500, 2, 29, 12));
        assert!(cal.day <= days_in_month(cal.year, cal.month));
    }

    #[rstest]
    #[case(1959, 3, 29)]
    #[case(2013, 3, 31)]
    #[case(2014, 4, 20)]
    #[case(2000, 4, 23)]
    fn test_date_of_easter(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
        assert_eq!(date_of_easter(year).unwrap(), (year, month, day));
    }

    #[test]
    fn test_easter_before_gregorian_reform() {
        assert!(matches!(
            date_of_easter(1582),
            Err(AstroError::UnsupportedYearRange(1582))
        ));
    }

    #[test]
    fn test_day_of_week() {
        // 2000-01-01 was a Saturday, 1980-04-22 a Tuesday
        assert_eq!(day_of_week(julian_day(2000, 1, 1.0)), Weekday::Sat);
        assert_eq!(day_of_week(julian_day(1980, 4, 22.5)), Weekday::Tue);
    }

    #[test]
    fn test_split_units() {
        let (h, m, s) = split_units(units_from_hours(14.614_352_777_8, 2), 2);
        assert_eq!((h, m), (14, 36));
        assert_relative_eq!(s, 51.67, epsilon = 1e-9);
    }

    #[test]
    fn test_julian_epoch_and_format() {
        assert_relative_eq!(julian_epoch(2000.0), J2000);
        assert_relative_eq!(julian_epoch(1980.0), 2_444_240.0);
        assert_eq!(format_date(2_451_545.0), "2000-01-01");
    }
}
