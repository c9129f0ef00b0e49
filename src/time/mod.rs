//! Time module for astronomical time calculations
//!
//! This module represents a calendar date and time in one of five time scales
//! and converts between them. The scales form a small graph:
//!
//! ```text
//! LCT <-> UT <-> GST <-> LST
//!          ^
//!          v
//!          TD
//! ```
//!
//! Each edge applies one classical formula; conversions between scales that
//! are not adjacent walk the graph through UT and GST.

pub mod calendar;
pub mod delta_t;
pub mod sidereal;
pub mod tuple;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::constants::{DAY_S, GREGORIAN_START_DATE, HOUR_S};
use crate::numeric::{
    fix, parse_or, round_scaled, units_per_second, wrap_signed, DEFAULT_PRECISION, MAX_PRECISION,
};
use crate::{AstroError, Result};

pub use calendar::{
    date_of_easter, day_of_week, days_in_month, is_leap_year, is_reform_gap, julian_day,
    julian_epoch, CalendarTuple,
};
pub use delta_t::{DeltaT, HistoricalDeltaT, PolynomialDeltaT, PolynomialSet};
pub use tuple::DateTuple;

use calendar::{calendar_from_julian_day, hours_from_time, split_units, units_from_hours};
use tuple::{validate_date, validate_time};

/// The five time scales a date can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeScale {
    /// Local civil time (zone time, possibly with daylight saving)
    LocalCivil,
    /// Universal time
    Universal,
    /// Dynamical (terrestrial) time
    Dynamical,
    /// Greenwich mean sidereal time
    GreenwichSidereal,
    /// Local sidereal time
    LocalSidereal,
}

impl TimeScale {
    /// Every time scale, in graph order
    pub const ALL: [TimeScale; 5] = [
        TimeScale::LocalCivil,
        TimeScale::Universal,
        TimeScale::Dynamical,
        TimeScale::GreenwichSidereal,
        TimeScale::LocalSidereal,
    ];

    /// Short lowercase tag used in text
    pub fn tag(&self) -> &'static str {
        match self {
            TimeScale::LocalCivil => "lct",
            TimeScale::Universal => "ut",
            TimeScale::Dynamical => "td",
            TimeScale::GreenwichSidereal => "gst",
            TimeScale::LocalSidereal => "lst",
        }
    }

    /// Next scale on the way from `self` to `target`
    fn next_hop(self, target: TimeScale) -> TimeScale {
        use TimeScale::*;
        match (self, target) {
            (LocalCivil, _) | (Dynamical, _) => Universal,
            (Universal, LocalCivil) => LocalCivil,
            (Universal, Dynamical) => Dynamical,
            (Universal, _) => GreenwichSidereal,
            (GreenwichSidereal, LocalSidereal) => LocalSidereal,
            (GreenwichSidereal, _) => Universal,
            (LocalSidereal, _) => GreenwichSidereal,
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag().to_uppercase())
    }
}

impl FromStr for TimeScale {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lct" => Ok(TimeScale::LocalCivil),
            "ut" | "utc" => Ok(TimeScale::Universal),
            "td" | "tdt" | "tt" => Ok(TimeScale::Dynamical),
            "gst" => Ok(TimeScale::GreenwichSidereal),
            "lst" => Ok(TimeScale::LocalSidereal),
            other => Err(AstroError::InvalidTime(format!(
                "unknown time scale '{}'",
                other
            ))),
        }
    }
}

/// Where and in which civil zone a date is observed
///
/// The observer only matters for LCT (zone and daylight saving) and LST
/// (longitude). It travels with each date value; there is no shared default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observer {
    zone_correction: f64,
    daylight_saving: bool,
    longitude: f64,
}

impl Observer {
    /// Create an observer; zone and longitude are wrapped into range
    pub fn new(zone_correction: f64, daylight_saving: bool, longitude: f64) -> Self {
        let mut observer = Self::default();
        observer.set_zone_correction(zone_correction);
        observer.set_daylight_saving(daylight_saving);
        observer.set_longitude(longitude);
        observer
    }

    /// Hours added to UT to get zone time, in `[-24, 24)`
    pub fn zone_correction(&self) -> f64 {
        self.zone_correction
    }

    pub fn daylight_saving(&self) -> bool {
        self.daylight_saving
    }

    /// Geographic longitude in degrees, east positive, in `[-180, 180]`
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn set_zone_correction(&mut self, zone_correction: f64) {
        self.zone_correction = wrap_signed(zone_correction, 24.0);
    }

    pub fn set_daylight_saving(&mut self, daylight_saving: bool) {
        self.daylight_saving = daylight_saving;
    }

    /// Set the longitude; east of +180 wraps to the west, but +180 itself is kept
    pub fn set_longitude(&mut self, longitude: f64) {
        let wrapped = wrap_signed(longitude, 180.0);
        self.longitude = if wrapped == -180.0 && longitude > 0.0 {
            180.0
        } else {
            wrapped
        };
    }

    /// Total offset of local civil time from UT in hours
    pub fn civil_offset_hours(&self) -> f64 {
        self.zone_correction + if self.daylight_saving { 1.0 } else { 0.0 }
    }
}

/// A calendar date and time tagged with its time scale
///
/// Seconds are held rounded half-up to `precision` decimals (2 by default),
/// and every operation that produces seconds rounds the same way, so values
/// survive round trips through other scales and through Julian dates.
///
/// Equality compares the calendar fields and the scale only; the observer and
/// precision are carried along but are not part of the value.
#[derive(Debug, Clone)]
pub struct AstroDateTime {
    year: i32,
    month: u32,
    day: u32,
    hours: u32,
    minutes: u32,
    seconds: f64,
    scale: TimeScale,
    observer: Observer,
    precision: u32,
}

impl AstroDateTime {
    /// Create a date, rejecting any field that is out of range
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hours: u32,
        minutes: u32,
        seconds: f64,
        scale: TimeScale,
    ) -> Result<Self> {
        validate_date(year, month, day)?;
        let seconds = fix(seconds, DEFAULT_PRECISION);
        validate_time(hours, minutes, seconds)?;
        Ok(Self {
            year,
            month,
            day,
            hours,
            minutes,
            seconds,
            scale,
            observer: Observer::default(),
            precision: DEFAULT_PRECISION,
        })
    }

    /// Create a date, clamping every field into range
    pub fn from_fields_clamped(
        year: i32,
        month: u32,
        day: u32,
        hours: u32,
        minutes: u32,
        seconds: f64,
        scale: TimeScale,
    ) -> Self {
        let mut date = Self::midnight(year, 1, 1, scale);
        date.set_month(month);
        date.set_day(day);
        date.set_hours(hours);
        date.set_minutes(minutes);
        date.set_seconds(seconds);
        date
    }

    /// Create a date from free-text fields
    ///
    /// Fields that are not numbers fall back to 2000-01-01 00:00:00, and the
    /// result is clamped like [`AstroDateTime::from_fields_clamped`].
    pub fn from_text_fields(fields: [&str; 6], scale: TimeScale) -> Self {
        Self::from_fields_clamped(
            parse_or(fields[0], 2000),
            parse_or(fields[1], 1),
            parse_or(fields[2], 1),
            parse_or(fields[3], 0),
            parse_or(fields[4], 0),
            parse_or(fields[5], 0.0),
            scale,
        )
    }

    /// Create a date from a Julian date
    pub fn from_julian_day(jd: f64, scale: TimeScale) -> Self {
        let mut date = Self::midnight(2000, 1, 1, scale);
        date.set_from_julian_day(jd);
        date
    }

    /// Current system time as UT
    pub fn now() -> Self {
        Self::from_chrono(Utc::now())
    }

    /// Convert a chrono UTC timestamp to a UT date
    pub fn from_chrono(dt: DateTime<Utc>) -> Self {
        let mut date = Self::midnight(dt.year(), dt.month(), dt.day(), TimeScale::Universal);
        let seconds_of_day =
            dt.num_seconds_from_midnight() as f64 + dt.nanosecond() as f64 / 1e9;
        date.set_time_units(round_scaled(seconds_of_day, date.precision), true);
        date
    }

    /// Create a date from the interchange tuple, filling in what is missing
    ///
    /// A bare date becomes midnight. The tuple's own scale wins over `scale`.
    pub fn from_tuple_with_scale(tuple: DateTuple, scale: TimeScale) -> Result<Self> {
        tuple.validate(false)?;
        let (year, month, day) = tuple.date();
        let (hours, minutes, seconds) = tuple.time().unwrap_or((0, 0, 0.0));
        Self::new(
            year,
            month,
            day,
            hours,
            minutes,
            seconds,
            tuple.scale().unwrap_or(scale),
        )
    }

    fn midnight(year: i32, month: u32, day: u32, scale: TimeScale) -> Self {
        Self {
            year,
            month,
            day,
            hours: 0,
            minutes: 0,
            seconds: 0.0,
            scale,
            observer: Observer::default(),
            precision: DEFAULT_PRECISION,
        }
    }

    /// Attach an observer
    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = observer;
        self
    }

    /// Change the number of decimals kept on seconds and re-round
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        let units = self.time_units();
        self.set_time_units(units, true);
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut Observer {
        &mut self.observer
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Time of day in decimal hours
    pub fn decimal_hours(&self) -> f64 {
        hours_from_time(self.hours, self.minutes, self.seconds)
    }

    /// Julian date of the calendar fields, whatever the scale
    pub fn julian_day(&self) -> f64 {
        calendar::julian_day_from_parts(
            self.year,
            self.month,
            self.day,
            self.hours,
            self.minutes,
            self.seconds,
        )
    }

    /// Day of the week of the calendar date
    pub fn day_of_week(&self) -> Weekday {
        day_of_week(self.julian_day())
    }

    /// The interchange tuple for this value
    pub fn to_tuple(&self) -> DateTuple {
        DateTuple::DateTimeWithScale {
            year: self.year,
            month: self.month,
            day: self.day,
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            scale: self.scale,
        }
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
        self.clamp_day();
    }

    /// Set the month, clamped to 1-12; the day is clamped to the new month
    pub fn set_month(&mut self, month: u32) {
        self.month = month.clamp(1, 12);
        self.clamp_day();
    }

    /// Set the day, clamped to the length of the current month
    pub fn set_day(&mut self, day: u32) {
        self.day = day;
        self.clamp_day();
    }

    pub fn set_hours(&mut self, hours: u32) {
        self.hours = hours.min(23);
    }

    pub fn set_minutes(&mut self, minutes: u32) {
        self.minutes = minutes.min(59);
    }

    /// Set the seconds, rounded to the precision and clamped below 60
    pub fn set_seconds(&mut self, seconds: f64) {
        let largest = 60.0 - 1.0 / units_per_second(self.precision) as f64;
        let seconds = if seconds.is_nan() { 0.0 } else { seconds };
        self.seconds = fix(seconds, self.precision).clamp(0.0, largest);
    }

    pub fn set_scale(&mut self, scale: TimeScale) {
        self.scale = scale;
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = observer;
    }

    /// Replace the date and time with the calendar fields of a Julian date
    pub fn set_from_julian_day(&mut self, jd: f64) {
        let cal = calendar_from_julian_day(jd, self.precision);
        self.year = cal.year;
        self.month = cal.month;
        self.day = cal.day;
        self.hours = cal.hour;
        self.minutes = cal.minute;
        self.seconds = cal.second;
    }

    /// Add a (possibly fractional or negative) number of days
    pub fn add_days(&mut self, days: f64) {
        let jd = self.julian_day() + days;
        self.set_from_julian_day(jd);
    }

    /// Add calendar months, carrying into years
    ///
    /// The day is clamped to the length of the resulting month, so Jan 31
    /// plus one month is the last day of February.
    pub fn add_months(&mut self, months: i32) {
        let total = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        self.year = total.div_euclid(12) as i32;
        self.month = total.rem_euclid(12) as u32 + 1;
        self.clamp_day();
    }

    /// Add calendar years; Feb 29 becomes Feb 28 in a common year
    pub fn add_years(&mut self, years: i32) {
        self.year += years;
        self.clamp_day();
    }

    /// Clamp the day to the month; days dropped in October 1582 become the 15th
    fn clamp_day(&mut self) {
        self.day = self.day.clamp(1, days_in_month(self.year, self.month));
        if is_reform_gap(self.year, self.month, self.day) {
            self.day = GREGORIAN_START_DATE.2;
        }
    }

    /// Time of day as a count of `10^-precision` second units
    fn time_units(&self) -> i64 {
        let whole = (self.hours as i64 * 60 + self.minutes as i64) * 60;
        whole * units_per_second(self.precision) + round_scaled(self.seconds, self.precision)
    }

    /// Set the time of day from sub-second units
    ///
    /// With `carry_days` set, whole days past either end of the day move the
    /// calendar date; otherwise the time simply wraps (sidereal scales).
    fn set_time_units(&mut self, units: i64, carry_days: bool) {
        let per_day = DAY_S as i64 * units_per_second(self.precision);
        let days = units.div_euclid(per_day);
        let (hours, minutes, seconds) = split_units(units.rem_euclid(per_day), self.precision);
        if carry_days && days != 0 {
            self.shift_date(days);
        }
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
    }

    fn shift_date(&mut self, days: i64) {
        let jd0 = calendar::julian_day(self.year, self.month, self.day as f64) + days as f64;
        let cal = calendar_from_julian_day(jd0, self.precision);
        self.year = cal.year;
        self.month = cal.month;
        self.day = cal.day;
    }

    /// Julian date of 0h on the calendar date
    fn midnight_julian_day(&self) -> f64 {
        calendar::julian_day(self.year, self.month, self.day as f64)
    }

    fn set_decimal_hours(&mut self, hours: f64, carry_days: bool) {
        let units = units_from_hours(hours, self.precision);
        self.set_time_units(units, carry_days);
    }

    /// Convert to local civil time
    pub fn to_lct(&mut self) {
        self.convert_to(TimeScale::LocalCivil);
    }

    /// Convert to universal time
    pub fn to_ut(&mut self) {
        self.convert_to(TimeScale::Universal);
    }

    /// Convert to dynamical time using the historical ΔT table
    pub fn to_td(&mut self) {
        self.convert_to(TimeScale::Dynamical);
    }

    /// Convert to Greenwich sidereal time
    pub fn to_gst(&mut self) {
        self.convert_to(TimeScale::GreenwichSidereal);
    }

    /// Convert to local sidereal time
    pub fn to_lst(&mut self) {
        self.convert_to(TimeScale::LocalSidereal);
    }

    /// Convert to `target` using the historical ΔT table
    pub fn convert_to(&mut self, target: TimeScale) {
        self.convert_with(target, &HistoricalDeltaT);
    }

    /// Convert to `target`, taking ΔT from `delta_t`
    ///
    /// Converting to the current scale leaves the value untouched.
    pub fn convert_with(&mut self, target: TimeScale, delta_t: &dyn DeltaT) {
        while self.scale != target {
            let next = self.scale.next_hop(target);
            trace!("{} {} -> {}", self, self.scale, next);
            self.step(next, delta_t);
        }
    }

    /// A converted copy, leaving `self` as it is
    pub fn converted(&self, target: TimeScale) -> Self {
        let mut copy = self.clone();
        copy.convert_to(target);
        copy
    }

    /// Julian date in UT of a TD value
    ///
    /// ΔT is looked up by the UT year, which is only known once ΔT has been
    /// subtracted. The candidate years either side of the TD year are tried in
    /// order and the first whose ΔT lands back in that same year wins, so a UT
    /// value near a year end returns from TD with the ΔT it went out with.
    /// Where ΔT steps down at a year end two UT instants share one TD value
    /// and the earlier is returned.
    fn universal_julian_day(&self, delta_t: &dyn DeltaT) -> f64 {
        let jd = self.julian_day();
        let ut_for = |year: i32| jd - delta_t.delta_t_seconds(year, jd) / DAY_S;
        (self.year - 1..=self.year + 1)
            .map(|year| (year, ut_for(year)))
            .find(|&(year, ut)| calendar_from_julian_day(ut, self.precision).year == year)
            .map(|(_, ut)| ut)
            .unwrap_or_else(|| ut_for(self.year))
    }

    /// Apply the single edge from the current scale to the adjacent `next`
    fn step(&mut self, next: TimeScale, delta_t: &dyn DeltaT) {
        use TimeScale::*;
        let precision = self.precision;
        let longitude = self.observer.longitude();
        match (self.scale, next) {
            (LocalCivil, Universal) | (Universal, LocalCivil) => {
                let offset = round_scaled(self.observer.civil_offset_hours() * HOUR_S, precision);
                let units = if next == Universal {
                    self.time_units() - offset
                } else {
                    self.time_units() + offset
                };
                self.set_time_units(units, true);
            }
            (Universal, GreenwichSidereal) => {
                let gst = sidereal::gst_from_ut(self.midnight_julian_day(), self.decimal_hours());
                self.set_decimal_hours(gst, false);
            }
            (GreenwichSidereal, Universal) => {
                let ut = sidereal::ut_from_gst(self.midnight_julian_day(), self.decimal_hours());
                self.set_decimal_hours(ut, false);
            }
            (GreenwichSidereal, LocalSidereal) => {
                let lst = sidereal::lst_from_gst(self.decimal_hours(), longitude);
                self.set_decimal_hours(lst, false);
            }
            (LocalSidereal, GreenwichSidereal) => {
                let gst = sidereal::gst_from_lst(self.decimal_hours(), longitude);
                self.set_decimal_hours(gst, false);
            }
            (Universal, Dynamical) => {
                let jd = self.julian_day();
                let dt = delta_t.delta_t_seconds(self.year, jd);
                self.set_from_julian_day(jd + dt / DAY_S);
            }
            (Dynamical, Universal) => {
                let jd = self.universal_julian_day(delta_t);
                self.set_from_julian_day(jd);
            }
            (from, to) => unreachable!("{} and {} are not adjacent", from, to),
        }
        self.scale = next;
    }
}

impl PartialEq for AstroDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year
            && self.month == other.month
            && self.day == other.day
            && self.hours == other.hours
            && self.minutes == other.minutes
            && self.seconds == other.seconds
            && self.scale == other.scale
    }
}

impl fmt::Display for AstroDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.precision as usize;
        let width = if precision == 0 { 2 } else { precision + 3 };
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:0width$.precision$} {}",
            self.year,
            self.month,
            self.day,
            self.hours,
            self.minutes,
            self.seconds,
            self.scale,
            width = width,
            precision = precision
        )
    }
}

impl TryFrom<DateTuple> for AstroDateTime {
    type Error = AstroError;

    /// Accept only a fully specified tuple: date, time and scale
    fn try_from(tuple: DateTuple) -> Result<Self> {
        tuple.validate(true)?;
        let scale = tuple.scale().ok_or_else(|| {
            AstroError::InvalidTime("time scale required but missing".to_string())
        })?;
        Self::from_tuple_with_scale(tuple, scale)
    }
}

impl From<DateTime<Utc>> for AstroDateTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_chrono(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use rstest::rstest;

    fn reference_observer() -> Observer {
        Observer::new(5.0, false, -64.0)
    }

    fn reference(scale: TimeScale) -> AstroDateTime {
        let (h, m, s) = match scale {
            TimeScale::LocalCivil => (19, 36, 51.67),
            TimeScale::Universal => (14, 36, 51.67),
            TimeScale::Dynamical => (14, 37, 42.21),
            TimeScale::GreenwichSidereal => (4, 40, 5.23),
            TimeScale::LocalSidereal => (0, 24, 5.23),
        };
        AstroDateTime::new(1980, 4, 22, h, m, s, scale)
            .unwrap()
            .with_observer(reference_observer())
    }

    fn assert_fields(date: &AstroDateTime, expected: (i32, u32, u32, u32, u32, f64)) {
        assert_eq!(
            (date.year(), date.month(), date.day(), date.hours(), date.minutes()),
            (expected.0, expected.1, expected.2, expected.3, expected.4),
            "{}",
            date
        );
        assert_relative_eq!(date.seconds(), expected.5, epsilon = 1e-9);
    }

    #[test]
    fn test_new_rejects_invalid_fields() {
        assert!(matches!(
            AstroDateTime::new(2014, 2, 29, 0, 0, 0.0, TimeScale::Universal),
            Err(AstroError::InvalidDate(_))
        ));
        assert!(matches!(
            AstroDateTime::new(2014, 2, 1, 24, 0, 0.0, TimeScale::Universal),
            Err(AstroError::InvalidTime(_))
        ));
        // 59.999 rounds to 60.00 at two decimals
        assert!(matches!(
            AstroDateTime::new(2014, 2, 1, 0, 0, 59.999, TimeScale::Universal),
            Err(AstroError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_clamping_setters() {
        let mut date = AstroDateTime::from_fields_clamped(2014, 14, 40, 30, 75, 61.0, TimeScale::Universal);
        assert_fields(&date, (2014, 12, 31, 23, 59, 59.99));

        date.set_month(2);
        assert_eq!(date.day(), 28);
        date.set_day(0);
        assert_eq!(date.day(), 1);
        date.set_seconds(-3.0);
        assert_relative_eq!(date.seconds(), 0.0);

        date.set_year(2012);
        date.set_day(29);
        assert_eq!(date.day(), 29);
        date.set_year(2013);
        assert_eq!((date.year(), date.month(), date.day()), (2013, 2, 28));
    }

    #[test]
    fn test_scale_and_observer_setters_do_not_convert() {
        let mut date = reference(TimeScale::Universal);
        date.set_scale(TimeScale::Dynamical);
        assert_eq!(date.scale(), TimeScale::Dynamical);
        assert_fields(&date, (1980, 4, 22, 14, 36, 51.67));

        date.set_observer(Observer::default());
        assert_relative_eq!(date.observer().longitude(), 0.0);
        date.observer_mut().set_longitude(-64.0);
        assert_relative_eq!(date.observer().longitude(), -64.0);
    }

    #[test]
    fn test_text_fields_fall_back_to_defaults() {
        let date = AstroDateTime::from_text_fields(
            ["1980", "April", "22", "14", "x", "51.67"],
            TimeScale::Universal,
        );
        assert_fields(&date, (1980, 1, 22, 14, 0, 51.67));
    }

    #[test]
    fn test_observer_normalizes() {
        let observer = Observer::new(25.0, true, 190.0);
        assert_relative_eq!(observer.zone_correction(), -23.0);
        assert_relative_eq!(observer.longitude(), -170.0);
        assert_relative_eq!(observer.civil_offset_hours(), -22.0);
    }

    #[rstest]
    #[case(180.0, 180.0)]
    #[case(-180.0, -180.0)]
    #[case(540.0, 180.0)]
    #[case(181.0, -179.0)]
    #[case(-181.0, 179.0)]
    fn test_longitude_keeps_both_ends(#[case] input: f64, #[case] expected: f64) {
        let observer = Observer::new(0.0, false, input);
        assert_relative_eq!(observer.longitude(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_reform_gap_dates() {
        assert!(matches!(
            AstroDateTime::new(1582, 10, 10, 0, 0, 0.0, TimeScale::Universal),
            Err(AstroError::InvalidDate(_))
        ));

        let mut date = AstroDateTime::new(1582, 10, 4, 12, 0, 0.0, TimeScale::Universal).unwrap();
        date.add_days(1.0);
        assert_fields(&date, (1582, 10, 15, 12, 0, 0.0));

        date.set_day(10);
        assert_eq!(date.day(), 15);
        let clamped = AstroDateTime::from_fields_clamped(1582, 10, 7, 0, 0, 0.0, TimeScale::Universal);
        assert_eq!(clamped.day(), 15);
    }

    #[test]
    fn test_julian_calendar_dates_are_stable() {
        let date = AstroDateTime::from_julian_day(2_268_992.0, TimeScale::Universal);
        assert_fields(&date, (1500, 2, 29, 12, 0, 0.0));
        assert!(date.day() <= days_in_month(date.year(), date.month()));

        let accepted = AstroDateTime::new(1500, 2, 29, 12, 0, 0.0, TimeScale::Universal).unwrap();
        assert_eq!(accepted, date);

        let mut shifted = accepted.clone();
        shifted.add_days(0.0);
        assert_eq!(shifted, accepted);
        shifted.add_days(1.0);
        assert_fields(&shifted, (1500, 3, 1, 12, 0, 0.0));
    }

    #[rstest]
    #[case(TimeScale::Universal, TimeScale::GreenwichSidereal)]
    #[case(TimeScale::GreenwichSidereal, TimeScale::LocalSidereal)]
    #[case(TimeScale::LocalSidereal, TimeScale::GreenwichSidereal)]
    #[case(TimeScale::GreenwichSidereal, TimeScale::Universal)]
    #[case(TimeScale::Universal, TimeScale::LocalCivil)]
    #[case(TimeScale::LocalCivil, TimeScale::Universal)]
    #[case(TimeScale::Universal, TimeScale::Dynamical)]
    #[case(TimeScale::Dynamical, TimeScale::Universal)]
    fn test_reference_edges(#[case] from: TimeScale, #[case] to: TimeScale) {
        let mut date = reference(from);
        date.convert_to(to);
        assert_eq!(date, reference(to), "{} -> {}", from, to);
    }

    #[rstest]
    #[case(TimeScale::LocalSidereal, TimeScale::LocalCivil)]
    #[case(TimeScale::LocalCivil, TimeScale::LocalSidereal)]
    #[case(TimeScale::Dynamical, TimeScale::LocalSidereal)]
    #[case(TimeScale::LocalCivil, TimeScale::Dynamical)]
    fn test_multi_hop_paths(#[case] from: TimeScale, #[case] to: TimeScale) {
        let mut date = reference(from);
        date.convert_to(to);
        assert_eq!(date, reference(to), "{} -> {}", from, to);
    }

    #[test]
    fn test_conversion_to_same_scale_is_a_no_op() {
        for scale in TimeScale::ALL {
            let mut date = reference(scale);
            date.convert_to(scale);
            assert_eq!(date, reference(scale));
        }
        let mut date = reference(TimeScale::Universal);
        date.to_ut();
        assert_eq!(date, reference(TimeScale::Universal));
    }

    #[test]
    fn test_named_conversions() {
        let mut date = reference(TimeScale::Universal);
        date.to_gst();
        assert_fields(&date, (1980, 4, 22, 4, 40, 5.23));
        date.to_lst();
        assert_fields(&date, (1980, 4, 22, 0, 24, 5.23));
        date.to_lct();
        assert_fields(&date, (1980, 4, 22, 19, 36, 51.67));
        date.to_td();
        assert_fields(&date, (1980, 4, 22, 14, 37, 42.21));
    }

    #[test]
    fn test_local_civil_time_crosses_midnight() {
        let observer = Observer::new(4.0, true, 64.0);
        let mut date = AstroDateTime::new(2012, 7, 23, 3, 37, 0.0, TimeScale::LocalCivil)
            .unwrap()
            .with_observer(observer);
        date.to_ut();
        assert_fields(&date, (2012, 7, 22, 22, 37, 0.0));
        date.to_lct();
        assert_fields(&date, (2012, 7, 23, 3, 37, 0.0));
    }

    #[test]
    fn test_local_civil_time_crosses_year_end() {
        let observer = Observer::new(-8.0, false, -120.0);
        let mut date = AstroDateTime::new(1999, 12, 31, 20, 0, 0.0, TimeScale::LocalCivil)
            .unwrap()
            .with_observer(observer);
        date.to_ut();
        assert_fields(&date, (2000, 1, 1, 4, 0, 0.0));
    }

    #[test]
    fn test_custom_delta_t_provider() {
        let mut date = reference(TimeScale::Universal);
        let fixed = |_year: i32, _jd: f64| 60.0;
        date.convert_with(TimeScale::Dynamical, &fixed);
        assert_fields(&date, (1980, 4, 22, 14, 37, 51.67));
        date.convert_with(TimeScale::Universal, &fixed);
        assert_eq!(date, reference(TimeScale::Universal));
    }

    #[test]
    fn test_dynamical_round_trip_across_year_end() {
        let stepping = |year: i32, _jd: f64| if year >= 2011 { 70.0 } else { 60.0 };
        let ut = AstroDateTime::new(2010, 12, 31, 23, 59, 30.0, TimeScale::Universal).unwrap();
        let mut date = ut.clone();
        date.convert_with(TimeScale::Dynamical, &stepping);
        assert_fields(&date, (2011, 1, 1, 0, 0, 30.0));
        date.convert_with(TimeScale::Universal, &stepping);
        assert_eq!(date, ut);

        let negative = |_year: i32, _jd: f64| -30.0;
        let ut = AstroDateTime::new(2011, 1, 1, 0, 0, 10.0, TimeScale::Universal).unwrap();
        let mut date = ut.clone();
        date.convert_with(TimeScale::Dynamical, &negative);
        assert_fields(&date, (2010, 12, 31, 23, 59, 40.0));
        date.convert_with(TimeScale::Universal, &negative);
        assert_eq!(date, ut);
    }

    #[test]
    fn test_dynamical_overlap_returns_earlier_instant() {
        // ΔT drops by ten seconds at the year end, so 00:00:05 and the
        // previous 23:59:55 both map to 00:00:55 TD
        let falling = |year: i32, _jd: f64| if year >= 2011 { 50.0 } else { 60.0 };
        let mut date = AstroDateTime::new(2011, 1, 1, 0, 0, 55.0, TimeScale::Dynamical).unwrap();
        date.convert_with(TimeScale::Universal, &falling);
        assert_fields(&date, (2010, 12, 31, 23, 59, 55.0));
    }

    #[test]
    fn test_converted_leaves_original_alone() {
        let date = reference(TimeScale::Universal);
        let gst = date.converted(TimeScale::GreenwichSidereal);
        assert_eq!(gst, reference(TimeScale::GreenwichSidereal));
        assert_eq!(date, reference(TimeScale::Universal));
    }

    #[test]
    fn test_julian_day_round_trip() {
        for (fields, expected) in [
            ((1993, 1, 1, 12, 0, 0.0), 2_448_989.0),
            ((2000, 1, 1, 12, 0, 0.0), 2_451_545.0),
        ] {
            let (y, mo, d, h, mi, s) = fields;
            let date = AstroDateTime::new(y, mo, d, h, mi, s, TimeScale::Universal).unwrap();
            assert_relative_eq!(date.julian_day(), expected, epsilon = 1e-9);
            let back = AstroDateTime::from_julian_day(expected, TimeScale::Universal);
            assert_eq!(back, date);
        }
    }

    #[test]
    fn test_calendar_arithmetic() {
        let mut date = AstroDateTime::new(2012, 12, 31, 18, 0, 0.0, TimeScale::Universal).unwrap();
        date.add_days(0.5);
        assert_fields(&date, (2013, 1, 1, 6, 0, 0.0));
        date.add_days(-1.0);
        assert_fields(&date, (2012, 12, 31, 6, 0, 0.0));

        let mut date = AstroDateTime::new(2012, 1, 31, 0, 0, 0.0, TimeScale::Universal).unwrap();
        date.add_months(1);
        assert_eq!((date.year(), date.month(), date.day()), (2012, 2, 29));
        date.add_months(-14);
        assert_eq!((date.year(), date.month(), date.day()), (2010, 12, 29));
        date.add_months(25);
        assert_eq!((date.year(), date.month(), date.day()), (2013, 1, 29));

        let mut leap = AstroDateTime::new(2012, 2, 29, 0, 0, 0.0, TimeScale::Universal).unwrap();
        leap.add_years(1);
        assert_eq!((leap.year(), leap.month(), leap.day()), (2013, 2, 28));
    }

    #[test]
    fn test_tuple_interchange() {
        let tuple: DateTuple = (1980, 4, 22, 14, 36, 51.67, TimeScale::Universal).into();
        let date = AstroDateTime::try_from(tuple).unwrap();
        assert_eq!(date.to_tuple(), tuple);

        let untagged: DateTuple = (1980, 4, 22, 14, 36, 51.67).into();
        assert!(matches!(
            AstroDateTime::try_from(untagged),
            Err(AstroError::InvalidTime(_))
        ));

        let bare: DateTuple = (1980, 4, 22).into();
        assert!(matches!(
            AstroDateTime::try_from(bare),
            Err(AstroError::InvalidDate(_))
        ));
        let midnight = AstroDateTime::from_tuple_with_scale(bare, TimeScale::LocalCivil).unwrap();
        assert_fields(&midnight, (1980, 4, 22, 0, 0, 0.0));
        assert_eq!(midnight.scale(), TimeScale::LocalCivil);
    }

    #[test]
    fn test_from_chrono() {
        let dt = Utc.with_ymd_and_hms(1980, 4, 22, 14, 36, 51).unwrap()
            + chrono::Duration::milliseconds(666);
        let date = AstroDateTime::from(dt);
        assert_eq!(date.scale(), TimeScale::Universal);
        assert_fields(&date, (1980, 4, 22, 14, 36, 51.67));

        let late = Utc.with_ymd_and_hms(2013, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_fields(&AstroDateTime::from_chrono(late), (2014, 1, 1, 0, 0, 0.0));
    }

    #[test]
    fn test_now_is_universal() {
        let now = AstroDateTime::now();
        assert_eq!(now.scale(), TimeScale::Universal);
        assert!(now.year() >= 2024);
    }

    #[test]
    fn test_precision_and_display() {
        let date = reference(TimeScale::Universal);
        assert_eq!(date.to_string(), "1980-04-22 14:36:51.67 UT");
        let coarse = date.clone().with_precision(0);
        assert_eq!(coarse.to_string(), "1980-04-22 14:36:52 UT");
    }

    #[test]
    fn test_time_scale_tags() {
        for scale in TimeScale::ALL {
            assert_eq!(scale.tag().parse::<TimeScale>().unwrap(), scale);
        }
        assert!(matches!(
            "sidereal".parse::<TimeScale>(),
            Err(AstroError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(reference(TimeScale::Universal).day_of_week(), Weekday::Tue);
    }
}
