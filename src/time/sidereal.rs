//! Sidereal time formulas
//!
//! All values are decimal hours. The Greenwich mean sidereal time at 0h UT
//! uses the IAU polynomial in Julian centuries since J2000.

use crate::constants::{
    DEG_PER_HOUR, GST_T0_A, GST_T0_B, GST_T0_C, J2000, JULIAN_CENTURY_DAYS, SIDEREAL_RATE,
};
use crate::numeric::normalize_hours;

/// Greenwich mean sidereal time at 0h UT on the date whose midnight is `jd0`
pub fn gst_at_midnight(jd0: f64) -> f64 {
    let t = (jd0 - J2000) / JULIAN_CENTURY_DAYS;
    normalize_hours(GST_T0_A + t * (GST_T0_B + t * GST_T0_C))
}

/// Greenwich sidereal time for `ut` hours after midnight `jd0`
pub fn gst_from_ut(jd0: f64, ut: f64) -> f64 {
    normalize_hours(gst_at_midnight(jd0) + ut * SIDEREAL_RATE)
}

/// Universal time on the date `jd0` at which Greenwich sidereal time is `gst`
///
/// A sidereal day is about four minutes shorter than a solar one, so GST
/// values in the first few minutes after midnight map to two UT instants on
/// the same date; the earlier one is returned.
pub fn ut_from_gst(jd0: f64, gst: f64) -> f64 {
    normalize_hours(gst - gst_at_midnight(jd0)) / SIDEREAL_RATE
}

/// Local sidereal time at `longitude` degrees (east positive)
pub fn lst_from_gst(gst: f64, longitude: f64) -> f64 {
    normalize_hours(gst + longitude / DEG_PER_HOUR)
}

/// Greenwich sidereal time from local sidereal time at `longitude` degrees
pub fn gst_from_lst(lst: f64, longitude: f64) -> f64 {
    normalize_hours(lst - longitude / DEG_PER_HOUR)
}
