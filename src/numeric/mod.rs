//! Numeric helpers shared by the time and coordinate engines
//!
//! Everything that produces a seconds value goes through [`round_scaled`] so
//! that rounding happens once, half-up, on the scaled integer.

use std::str::FromStr;

/// Default number of decimal places kept on seconds values
pub const DEFAULT_PRECISION: u32 = 2;

/// Largest supported seconds precision
pub const MAX_PRECISION: u32 = 9;

/// Number of sub-second units per second at the given precision
pub fn units_per_second(precision: u32) -> i64 {
    10_i64.pow(precision.min(MAX_PRECISION))
}

/// Round `value` scaled by `10^precision` half-up and return the scaled integer
///
/// `round_scaled(2.5, 0)` is `3`. Negative halves round toward positive
/// infinity, so `round_scaled(-2.5, 0)` is `-2`.
pub fn round_scaled(value: f64, precision: u32) -> i64 {
    (value * units_per_second(precision) as f64 + 0.5).floor() as i64
}

/// Round `value` half-up to `precision` decimal places
pub fn fix(value: f64, precision: u32) -> f64 {
    round_scaled(value, precision) as f64 / units_per_second(precision) as f64
}

/// Wrap `value` into `[0, range)`
pub fn wrap(value: f64, range: f64) -> f64 {
    let wrapped = value.rem_euclid(range);
    // rem_euclid can land on `range` itself for tiny negative inputs
    if wrapped >= range {
        wrapped - range
    } else {
        wrapped
    }
}

/// Wrap an angle into `[0, 360)` degrees
pub fn normalize_degrees(degrees: f64) -> f64 {
    wrap(degrees, 360.0)
}

/// Wrap a time or hour angle into `[0, 24)` hours
pub fn normalize_hours(hours: f64) -> f64 {
    wrap(hours, 24.0)
}

/// Wrap `value` into `[-half_range, half_range)`
pub fn wrap_signed(value: f64, half_range: f64) -> f64 {
    wrap(value + half_range, 2.0 * half_range) - half_range
}

/// Parse `text` as a number, falling back to `default` when it is not numeric
///
/// This is the permissive coercion used by field setters that accept free
/// text; strict callers should use `str::parse` and handle the error.
pub fn parse_or<T: FromStr>(text: &str, default: T) -> T {
    text.trim().parse().unwrap_or(default)
}
