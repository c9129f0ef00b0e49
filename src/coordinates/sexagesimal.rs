//! # Sexagesimal Angles
//!
//! Degrees (or hours), minutes and seconds, with the sign carried on the
//! degree component only. Minutes and seconds are always non-negative
//! magnitudes, so `-8° 12' 5.9"` is `-(8 + 12/60 + 5.9/3600)`.
//!
//! Values whose magnitude is below one degree cannot carry their sign on a
//! zero degree component; for those an explicit negative flag is kept, so
//! `-0° 30'` survives a round trip through decimal degrees.
//!
//! ```rust
//! use astrocalc::coordinates::sexagesimal::Sexagesimal;
//!
//! let dec = Sexagesimal::new(-8, 12, 5.9).unwrap();
//! let back = Sexagesimal::from_degrees(dec.to_degrees());
//! assert_eq!(back, dec);
//! ```

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::numeric::{round_scaled, units_per_second, DEFAULT_PRECISION};
use crate::{AstroError, Result};

lazy_static! {
    static ref SEXAGESIMAL: Regex = Regex::new(
        r#"^\s*([+-])?\s*(\d+)\s*[dh°:]\s*(\d+)\s*[m':′]\s*(\d+(?:\.\d*)?)\s*(?:s|"|″)?\s*$"#
    )
    .unwrap();
}

/// An angle split into degree, minute and second components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sexagesimal {
    negative: bool,
    degrees: u32,
    minutes: u32,
    seconds: f64,
}

impl Sexagesimal {
    /// Build from components, with the sign taken from `degrees`
    pub fn new(degrees: i32, minutes: u32, seconds: f64) -> Result<Self> {
        Self::with_sign(degrees < 0, degrees.unsigned_abs(), minutes, seconds)
    }

    /// Build from an explicit sign and unsigned components
    pub fn with_sign(negative: bool, degrees: u32, minutes: u32, seconds: f64) -> Result<Self> {
        if minutes > 59 {
            return Err(AstroError::InvalidAngle(format!(
                "minutes {} is not in 0-59",
                minutes
            )));
        }
        if !(0.0..60.0).contains(&seconds) {
            return Err(AstroError::InvalidAngle(format!(
                "seconds {} is not in [0, 60)",
                seconds
            )));
        }
        let is_zero = degrees == 0 && minutes == 0 && seconds == 0.0;
        Ok(Self {
            negative: negative && !is_zero,
            degrees,
            minutes,
            seconds,
        })
    }

    /// Split decimal degrees, rounding seconds to two decimals
    pub fn from_degrees(value: f64) -> Self {
        dms_from_degrees(value, DEFAULT_PRECISION)
    }

    /// Decimal value of the angle
    pub fn to_degrees(&self) -> f64 {
        let magnitude = self.degrees as f64 + (self.minutes as f64 + self.seconds / 60.0) / 60.0;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Signed degree (or hour) component; zero for magnitudes below one
    pub fn degrees(&self) -> i32 {
        if self.negative {
            -(self.degrees as i32)
        } else {
            self.degrees as i32
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Format with `unit` after the degree component, e.g. `05h14m32.30s`
    ///
    /// Seconds are shown to two decimals, re-rounded so that a value held
    /// at higher precision never prints as `60.00`.
    pub fn format_with_unit(&self, unit: char) -> String {
        let shown = dms_from_degrees(self.to_degrees(), DEFAULT_PRECISION);
        format!(
            "{}{:02}{}{:02}m{:05.2}s",
            if shown.negative { "-" } else { "" },
            shown.degrees,
            unit,
            shown.minutes,
            shown.seconds
        )
    }
}

/// Decimal value of degree, minute and second components
///
/// The sign comes from `degrees` alone.
pub fn degrees_from_dms(degrees: i32, minutes: u32, seconds: f64) -> f64 {
    let magnitude =
        degrees.unsigned_abs() as f64 + (minutes as f64 + seconds / 60.0) / 60.0;
    if degrees < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Split decimal degrees into components with seconds rounded to `precision`
///
/// Rounding is applied once to the whole magnitude, so a value that rounds
/// up to a full minute or degree carries instead of producing 60 seconds.
pub fn dms_from_degrees(value: f64, precision: u32) -> Sexagesimal {
    let per_second = units_per_second(precision);
    let units = round_scaled(value.abs() * 3600.0, precision);
    let per_minute = 60 * per_second;
    let per_degree = 60 * per_minute;

    let degrees = units / per_degree;
    let minutes = (units % per_degree) / per_minute;
    let seconds = (units % per_minute) as f64 / per_second as f64;

    Sexagesimal {
        negative: value < 0.0 && units != 0,
        degrees: degrees as u32,
        minutes: minutes as u32,
        seconds,
    }
}

impl fmt::Display for Sexagesimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_unit('d'))
    }
}

impl FromStr for Sexagesimal {
    type Err = AstroError;

    /// Parse `-08d12m05.90s`, `05h14m32.3s`, `12°34'56.7"`, `12:34:56` or
    /// plain decimal degrees
    fn from_str(s: &str) -> Result<Self> {
        if let Some(caps) = SEXAGESIMAL.captures(s) {
            let negative = caps.get(1).map_or(false, |sign| sign.as_str() == "-");
            let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());
            let degrees = field(2)
                .parse::<u32>()
                .map_err(|e| AstroError::InvalidAngle(format!("'{}': {}", s, e)))?;
            let minutes = field(3)
                .parse::<u32>()
                .map_err(|e| AstroError::InvalidAngle(format!("'{}': {}", s, e)))?;
            let seconds = field(4)
                .parse::<f64>()
                .map_err(|e| AstroError::InvalidAngle(format!("'{}': {}", s, e)))?;
            return Sexagesimal::with_sign(negative, degrees, minutes, seconds);
        }

        s.trim()
            .parse::<f64>()
            .map(Sexagesimal::from_degrees)
            .map_err(|_| AstroError::InvalidAngle(format!("cannot parse '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_degrees_from_dms() {
        assert_relative_eq!(degrees_from_dms(-8, 12, 5.9), -8.201_638_888_888_889, epsilon = 1e-12);
        assert_relative_eq!(degrees_from_dms(139, 41, 10.0), 139.686_111_111_111_1, epsilon = 1e-12);
        assert_relative_eq!(degrees_from_dms(0, 30, 0.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_dms_from_negative_degrees() {
        let dms = dms_from_degrees(-8.201_638_888_888_889, 2);
        assert_eq!((dms.degrees(), dms.minutes()), (-8, 12));
        assert_relative_eq!(dms.seconds(), 5.9, epsilon = 1e-9);
        assert!(dms.is_negative());
    }

    #[test]
    fn test_sign_below_one_degree_is_kept() {
        let dms = dms_from_degrees(-0.5, 2);
        assert_eq!((dms.degrees(), dms.minutes()), (0, 30));
        assert!(dms.is_negative());
        assert_relative_eq!(dms.to_degrees(), -0.5);
        assert_eq!(dms.to_string(), "-00d30m00.00s");
    }

    #[test]
    fn test_rounding_carries_into_minutes() {
        // 0.99999 degrees is 59' 59.964", which rounds up to a full degree
        let dms = dms_from_degrees(0.99999, 1);
        assert_eq!((dms.degrees(), dms.minutes()), (1, 0));
        assert_relative_eq!(dms.seconds(), 0.0);
    }

    #[test]
    fn test_negative_zero_collapses() {
        let dms = dms_from_degrees(-1e-9, 2);
        assert!(!dms.is_negative());
        assert_eq!(Sexagesimal::with_sign(true, 0, 0, 0.0).unwrap(), dms);
    }

    #[test]
    fn test_rejects_bad_components() {
        assert!(Sexagesimal::new(10, 60, 0.0).is_err());
        assert!(Sexagesimal::new(10, 0, 60.0).is_err());
        assert!(Sexagesimal::new(10, 0, -1.0).is_err());
    }

    #[test]
    fn test_round_trip_is_exact_at_precision() {
        let mut rng = StdRng::seed_from_u64(1980);
        for _ in 0..1000 {
            let degrees = rng.gen_range(-359..=359);
            let minutes = rng.gen_range(0..60);
            let centiseconds: u32 = rng.gen_range(0..6000);
            let original = Sexagesimal::new(degrees, minutes, centiseconds as f64 / 100.0).unwrap();
            let back = Sexagesimal::from_degrees(original.to_degrees());
            assert_eq!(back, original);
        }
    }

    #[test]
    fn test_parse_formats() {
        let dec: Sexagesimal = "-08d12m05.90s".parse().unwrap();
        assert_eq!(dec, Sexagesimal::new(-8, 12, 5.9).unwrap());

        let ra: Sexagesimal = "05h14m32.3s".parse().unwrap();
        assert_eq!(ra, Sexagesimal::new(5, 14, 32.3).unwrap());

        let symbols: Sexagesimal = "139°41'10\"".parse().unwrap();
        assert_eq!(symbols, Sexagesimal::new(139, 41, 10.0).unwrap());

        let colons: Sexagesimal = "-0:30:00".parse().unwrap();
        assert!(colons.is_negative());
        assert_relative_eq!(colons.to_degrees(), -0.5);

        let decimal: Sexagesimal = "23.5".parse().unwrap();
        assert_eq!(decimal, Sexagesimal::new(23, 30, 0.0).unwrap());

        assert!(matches!(
            "north".parse::<Sexagesimal>(),
            Err(AstroError::InvalidAngle(_))
        ));
        assert!("10d61m00s".parse::<Sexagesimal>().is_err());
    }

    #[test]
    fn test_format_with_unit() {
        let ra = Sexagesimal::new(5, 14, 32.3).unwrap();
        assert_eq!(ra.format_with_unit('h'), "05h14m32.30s");

        let fine = dms_from_degrees(degrees_from_dms(1, 59, 59.999), 6);
        assert_eq!(fine.to_string(), "02d00m00.00s");
    }
}
