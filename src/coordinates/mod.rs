//! # Celestial Coordinates
//!
//! A [`Coordinate`] is a pair of sexagesimal angles tagged with the frame they
//! belong to. Conversions between the horizon, equatorial, ecliptic and
//! galactic frames return a new value; the receiver and its attached date are
//! left untouched.
//!
//! Some edges need collaborators:
//! - horizon conversions need the observer's latitude
//! - right ascension to hour angle (and back) needs a date to take the local
//!   sidereal time from
//! - ecliptic conversions need an obliquity, from either an explicit epoch or
//!   the attached date
//!
//! ```rust
//! use astrocalc::coordinates::{Coordinate, CoordinateMode, Sexagesimal};
//!
//! let ecliptic = Coordinate::new(
//!     Sexagesimal::new(139, 41, 10.0).unwrap(),
//!     Sexagesimal::new(4, 52, 31.0).unwrap(),
//!     CoordinateMode::Ecliptic,
//! )
//! .unwrap();
//! let equatorial = ecliptic.to_equatorial(Some(1980.0)).unwrap();
//! assert_eq!(equatorial.to_string(), "09h34m53.58s +19d32m14.18s");
//! ```

pub mod mode;
pub mod sexagesimal;
pub mod transforms;

use std::fmt;

use log::trace;

use crate::constants::DEG_PER_HOUR;
use crate::numeric::{normalize_degrees, normalize_hours, wrap_signed};
use crate::nutationlib::mean_obliquity;
use crate::time::{julian_epoch, AstroDateTime, TimeScale};
use crate::{AstroError, Result};

pub use mode::{AxisUnit, CoordinateMode, EquatorialKind, Frame};
pub use sexagesimal::{degrees_from_dms, dms_from_degrees, Sexagesimal};

/// Seconds precision kept on computed coordinates
///
/// Display still rounds to two decimals; the extra digits keep chains of
/// conversions from accumulating rounding error.
pub const COORDINATE_PRECISION: u32 = 6;

/// Seconds precision of reported angular separations
const SEPARATION_PRECISION: u32 = 2;

/// A position on the sky in one of four frames
#[derive(Debug, Clone)]
pub struct Coordinate {
    first: Sexagesimal,
    second: Sexagesimal,
    mode: CoordinateMode,
    date: Option<AstroDateTime>,
    latitude: Option<f64>,
}

impl Coordinate {
    /// Create a coordinate, rejecting axes out of range for `mode`
    ///
    /// An equatorial first axis in hours must lie in (-24, 24]; every other
    /// axis must have a magnitude of at most 360 degrees.
    pub fn new(first: Sexagesimal, second: Sexagesimal, mode: CoordinateMode) -> Result<Self> {
        let first_value = first.to_degrees();
        if mode.is_hours() {
            if first_value <= -24.0 || first_value > 24.0 {
                return Err(AstroError::InvalidAngle(format!(
                    "{} is not in (-24h, 24h]",
                    first.format_with_unit('h')
                )));
            }
        } else if first_value.abs() > 360.0 {
            return Err(AstroError::InvalidAngle(format!(
                "{} is not in [-360d, 360d]",
                first
            )));
        }
        if second.to_degrees().abs() > 360.0 {
            return Err(AstroError::InvalidAngle(format!(
                "{} is not in [-360d, 360d]",
                second
            )));
        }
        Ok(Self {
            first,
            second,
            mode,
            date: None,
            latitude: None,
        })
    }

    /// Create a coordinate from decimal values in the axis units of `mode`
    pub fn from_degrees(first: f64, second: f64, mode: CoordinateMode) -> Result<Self> {
        Self::new(
            dms_from_degrees(first, COORDINATE_PRECISION),
            dms_from_degrees(second, COORDINATE_PRECISION),
            mode,
        )
    }

    /// Parse two whitespace separated angles, e.g. `05h14m32.3s -08d12m05.9s`
    pub fn parse(text: &str, mode: CoordinateMode) -> Result<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        match tokens.as_slice() {
            [first, second] => Self::new(first.parse()?, second.parse()?, mode),
            _ => Err(AstroError::InvalidAngle(format!(
                "expected two angles, got '{}'",
                text
            ))),
        }
    }

    /// Attach a date, used for sidereal time and obliquity
    pub fn with_date(mut self, date: AstroDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Attach the observer's latitude, clamped to [-90, 90]
    pub fn with_latitude(mut self, latitude: f64) -> Self {
        self.set_latitude(latitude);
        self
    }

    pub fn set_date(&mut self, date: AstroDateTime) {
        self.date = Some(date);
    }

    pub fn set_latitude(&mut self, latitude: f64) {
        self.latitude = Some(latitude.clamp(-90.0, 90.0));
    }

    pub fn first(&self) -> Sexagesimal {
        self.first
    }

    pub fn second(&self) -> Sexagesimal {
        self.second
    }

    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    pub fn date(&self) -> Option<&AstroDateTime> {
        self.date.as_ref()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    /// Decimal value of the first axis, in hours for equatorial hours modes
    pub fn first_degrees(&self) -> f64 {
        self.first.to_degrees()
    }

    /// Decimal value of the second axis
    pub fn second_degrees(&self) -> f64 {
        self.second.to_degrees()
    }

    /// Shift the first axis, wrapping into [0, 24) hours or [0, 360) degrees
    pub fn add_to_first_axis(&mut self, delta: f64) {
        let value = self.first_degrees() + delta;
        let value = if self.mode.is_hours() {
            normalize_hours(value)
        } else {
            normalize_degrees(value)
        };
        self.first = dms_from_degrees(value, COORDINATE_PRECISION);
    }

    /// Shift the second axis, wrapping into [-180, 180) degrees
    pub fn add_to_second_axis(&mut self, delta: f64) {
        let value = wrap_signed(self.second_degrees() + delta, 180.0);
        self.second = dms_from_degrees(value, COORDINATE_PRECISION);
    }

    /// Decimal degrees form: `083.634583 -08.201639`
    pub fn format_decimal(&self) -> String {
        format!("{:09.6} {:09.6}", self.first_degrees(), self.second_degrees())
    }

    /// Express an equatorial first axis in degrees
    pub fn to_degrees(&self) -> Result<Self> {
        match self.mode {
            CoordinateMode::Equatorial {
                unit: AxisUnit::Hours,
                kind,
            } => self.rebuild(
                self.first_degrees() * DEG_PER_HOUR,
                self.second_degrees(),
                CoordinateMode::Equatorial {
                    unit: AxisUnit::Degrees,
                    kind,
                },
            ),
            CoordinateMode::Equatorial { .. } => Ok(self.clone()),
            _ => Err(self.needs_equatorial("to_degrees")),
        }
    }

    /// Express an equatorial first axis in hours
    pub fn to_hours(&self) -> Result<Self> {
        match self.mode {
            CoordinateMode::Equatorial {
                unit: AxisUnit::Degrees,
                kind,
            } => self.rebuild(
                self.first_degrees() / DEG_PER_HOUR,
                self.second_degrees(),
                CoordinateMode::Equatorial {
                    unit: AxisUnit::Hours,
                    kind,
                },
            ),
            CoordinateMode::Equatorial { .. } => Ok(self.clone()),
            _ => Err(self.needs_equatorial("to_hours")),
        }
    }

    /// Convert right ascension to hour angle at the attached date
    pub fn to_hour_angle(&self) -> Result<Self> {
        self.swap_equatorial_kind(EquatorialKind::HourAngle)
    }

    /// Convert hour angle to right ascension at the attached date
    pub fn to_right_ascension(&self) -> Result<Self> {
        self.swap_equatorial_kind(EquatorialKind::RightAscension)
    }

    /// Convert to the equatorial frame
    ///
    /// `epoch` selects the obliquity used from the ecliptic frame; without one
    /// the attached date is used. From the horizon frame the result is an
    /// hour angle, from every other frame a right ascension, both in hours.
    pub fn to_equatorial(&self, epoch: Option<f64>) -> Result<Self> {
        match self.mode {
            CoordinateMode::Equatorial { .. } => Ok(self.clone()),
            CoordinateMode::Ecliptic => {
                let obliquity = self.obliquity(epoch)?;
                let (ra, dec) = transforms::ecliptic_to_equatorial(
                    self.first_degrees(),
                    self.second_degrees(),
                    obliquity,
                );
                self.rebuild(ra / DEG_PER_HOUR, dec, CoordinateMode::EQUATORIAL_RA_HOURS)
            }
            CoordinateMode::Galactic => {
                let (ra, dec) =
                    transforms::galactic_to_equatorial(self.first_degrees(), self.second_degrees());
                self.rebuild(ra / DEG_PER_HOUR, dec, CoordinateMode::EQUATORIAL_RA_HOURS)
            }
            CoordinateMode::Horizon => {
                let latitude = self.require_latitude("to_equatorial")?;
                let (hour_angle, dec) = transforms::horizon_to_equatorial(
                    self.first_degrees(),
                    self.second_degrees(),
                    latitude,
                );
                self.rebuild(
                    hour_angle / DEG_PER_HOUR,
                    dec,
                    CoordinateMode::Equatorial {
                        unit: AxisUnit::Hours,
                        kind: EquatorialKind::HourAngle,
                    },
                )
            }
        }
    }

    /// Convert to the ecliptic frame, with obliquity from `epoch` or the date
    pub fn to_ecliptic(&self, epoch: Option<f64>) -> Result<Self> {
        if self.mode.is_ecliptic() {
            return Ok(self.clone());
        }
        let (ra, dec) = self.right_ascension_degrees(epoch)?;
        let obliquity = self.obliquity(epoch)?;
        let (lon, lat) = transforms::equatorial_to_ecliptic(ra, dec, obliquity);
        self.rebuild(lon, lat, CoordinateMode::Ecliptic)
    }

    /// Convert to the galactic frame
    pub fn to_galactic(&self) -> Result<Self> {
        if self.mode.is_galactic() {
            return Ok(self.clone());
        }
        let (ra, dec) = self.right_ascension_degrees(None)?;
        let (l, b) = transforms::equatorial_to_galactic(ra, dec);
        self.rebuild(l, b, CoordinateMode::Galactic)
    }

    /// Convert to altitude and azimuth at the attached latitude
    pub fn to_horizon(&self) -> Result<Self> {
        if self.mode.is_horizon() {
            return Ok(self.clone());
        }
        let latitude = self.require_latitude("to_horizon")?;
        let hour_angle = self.to_equatorial(None)?.to_hour_angle()?.to_degrees()?;
        let (alt, az) = transforms::equatorial_to_horizon(
            hour_angle.first_degrees(),
            hour_angle.second_degrees(),
            latitude,
        );
        self.rebuild(alt, az, CoordinateMode::Horizon)
    }

    /// Great-circle distance to `other`, which must share this mode
    ///
    /// Only equatorial and ecliptic positions can be compared.
    pub fn angular_separation(&self, other: &Coordinate) -> Result<Sexagesimal> {
        if self.mode != other.mode || !(self.mode.is_equatorial() || self.mode.is_ecliptic()) {
            return Err(AstroError::InvalidOperationForFrame(format!(
                "angular separation needs two equatorial or ecliptic positions in the same mode, got {} and {}",
                self.mode, other.mode
            )));
        }
        let scale = if self.mode.is_hours() { DEG_PER_HOUR } else { 1.0 };
        let separation = transforms::angular_separation(
            self.first_degrees() * scale,
            self.second_degrees(),
            other.first_degrees() * scale,
            other.second_degrees(),
        );
        Ok(dms_from_degrees(separation, SEPARATION_PRECISION))
    }

    /// Equatorial right ascension and declination, both in degrees
    fn right_ascension_degrees(&self, epoch: Option<f64>) -> Result<(f64, f64)> {
        let equatorial = self
            .to_equatorial(epoch)?
            .to_right_ascension()?
            .to_degrees()?;
        Ok((equatorial.first_degrees(), equatorial.second_degrees()))
    }

    fn swap_equatorial_kind(&self, target: EquatorialKind) -> Result<Self> {
        let (unit, kind) = match self.mode {
            CoordinateMode::Equatorial { unit, kind } => (unit, kind),
            _ => return Err(self.needs_equatorial("hour angle conversion")),
        };
        if kind == target {
            return Ok(self.clone());
        }

        let lst = self.local_sidereal_hours()?;
        let scale = match unit {
            AxisUnit::Hours => 1.0,
            AxisUnit::Degrees => DEG_PER_HOUR,
        };
        let swapped = normalize_hours(lst - self.first_degrees() / scale) * scale;
        self.rebuild(
            swapped,
            self.second_degrees(),
            CoordinateMode::Equatorial { unit, kind: target },
        )
    }

    /// Local sidereal time of the attached date, computed on a copy
    fn local_sidereal_hours(&self) -> Result<f64> {
        let date = self.date.as_ref().ok_or_else(|| {
            AstroError::InvalidOperationForFrame(
                "right ascension and hour angle conversion needs a date".to_string(),
            )
        })?;
        Ok(date.converted(TimeScale::LocalSidereal).decimal_hours())
    }

    /// Mean obliquity at `epoch`, or at the attached date taken as TD
    fn obliquity(&self, epoch: Option<f64>) -> Result<f64> {
        let jde = match (epoch, self.date.as_ref()) {
            (Some(epoch), _) => julian_epoch(epoch),
            (None, Some(date)) => date.converted(TimeScale::Dynamical).julian_day(),
            (None, None) => {
                return Err(AstroError::InvalidOperationForFrame(
                    "ecliptic conversion needs an epoch or a date".to_string(),
                ))
            }
        };
        Ok(mean_obliquity(jde))
    }

    fn require_latitude(&self, operation: &str) -> Result<f64> {
        self.latitude.ok_or_else(|| {
            AstroError::InvalidOperationForFrame(format!("{} needs a latitude", operation))
        })
    }

    fn needs_equatorial(&self, operation: &str) -> AstroError {
        AstroError::InvalidOperationForFrame(format!(
            "{} needs an equatorial coordinate, got {}",
            operation, self.mode
        ))
    }

    /// New coordinate in `mode`, carrying over the date and latitude
    fn rebuild(&self, first: f64, second: f64, mode: CoordinateMode) -> Result<Self> {
        let mut coordinate = Self::from_degrees(first, second, mode)?;
        trace!("{} {} -> {} {}", self, self.mode, coordinate, mode);
        coordinate.date = self.date.clone();
        coordinate.latitude = self.latitude;
        Ok(coordinate)
    }
}

impl fmt::Display for Coordinate {
    /// Sexagesimal form, e.g. `05h14m32.30s -08d12m05.90s`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.mode.is_hours() { 'h' } else { 'd' };
        let second = self.second.format_with_unit('d');
        let sign = if second.starts_with('-') { "" } else { "+" };
        write!(
            f,
            "{} {}{}",
            self.first.format_with_unit(unit),
            sign,
            second
        )
    }
}
