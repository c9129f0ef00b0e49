//! Coordinate frame tags
//!
//! A [`CoordinateMode`] names the frame a [`Coordinate`](super::Coordinate)
//! lives in. Only the equatorial frame carries extra state: whether its first
//! axis is measured in hours or degrees, and whether it is a right ascension
//! or an hour angle. The textual form joins the parts with `|`, e.g.
//! `equ|hrs|ra` or `gal`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AstroError, Result};

const DELIMITER: char = '|';

/// Reference frame without equatorial details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    Horizon,
    Equatorial,
    Ecliptic,
    Galactic,
}

impl Frame {
    pub fn tag(&self) -> &'static str {
        match self {
            Frame::Horizon => "hor",
            Frame::Equatorial => "equ",
            Frame::Ecliptic => "ecl",
            Frame::Galactic => "gal",
        }
    }
}

impl FromStr for Frame {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "hor" => Ok(Frame::Horizon),
            "equ" => Ok(Frame::Equatorial),
            "ecl" => Ok(Frame::Ecliptic),
            "gal" => Ok(Frame::Galactic),
            other => Err(AstroError::InvalidCoordinateMode(format!(
                "unknown frame '{}'",
                other
            ))),
        }
    }
}

/// Unit of the equatorial first axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisUnit {
    Hours,
    Degrees,
}

impl AxisUnit {
    pub fn tag(&self) -> &'static str {
        match self {
            AxisUnit::Hours => "hrs",
            AxisUnit::Degrees => "deg",
        }
    }
}

impl FromStr for AxisUnit {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "hrs" => Ok(AxisUnit::Hours),
            "deg" => Ok(AxisUnit::Degrees),
            other => Err(AstroError::InvalidCoordinateMode(format!(
                "unknown axis unit '{}'",
                other
            ))),
        }
    }
}

/// Whether the equatorial first axis is right ascension or hour angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquatorialKind {
    RightAscension,
    HourAngle,
}

impl EquatorialKind {
    pub fn tag(&self) -> &'static str {
        match self {
            EquatorialKind::RightAscension => "ra",
            EquatorialKind::HourAngle => "ha",
        }
    }
}

impl FromStr for EquatorialKind {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "ra" => Ok(EquatorialKind::RightAscension),
            "ha" => Ok(EquatorialKind::HourAngle),
            other => Err(AstroError::InvalidCoordinateMode(format!(
                "unknown equatorial kind '{}'",
                other
            ))),
        }
    }
}

/// The frame of a coordinate, with equatorial unit and kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateMode {
    Horizon,
    Equatorial {
        unit: AxisUnit,
        kind: EquatorialKind,
    },
    Ecliptic,
    Galactic,
}

impl CoordinateMode {
    /// Right ascension in hours, the usual catalogue form
    pub const EQUATORIAL_RA_HOURS: CoordinateMode = CoordinateMode::Equatorial {
        unit: AxisUnit::Hours,
        kind: EquatorialKind::RightAscension,
    };

    /// Assemble a mode from its parts
    ///
    /// The equatorial frame needs both `unit` and `kind`; every other frame
    /// must be given neither.
    pub fn make(
        frame: Frame,
        unit: Option<AxisUnit>,
        kind: Option<EquatorialKind>,
    ) -> Result<Self> {
        match (frame, unit, kind) {
            (Frame::Equatorial, Some(unit), Some(kind)) => {
                Ok(CoordinateMode::Equatorial { unit, kind })
            }
            (Frame::Equatorial, _, _) => Err(AstroError::InvalidCoordinateMode(
                "equatorial mode needs both an axis unit and a kind".to_string(),
            )),
            (frame, None, None) => Ok(match frame {
                Frame::Horizon => CoordinateMode::Horizon,
                Frame::Ecliptic => CoordinateMode::Ecliptic,
                _ => CoordinateMode::Galactic,
            }),
            (frame, _, _) => Err(AstroError::InvalidCoordinateMode(format!(
                "frame '{}' takes no axis unit or kind",
                frame.tag()
            ))),
        }
    }

    /// Break the mode back into its parts
    pub fn split(&self) -> (Frame, Option<AxisUnit>, Option<EquatorialKind>) {
        match *self {
            CoordinateMode::Horizon => (Frame::Horizon, None, None),
            CoordinateMode::Equatorial { unit, kind } => {
                (Frame::Equatorial, Some(unit), Some(kind))
            }
            CoordinateMode::Ecliptic => (Frame::Ecliptic, None, None),
            CoordinateMode::Galactic => (Frame::Galactic, None, None),
        }
    }

    pub fn frame(&self) -> Frame {
        self.split().0
    }

    pub fn is_equatorial(&self) -> bool {
        matches!(self, CoordinateMode::Equatorial { .. })
    }

    pub fn is_horizon(&self) -> bool {
        matches!(self, CoordinateMode::Horizon)
    }

    pub fn is_ecliptic(&self) -> bool {
        matches!(self, CoordinateMode::Ecliptic)
    }

    pub fn is_galactic(&self) -> bool {
        matches!(self, CoordinateMode::Galactic)
    }

    /// True for an equatorial mode whose first axis is in hours
    pub fn is_hours(&self) -> bool {
        matches!(
            self,
            CoordinateMode::Equatorial {
                unit: AxisUnit::Hours,
                ..
            }
        )
    }

    /// True for an equatorial mode holding an hour angle
    pub fn is_hour_angle(&self) -> bool {
        matches!(
            self,
            CoordinateMode::Equatorial {
                kind: EquatorialKind::HourAngle,
                ..
            }
        )
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.split() {
            (frame, Some(unit), Some(kind)) => write!(
                f,
                "{}{}{}{}{}",
                frame.tag(),
                DELIMITER,
                unit.tag(),
                DELIMITER,
                kind.tag()
            ),
            (frame, _, _) => write!(f, "{}", frame.tag()),
        }
    }
}

impl FromStr for CoordinateMode {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(DELIMITER).collect();
        match parts.as_slice() {
            [frame] => CoordinateMode::make(frame.parse()?, None, None),
            [frame, unit, kind] => {
                CoordinateMode::make(frame.parse()?, Some(unit.parse()?), Some(kind.parse()?))
            }
            _ => Err(AstroError::InvalidCoordinateMode(format!(
                "cannot parse mode '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hor", CoordinateMode::Horizon)]
    #[case("ecl", CoordinateMode::Ecliptic)]
    #[case("gal", CoordinateMode::Galactic)]
    #[case("equ|hrs|ra", CoordinateMode::EQUATORIAL_RA_HOURS)]
    #[case(
        "equ|deg|ha",
        CoordinateMode::Equatorial { unit: AxisUnit::Degrees, kind: EquatorialKind::HourAngle }
    )]
    fn test_tag_round_trip(#[case] tag: &str, #[case] mode: CoordinateMode) {
        assert_eq!(tag.parse::<CoordinateMode>().unwrap(), mode);
        assert_eq!(mode.to_string(), tag);
    }

    #[rstest]
    #[case("equ")]
    #[case("equ|hrs")]
    #[case("hor|deg|ra")]
    #[case("gal|")]
    #[case("sky")]
    #[case("equ|rad|ra")]
    #[case("equ|hrs|dec")]
    fn test_rejects_bad_tags(#[case] tag: &str) {
        assert!(matches!(
            tag.parse::<CoordinateMode>(),
            Err(AstroError::InvalidCoordinateMode(_))
        ));
    }

    #[test]
    fn test_make_and_split() {
        let mode = CoordinateMode::make(
            Frame::Equatorial,
            Some(AxisUnit::Hours),
            Some(EquatorialKind::HourAngle),
        )
        .unwrap();
        assert!(mode.is_equatorial() && mode.is_hours() && mode.is_hour_angle());
        assert_eq!(
            mode.split(),
            (
                Frame::Equatorial,
                Some(AxisUnit::Hours),
                Some(EquatorialKind::HourAngle)
            )
        );

        assert!(CoordinateMode::make(Frame::Equatorial, Some(AxisUnit::Hours), None).is_err());
        assert!(CoordinateMode::make(Frame::Galactic, None, Some(EquatorialKind::RightAscension)).is_err());
        assert_eq!(
            CoordinateMode::make(Frame::Horizon, None, None).unwrap().frame(),
            Frame::Horizon
        );
    }
}
