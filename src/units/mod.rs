//! Distance units
//!
//! Terrestrial (feet, metres, kilometres, statute and nautical miles) and
//! astronomical (AU, light years, parsecs) lengths, converted through metres.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AstroError, Result};

/// Metres in one international foot
pub const FOOT_M: f64 = 0.3048;
/// Metres in one statute mile
pub const STATUTE_MILE_M: f64 = 1_609.344;
/// Metres in one nautical mile
pub const NAUTICAL_MILE_M: f64 = 1_852.0;
/// Kilometres in one astronomical unit
pub const ASTRONOMICAL_UNIT_KM: f64 = 149_597_871.0;
/// Kilometres in one light year
pub const LIGHT_YEAR_KM: f64 = 9_460_730_472_580.8;
/// Kilometres in one parsec
pub const PARSEC_KM: f64 = 30_856_775_670_468.0;

/// A unit of length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    Foot,
    Meter,
    Kilometer,
    StatuteMile,
    NauticalMile,
    AstronomicalUnit,
    LightYear,
    Parsec,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 8] = [
        DistanceUnit::Foot,
        DistanceUnit::Meter,
        DistanceUnit::Kilometer,
        DistanceUnit::StatuteMile,
        DistanceUnit::NauticalMile,
        DistanceUnit::AstronomicalUnit,
        DistanceUnit::LightYear,
        DistanceUnit::Parsec,
    ];

    /// Length of one unit in metres
    pub fn meters(&self) -> f64 {
        match self {
            DistanceUnit::Foot => FOOT_M,
            DistanceUnit::Meter => 1.0,
            DistanceUnit::Kilometer => 1_000.0,
            DistanceUnit::StatuteMile => STATUTE_MILE_M,
            DistanceUnit::NauticalMile => NAUTICAL_MILE_M,
            DistanceUnit::AstronomicalUnit => ASTRONOMICAL_UNIT_KM * 1_000.0,
            DistanceUnit::LightYear => LIGHT_YEAR_KM * 1_000.0,
            DistanceUnit::Parsec => PARSEC_KM * 1_000.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Foot => "ft",
            DistanceUnit::Meter => "m",
            DistanceUnit::Kilometer => "km",
            DistanceUnit::StatuteMile => "mi",
            DistanceUnit::NauticalMile => "nmi",
            DistanceUnit::AstronomicalUnit => "au",
            DistanceUnit::LightYear => "ly",
            DistanceUnit::Parsec => "pc",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for DistanceUnit {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        let symbol = s.trim().to_lowercase();
        DistanceUnit::ALL
            .iter()
            .copied()
            .find(|unit| unit.symbol() == symbol)
            .ok_or_else(|| AstroError::InvalidUnit(s.to_string()))
    }
}

/// Convert `value` from one unit of length to another
pub fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    if from == to {
        value
    } else {
        value * from.meters() / to.meters()
    }
}
