//! Heliocentric planetary positions from VSOP87-style series
//!
//! Each of the longitude, latitude and radius is a short list of series
//! groups; group `i` is multiplied by `T^i`, where `T` is Julian millennia
//! since J2000, and every term contributes `a * cos(b + c * T)`.
//!
//! Coefficient tables are data and are supplied by the caller, either
//! directly to [`evaluate`] or through an [`Ephemeris`] registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{J2000, JULIAN_CENTURY_DAYS, JULIAN_MILLENNIUM_DAYS};
use crate::numeric::normalize_degrees;

/// Error type for planetary calculations
#[derive(Debug, Error)]
pub enum PlanetError {
    #[error("Planet not found: {0}")]
    NotFound(String),

    #[error("Data error: {0}")]
    DataError(String),
}

/// Enum representing the major solar system bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }
}

/// One periodic term `a * cos(b + c * T)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesTerm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl SeriesTerm {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    fn value(&self, t: f64) -> f64 {
        self.a * (self.b + self.c * t).cos()
    }
}

/// Series groups for the three heliocentric coordinates
///
/// `l[i]`, `b[i]` and `r[i]` hold the terms multiplied by `T^i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesTables {
    pub l: Vec<Vec<SeriesTerm>>,
    pub b: Vec<Vec<SeriesTerm>>,
    pub r: Vec<Vec<SeriesTerm>>,
}

impl SeriesTables {
    /// Build tables from (a, b, c) triples, rejecting empty coordinates
    pub fn from_triples(
        l: &[&[(f64, f64, f64)]],
        b: &[&[(f64, f64, f64)]],
        r: &[&[(f64, f64, f64)]],
    ) -> Result<Self, PlanetError> {
        fn convert(
            name: &str,
            groups: &[&[(f64, f64, f64)]],
        ) -> Result<Vec<Vec<SeriesTerm>>, PlanetError> {
            if groups.is_empty() {
                return Err(PlanetError::DataError(format!("no {} series", name)));
            }
            Ok(groups
                .iter()
                .map(|group| {
                    group
                        .iter()
                        .map(|&(a, b, c)| SeriesTerm::new(a, b, c))
                        .collect()
                })
                .collect())
        }

        Ok(Self {
            l: convert("longitude", l)?,
            b: convert("latitude", b)?,
            r: convert("radius", r)?,
        })
    }
}

/// Heliocentric ecliptic position referred to the mean dynamical ecliptic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeliocentricPosition {
    /// Longitude in degrees, [0, 360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Radius vector in AU
    pub radius: f64,
}

fn sum_series(groups: &[Vec<SeriesTerm>], t: f64) -> f64 {
    groups
        .iter()
        .rev()
        .fold(0.0, |acc, group| {
            acc * t + group.iter().map(|term| term.value(t)).sum::<f64>()
        })
}

/// Evaluate `tables` at Julian Ephemeris Day `jde`
pub fn evaluate(jde: f64, tables: &SeriesTables) -> HeliocentricPosition {
    let t = (jde - J2000) / JULIAN_MILLENNIUM_DAYS;
    HeliocentricPosition {
        longitude: normalize_degrees(sum_series(&tables.l, t).to_degrees()),
        latitude: sum_series(&tables.b, t).to_degrees() % 360.0,
        radius: sum_series(&tables.r, t),
    }
}

/// Corrections (dL, dB) in degrees from the VSOP87 dynamical frame to FK5
pub fn fk5_correction(position: &HeliocentricPosition, jde: f64) -> (f64, f64) {
    let t = (jde - J2000) / JULIAN_CENTURY_DAYS;
    let l_prime = (position.longitude + t * (-1.397 - 0.000_31 * t)).to_radians();
    let (sin_l, cos_l) = l_prime.sin_cos();
    let d_l = (-0.090_33 + 0.039_16 * (cos_l + sin_l) * position.latitude.to_radians().tan())
        / 3600.0;
    let d_b = 0.039_16 * (cos_l - sin_l) / 3600.0;
    (d_l, d_b)
}

/// Registry of series tables by body
#[derive(Debug, Default)]
pub struct Ephemeris {
    series: HashMap<Body, SeriesTables>,
}

impl Ephemeris {
    /// Create a new empty ephemeris
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the tables for `body`, replacing any already present
    pub fn with_series(mut self, body: Body, tables: SeriesTables) -> Self {
        self.series.insert(body, tables);
        self
    }

    /// Tables registered for `body`
    pub fn series(&self, body: Body) -> Result<&SeriesTables, PlanetError> {
        self.series
            .get(&body)
            .ok_or_else(|| PlanetError::NotFound(body.name().to_string()))
    }

    /// FK5-corrected heliocentric position of `body` at `jde`
    pub fn position(&self, body: Body, jde: f64) -> Result<HeliocentricPosition, PlanetError> {
        let mut position = evaluate(jde, self.series(body)?);
        let (d_l, d_b) = fk5_correction(&position, jde);
        position.longitude = normalize_degrees(position.longitude + d_l);
        position.latitude += d_b;
        Ok(position)
    }
}
