//! Solar almanac: apparent position of the Sun, equinoxes and solstices,
//! and Carrington rotation numbers
//!
//! The Sun's geocentric position is Earth's heliocentric one turned around,
//! so everything here takes Earth's series tables from the caller.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{J2000, JULIAN_MILLENNIUM_DAYS};
use crate::coordinates::{Coordinate, CoordinateMode};
use crate::numeric::normalize_degrees;
use crate::time::{AstroDateTime, TimeScale};
use crate::nutationlib::Nutation;
use crate::planetlib::{evaluate, fk5_correction, HeliocentricPosition, SeriesTables};
use crate::{AstroError, Result};

/// Refinement steps before a season start is reported as not converging
pub const MAX_SEASON_ITERATIONS: usize = 50;

/// Refinement stops once a step is below this many days
const SEASON_TOLERANCE_DAYS: f64 = 0.000_005;

/// Constant part of the FK5 longitude correction, in degrees
const FK5_LONGITUDE_CORRECTION: f64 = -0.090_33 / 3600.0;

/// JDE of the start of Carrington rotation 1690 and the synodic period
const CARRINGTON_EPOCH: f64 = 2_444_235.34;
const CARRINGTON_PERIOD_DAYS: f64 = 27.2753;
const CARRINGTON_EPOCH_ROTATION: i64 = 1690;

/// Amplitude (0.0001"), phase and rate (degrees) of the daily variation of
/// the Sun's longitude; the second block is multiplied by powers of T
const DAILY_VARIATION: [(f64, f64, f64); 14] = [
    (118.568, 87.5287, 359_993.7286),
    (2.476, 85.0561, 719_987.4571),
    (1.376, 27.8502, 4_452_671.1152),
    (0.119, 73.1375, 450_368.8564),
    (0.114, 337.2264, 329_644.6718),
    (0.086, 222.5400, 659_289.3436),
    (0.078, 162.8136, 9_224_659.7915),
    (0.054, 82.5823, 1_079_981.1857),
    (0.052, 171.5189, 225_184.4282),
    (0.034, 30.3214, 4_092_677.3866),
    (0.033, 119.8105, 337_181.4711),
    (0.023, 247.5418, 299_295.6151),
    (0.023, 325.1526, 315_559.5560),
    (0.021, 155.1241, 675_553.2846),
];

/// (power of T, amplitude, phase, rate)
const DAILY_VARIATION_T: [(i32, f64, f64, f64); 7] = [
    (1, 7.311, 333.4515, 359_993.7286),
    (1, 0.305, 330.9814, 719_987.4571),
    (1, 0.010, 328.5170, 1_079_981.1857),
    (2, 0.309, 241.4518, 359_993.7286),
    (2, 0.021, 205.0482, 719_987.4571),
    (2, 0.004, 297.8610, 4_452_671.1152),
    (3, 0.010, 154.7066, 359_993.7286),
];

/// The four cardinal points of the Sun's apparent path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    VernalEquinox,
    SummerSolstice,
    AutumnalEquinox,
    WinterSolstice,
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::VernalEquinox,
        Season::SummerSolstice,
        Season::AutumnalEquinox,
        Season::WinterSolstice,
    ];

    /// Apparent solar longitude at the start of the season, in degrees
    pub fn longitude(&self) -> f64 {
        match self {
            Season::VernalEquinox => 0.0,
            Season::SummerSolstice => 90.0,
            Season::AutumnalEquinox => 180.0,
            Season::WinterSolstice => 270.0,
        }
    }

    /// Meeus' mean JDE polynomial coefficients for the two year ranges
    #[rustfmt::skip]
    fn coefficients(&self, before_1000: bool) -> [f64; 5] {
        match (self, before_1000) {
            (Season::VernalEquinox, true) => [1_721_139.29189, 365_242.13740, 0.06134, 0.00111, -0.00071],
            (Season::SummerSolstice, true) => [1_721_233.25401, 365_241.72562, -0.05323, 0.00907, 0.00025],
            (Season::AutumnalEquinox, true) => [1_721_325.70455, 365_242.49558, -0.11677, -0.00297, 0.00074],
            (Season::WinterSolstice, true) => [1_721_414.39987, 365_242.88257, -0.00769, -0.00933, -0.00006],
            (Season::VernalEquinox, false) => [2_451_623.80984, 365_242.37404, 0.05169, -0.00411, -0.00057],
            (Season::SummerSolstice, false) => [2_451_716.56767, 365_241.62603, 0.00325, 0.00888, -0.00030],
            (Season::AutumnalEquinox, false) => [2_451_810.21715, 365_242.01767, -0.11575, 0.00337, 0.00078],
            (Season::WinterSolstice, false) => [2_451_900.05952, 365_242.74049, -0.06223, -0.00823, 0.00032],
        }
    }
}

/// Reference plane for rectangular solar coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RectangularFrame {
    /// X towards the equinox in the plane of the ecliptic the series refer to
    Ecliptic,
    /// X towards the equinox in the mean equator of date
    Equatorial,
}

/// Geocentric rectangular coordinates in AU
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Geocentric position of the Sun at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Julian Ephemeris Day of the position
    pub jde: f64,
    /// True geometric longitude in FK5, degrees
    pub true_longitude: f64,
    /// Latitude in FK5, degrees
    pub latitude: f64,
    /// Earth-Sun distance in AU
    pub radius: f64,
    /// Aberration in longitude, degrees
    pub aberration: f64,
    pub nutation: Nutation,
}

impl SolarPosition {
    /// Position at `jde` from Earth's heliocentric series
    pub fn at(jde: f64, earth: &SeriesTables) -> Self {
        let earth_position = evaluate(jde, earth);
        let geocentric = HeliocentricPosition {
            longitude: normalize_degrees(earth_position.longitude + 180.0),
            latitude: -earth_position.latitude,
            radius: earth_position.radius,
        };
        let (_, d_b) = fk5_correction(&geocentric, jde);

        Self {
            jde,
            true_longitude: normalize_degrees(geocentric.longitude + FK5_LONGITUDE_CORRECTION),
            latitude: geocentric.latitude + d_b,
            radius: geocentric.radius,
            aberration: aberration(jde, geocentric.radius),
            nutation: Nutation::at(jde),
        }
    }

    /// Longitude corrected for nutation and aberration
    pub fn apparent_longitude(&self) -> f64 {
        normalize_degrees(self.true_longitude + self.nutation.longitude + self.aberration)
    }

    /// The Sun as an ecliptic coordinate, apparent or geometric
    ///
    /// The coordinate carries the instant as a TD date, so it converts to
    /// equatorial with the obliquity of date unless an epoch is given.
    pub fn ecliptic_coordinate(&self, apparent: bool) -> Result<Coordinate> {
        let longitude = if apparent {
            self.apparent_longitude()
        } else {
            self.true_longitude
        };
        let date = AstroDateTime::from_julian_day(self.jde, TimeScale::Dynamical);
        Ok(Coordinate::from_degrees(longitude, self.latitude, CoordinateMode::Ecliptic)?
            .with_date(date))
    }

    /// The Sun as right ascension (hours) and declination
    ///
    /// The obliquity is the mean obliquity at the Julian `epoch` when given,
    /// otherwise that of the position's own instant.
    pub fn equatorial_coordinate(&self, apparent: bool, epoch: Option<f64>) -> Result<Coordinate> {
        self.ecliptic_coordinate(apparent)?.to_equatorial(epoch)
    }

    /// Geometric rectangular coordinates (Meeus 26.1)
    pub fn rectangular(&self, frame: RectangularFrame) -> RectangularPosition {
        let (sin_b, cos_b) = self.latitude.to_radians().sin_cos();
        let (sin_l, cos_l) = self.true_longitude.to_radians().sin_cos();
        let r = self.radius;
        let x = r * cos_b * cos_l;
        match frame {
            RectangularFrame::Ecliptic => RectangularPosition {
                x,
                y: r * cos_b * sin_l,
                z: r * sin_b,
            },
            RectangularFrame::Equatorial => {
                let (sin_e, cos_e) = self.nutation.mean_obliquity.to_radians().sin_cos();
                RectangularPosition {
                    x,
                    y: r * (cos_b * sin_l * cos_e - sin_b * sin_e),
                    z: r * (cos_b * sin_l * sin_e + sin_b * cos_e),
                }
            }
        }
    }
}

/// Aberration in longitude in degrees for an Earth-Sun distance of `radius`
fn aberration(jde: f64, radius: f64) -> f64 {
    let t = (jde - J2000) / JULIAN_MILLENNIUM_DAYS;
    let periodic: f64 = DAILY_VARIATION
        .iter()
        .map(|&(a, b, c)| a * (b + c * t).to_radians().sin())
        .sum();
    let secular: f64 = DAILY_VARIATION_T
        .iter()
        .map(|&(power, a, b, c)| a * t.powi(power) * (b + c * t).to_radians().sin())
        .sum();
    let daily_variation = 3548.193 + periodic + secular;
    -0.005_775_518 * radius * daily_variation / 3600.0
}

/// Mean JDE of the start of `season`, for years -1000 through 3000
pub fn approximate_season_start(year: i32, season: Season) -> Option<f64> {
    let (before_1000, y) = match year {
        -1000..=999 => (true, year as f64 / 1000.0),
        1000..=3000 => (false, (year as f64 - 2000.0) / 1000.0),
        _ => return None,
    };
    let coefficients = season.coefficients(before_1000);
    Some(coefficients.iter().rev().fold(0.0, |acc, &c| acc * y + c))
}

/// Refine a season start until the apparent longitude reaches the target
///
/// Each step moves by `58 * sin(target - λ)` days. The walk is capped at
/// [`MAX_SEASON_ITERATIONS`] steps.
pub fn refine_season_start<F>(jde0: f64, season: Season, apparent_longitude: F) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let mut jde = jde0;
    for iteration in 0..MAX_SEASON_ITERATIONS {
        let step = 58.0 * (season.longitude() - apparent_longitude(jde)).to_radians().sin();
        jde += step;
        if step.abs() < SEASON_TOLERANCE_DAYS {
            debug!("{:?} converged after {} steps at JDE {}", season, iteration + 1, jde);
            return Ok(jde);
        }
    }
    warn!(
        "{:?} did not converge within {} steps from JDE {}",
        season, MAX_SEASON_ITERATIONS, jde0
    );
    Err(AstroError::Calculation(format!(
        "{:?} start did not converge within {} steps",
        season, MAX_SEASON_ITERATIONS
    )))
}

/// JDE of the start of `season` in `year`
pub fn season_start(year: i32, season: Season, earth: &SeriesTables) -> Result<f64> {
    let jde0 = approximate_season_start(year, season).ok_or_else(|| {
        AstroError::Calculation(format!("no season polynomial for year {}", year))
    })?;
    refine_season_start(jde0, season, |jde| {
        SolarPosition::at(jde, earth).apparent_longitude()
    })
}

/// Carrington rotation number in progress at `jde`
pub fn carrington_rotation(jde: f64) -> i64 {
    CARRINGTON_EPOCH_ROTATION + ((jde - CARRINGTON_EPOCH) / CARRINGTON_PERIOD_DAYS).round() as i64
}
