//! Nutation and obliquity of the ecliptic
//!
//! Nutation uses the 63 periodic terms of the IAU 1980 theory with constant
//! amplitudes; the mean obliquity uses Laskar's polynomial, which stays
//! accurate to about 0.01" over 1000 years either side of J2000.
//!
//! All results are in degrees.

use crate::constants::{J2000, JULIAN_CENTURY_DAYS};

/// One periodic term: multiples of D, M, M', F and Ω, then the sine
/// (longitude) and cosine (obliquity) amplitudes in arcseconds
#[derive(Debug, Clone, Copy)]
struct NutationTerm {
    multiples: [i8; 5],
    longitude: f64,
    obliquity: f64,
}

const fn term(
    d: i8,
    m: i8,
    m_prime: i8,
    f: i8,
    omega: i8,
    longitude: f64,
    obliquity: f64,
) -> NutationTerm {
    NutationTerm {
        multiples: [d, m, m_prime, f, omega],
        longitude,
        obliquity,
    }
}

#[rustfmt::skip]
const NUTATION_TERMS: [NutationTerm; 63] = [
    term(0, 0, 0, 0, 1, -17.1996, 9.2025),
    term(-2, 0, 0, 2, 2, -1.3187, 0.5736),
    term(0, 0, 0, 2, 2, -0.2274, 0.0977),
    term(0, 0, 0, 0, 2, 0.2062, -0.0895),
    term(0, 1, 0, 0, 0, 0.1426, 0.0054),
    term(0, 0, 1, 0, 0, 0.0712, -0.0007),
    term(-2, 1, 0, 2, 2, -0.0517, 0.0224),
    term(0, 0, 0, 2, 1, -0.0386, 0.02),
    term(0, 0, 1, 2, 2, -0.0301, 0.0129),
    term(-2, -1, 0, 2, 2, 0.0217, -0.0095),
    term(-2, 0, 1, 0, 0, -0.0158, 0.0),
    term(-2, 0, 0, 2, 1, 0.0129, -0.007),
    term(0, 0, -1, 2, 2, 0.0123, -0.0053),
    term(2, 0, 0, 0, 0, 0.0063, 0.0),
    term(0, 0, 1, 0, 1, 0.0063, -0.0033),
    term(2, 0, -1, 2, 2, -0.0059, 0.0026),
    term(0, 0, -1, 0, 1, -0.0058, 0.0032),
    term(0, 0, 1, 2, 1, -0.0051, 0.0027),
    term(-2, 0, 2, 0, 0, 0.0048, 0.0),
    term(0, 0, -2, 2, 1, 0.0046, -0.0024),
    term(2, 0, 0, 2, 2, -0.0038, 0.0016),
    term(0, 0, 2, 2, 2, -0.0031, 0.0013),
    term(0, 0, 2, 0, 0, 0.0029, 0.0),
    term(-2, 0, 1, 2, 2, 0.0029, -0.0012),
    term(0, 0, 0, 2, 0, 0.0026, 0.0),
    term(-2, 0, 0, 2, 0, -0.0022, 0.0),
    term(0, 0, -1, 2, 1, 0.0021, -0.001),
    term(0, 2, 0, 0, 0, 0.0017, 0.0),
    term(2, 0, -1, 0, 1, 0.0016, -0.0008),
    term(-2, 2, 0, 2, 2, -0.0016, 0.0007),
    term(0, 1, 0, 0, 1, -0.0015, 0.0009),
    term(-2, 0, 1, 0, 1, -0.0013, 0.0007),
    term(0, -1, 0, 0, 1, -0.0012, 0.0006),
    term(0, 0, 2, -2, 0, 0.0011, 0.0),
    term(2, 0, -1, 2, 1, -0.001, 0.0005),
    term(2, 0, 1, 2, 2, -0.0008, 0.0003),
    term(0, 1, 0, 2, 2, 0.0007, -0.0003),
    term(-2, 1, 1, 0, 0, -0.0007, 0.0),
    term(0, -1, 0, 2, 2, -0.0007, 0.0003),
    term(2, 0, 0, 2, 1, -0.0007, 0.0003),
    term(2, 0, 1, 0, 0, 0.0006, 0.0),
    term(-2, 0, 2, 2, 2, 0.0006, -0.0003),
    term(-2, 0, 1, 2, 1, 0.0006, -0.0003),
    term(2, 0, -2, 0, 1, -0.0006, 0.0003),
    term(2, 0, 0, 0, 1, -0.0006, 0.0003),
    term(0, -1, 1, 0, 0, 0.0005, 0.0),
    term(-2, -1, 0, 2, 1, -0.0005, 0.0003),
    term(-2, 0, 0, 0, 1, -0.0005, 0.0003),
    term(0, 0, 2, 2, 1, -0.0005, 0.0003),
    term(-2, 0, 2, 0, 1, 0.0004, 0.0),
    term(-2, 1, 0, 2, 1, 0.0004, 0.0),
    term(0, 0, 1, -2, 0, 0.0004, 0.0),
    term(-1, 0, 1, 0, 0, -0.0004, 0.0),
    term(-2, 1, 0, 0, 0, -0.0004, 0.0),
    term(1, 0, 0, 0, 0, -0.0004, 0.0),
    term(0, 0, 1, 2, 0, 0.0003, 0.0),
    term(0, 0, -2, 2, 2, -0.0003, 0.0),
    term(-1, -1, 1, 0, 0, -0.0003, 0.0),
    term(0, 1, 1, 0, 0, -0.0003, 0.0),
    term(0, -1, 1, 2, 2, -0.0003, 0.0),
    term(2, -1, -1, 2, 2, -0.0003, 0.0),
    term(0, 0, 3, 2, 2, -0.0003, 0.0),
    term(2, -1, 0, 2, 2, -0.0003, 0.0),
];

/// Laskar's mean obliquity coefficients in arcseconds, in powers of U = T/100
const OBLIQUITY_COEFFICIENTS: [f64; 11] = [
    84381.448, -4680.93, -1.55, 1999.25, -51.38, -249.67, -39.05, 7.12, 27.87, 5.79, 2.45,
];

/// Nutation and obliquity at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Nutation in longitude (Δψ)
    pub longitude: f64,
    /// Nutation in obliquity (Δε)
    pub obliquity: f64,
    /// Mean obliquity of the ecliptic (ε0)
    pub mean_obliquity: f64,
}

impl Nutation {
    /// Evaluate at Julian Ephemeris Day `jde`
    pub fn at(jde: f64) -> Self {
        let t = (jde - J2000) / JULIAN_CENTURY_DAYS;
        let arguments = fundamental_arguments(t);

        let (mut longitude, mut obliquity) = (0.0, 0.0);
        for term in NUTATION_TERMS.iter() {
            let angle: f64 = term
                .multiples
                .iter()
                .zip(arguments.iter())
                .map(|(&k, &arg)| k as f64 * arg)
                .sum::<f64>()
                .to_radians();
            longitude += term.longitude * angle.sin();
            obliquity += term.obliquity * angle.cos();
        }

        Self {
            longitude: longitude / 3600.0,
            obliquity: obliquity / 3600.0,
            mean_obliquity: mean_obliquity(jde),
        }
    }

    /// Mean obliquity corrected for nutation
    pub fn true_obliquity(&self) -> f64 {
        self.mean_obliquity + self.obliquity
    }
}

/// Mean obliquity of the ecliptic at Julian Ephemeris Day `jde`
pub fn mean_obliquity(jde: f64) -> f64 {
    let u = (jde - J2000) / JULIAN_CENTURY_DAYS / 100.0;
    OBLIQUITY_COEFFICIENTS
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * u + c)
        / 3600.0
}

/// D, M, M', F and Ω in degrees for `t` Julian centuries since J2000
fn fundamental_arguments(t: f64) -> [f64; 5] {
    // Mean elongation of the Moon from the Sun
    let d = 297.85036 + t * (445_267.111_480 + t * (-0.001_914_2 + t / 189_474.0));
    // Mean anomaly of the Sun
    let m = 357.52772 + t * (35_999.050_340 + t * (-0.000_160_3 - t / 300_000.0));
    // Mean anomaly of the Moon
    let m_prime = 134.96298 + t * (477_198.867_398 + t * (0.008_697_2 + t / 56_250.0));
    // Moon's argument of latitude
    let f = 93.27191 + t * (483_202.017_538 + t * (-0.003_682_5 + t / 327_270.0));
    // Longitude of the ascending node of the Moon's mean orbit
    let omega = 125.04452 + t * (-1_934.136_261 + t * (0.002_070_8 + t / 450_000.0));
    [d, m, m_prime, f, omega]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // 1987-04-10 0h TD
    const JDE: f64 = 2_446_895.5;

    #[test]
    fn test_nutation_terms() {
        let nutation = Nutation::at(JDE);
        assert_relative_eq!(nutation.longitude * 3600.0, -3.788, epsilon = 1e-3);
        assert_relative_eq!(nutation.obliquity * 3600.0, 9.443, epsilon = 1e-3);
        assert_relative_eq!(nutation.longitude, -0.001_052_332_550_403_307, epsilon = 1e-12);
        assert_relative_eq!(nutation.obliquity, 0.002_622_947_155_040_129, epsilon = 1e-12);
    }

    #[test]
    fn test_obliquity() {
        let nutation = Nutation::at(JDE);
        assert_relative_eq!(nutation.mean_obliquity, 23.440_946_290_957_324, epsilon = 1e-10);
        assert_relative_eq!(nutation.true_obliquity(), 23.443_569_238_112_364, epsilon = 1e-10);
    }

    #[test]
    fn test_mean_obliquity_at_j2000() {
        assert_relative_eq!(mean_obliquity(J2000), 84381.448 / 3600.0, epsilon = 1e-12);
    }
}
