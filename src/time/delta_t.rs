//! Delta T (TD - UT) providers
//!
//! The date engine only needs ΔT when converting between Universal and
//! Dynamical time. It asks a [`DeltaT`] implementation, so callers can swap
//! the historical table for one of the polynomial fits or a fixed stub.

use log::debug;
use serde::{Deserialize, Serialize};

/// Source of the TD - UT offset in seconds
pub trait DeltaT {
    /// ΔT in seconds for a calendar year and the Julian date being converted
    fn delta_t_seconds(&self, year: i32, julian_day: f64) -> f64;
}

impl<F> DeltaT for F
where
    F: Fn(i32, f64) -> f64,
{
    fn delta_t_seconds(&self, year: i32, julian_day: f64) -> f64 {
        self(year, julian_day)
    }
}

/// First year covered by [`DELTA_T_TABLE`]
pub const DELTA_T_FIRST_YEAR: i32 = 1620;

/// Last year covered by [`DELTA_T_TABLE`]
pub const DELTA_T_LAST_YEAR: i32 = 2026;

/// Years either side of the table that are extrapolated linearly
const LINEAR_EXTRAPOLATION_YEARS: i32 = 70;

/// Observed and predicted ΔT in seconds, one value per year from 1620
///
/// Historical values from the USNO `deltat.data` series, recent years from
/// `deltat.preds`.
#[rustfmt::skip]
pub const DELTA_T_TABLE: [f64; 407] = [
       124.0,    119.0,    115.0,    110.0,    106.0,    102.0,     98.0,     95.0,     91.0,     88.0, // 1620
        85.0,     82.0,     79.0,     77.0,     74.0,     72.0,     70.0,     67.0,     65.0,     63.0, // 1630
        62.0,     60.0,     58.0,     57.0,     55.0,     54.0,     53.0,     51.0,     50.0,     49.0, // 1640
        48.0,     47.0,     46.0,     45.0,     44.0,     43.0,     42.0,     41.0,     40.0,     38.0, // 1650
        37.0,     36.0,     35.0,     34.0,     33.0,     32.0,     31.0,     30.0,     28.0,     27.0, // 1660
        26.0,     25.0,     24.0,     23.0,     22.0,     21.0,     20.0,     19.0,     18.0,     17.0, // 1670
        16.0,     15.0,     14.0,     14.0,     13.0,     12.0,     12.0,     11.0,     11.0,     10.0, // 1680
        10.0,      9.0,      9.0,      9.0,      9.0,      9.0,      9.0,      9.0,      9.0,      9.0, // 1690
        10.0,      9.0,      9.0,      9.0,      9.0,      9.0,      9.0,      9.0,     10.0,     10.0, // 1700
        10.0,     10.0,     10.0,     10.0,     10.0,     10.0,     10.0,     11.0,     11.0,     11.0, // 1710
        11.0,     11.0,     11.0,     11.0,     11.0,     11.0,     11.0,     11.0,     11.0,     11.0, // 1720
        11.0,     11.0,     11.0,     11.0,     12.0,     12.0,     12.0,     12.0,     12.0,     12.0, // 1730
        12.0,     12.0,     12.0,     12.0,     13.0,     13.0,     13.0,     13.0,     13.0,     13.0, // 1740
        13.0,     14.0,     14.0,     14.0,     14.0,     14.0,     14.0,     14.0,     15.0,     15.0, // 1750
        15.0,     15.0,     15.0,     15.0,     15.0,     16.0,     16.0,     16.0,     16.0,     16.0, // 1760
        16.0,     16.0,     16.0,     16.0,     16.0,     17.0,     17.0,     17.0,     17.0,     17.0, // 1770
        17.0,     17.0,     17.0,     17.0,     17.0,     17.0,     17.0,     17.0,     17.0,     17.0, // 1780
        17.0,     17.0,     16.0,     16.0,     16.0,     16.0,     15.0,     15.0,     14.0,     14.0, // 1790
        13.7,     13.4,     13.1,     12.9,     12.7,     12.6,     12.5,     12.5,     12.5,     12.5, // 1800
        12.5,     12.5,     12.5,     12.5,     12.5,     12.5,     12.5,     12.4,     12.3,     12.2, // 1810
        12.0,     11.7,     11.4,     11.1,     10.6,     10.2,      9.6,      9.1,      8.6,      8.0, // 1820
         7.5,      7.0,      6.6,      6.3,      6.0,      5.8,      5.7,      5.6,      5.6,      5.6, // 1830
         5.7,      5.8,      5.9,      6.1,      6.2,      6.3,      6.5,      6.6,      6.8,      6.9, // 1840
         7.1,      7.2,      7.3,      7.4,      7.5,      7.6,      7.7,      7.7,      7.8,      7.8, // 1850
        7.88,     7.82,     7.54,     6.97,     6.40,     6.02,     5.41,     4.10,     2.92,     1.81, // 1860
        1.61,     0.10,    -1.02,    -1.28,    -2.69,    -3.24,    -3.64,    -4.54,    -4.71,    -5.11, // 1870
       -5.40,    -5.42,    -5.20,    -5.46,    -5.46,    -5.79,    -5.63,    -5.64,    -5.80,    -5.66, // 1880
       -5.87,    -6.01,    -6.19,    -6.64,    -6.44,    -6.47,    -6.09,    -5.76,    -4.66,    -3.74, // 1890
       -2.72,    -1.54,    -0.02,     1.24,     2.64,     3.86,     5.37,     6.14,     7.75,     9.13, // 1900
       10.46,    11.53,    13.36,    14.65,    16.01,    17.20,    18.24,    19.06,    20.25,    20.95, // 1910
       21.16,    22.25,    22.41,    23.03,    23.49,    23.62,    23.86,    24.49,    24.34,    24.08, // 1920
       24.02,    24.00,    23.87,    23.95,    23.86,    23.93,    23.73,    23.92,    23.96,    24.02, // 1930
       24.33,    24.83,    25.30,    25.70,    26.24,    26.77,    27.28,    27.78,    28.25,    28.71, // 1940
       29.15,    29.57,    29.97,    30.36,    30.72,    31.07,    31.35,    31.68,    32.18,    32.68, // 1950
       33.15,    33.59,    34.00,    34.47,    35.03,    35.73,    36.54,    37.43,    38.29,    39.20, // 1960
       40.18,    41.17,    42.23,    43.37,  44.4841,  45.4761,  46.4567,  47.5214,  48.5344,  49.5862, // 1970
     50.5387,  51.3808,  52.1668,  52.9565,  53.7882,  54.3427,  54.8713,  55.3222,  55.8197,    56.30, // 1980
     56.8553,  57.5653,  58.3092,  59.1218,  59.9845,  60.7853,  61.6287,  62.2950,  62.9659,  63.4473, // 1990
     63.8285,  64.0908,  64.2998,  64.4734,  64.5736,  64.6876,  64.8452,  65.1464,  65.4573,  65.7768, // 2000
     66.0699,  66.3246,  66.6030,  66.9069,   67.281,  67.6439,  68.1024,  68.5928,     69.1,     69.6, // 2010
        70.2,     71.0,     71.0,     72.0,     72.0,     73.0,     73.0, // 2020
];

/// Yearly table lookup with linear and parabolic extrapolation
///
/// Within the table the value for the calendar year is returned as is.
/// Up to 70 years beyond either end the edge slope (halved) is followed, and
/// further out the long-term parabola `(JD - 2382148)^2 / 41048480 - 15`
/// is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalDeltaT;

impl DeltaT for HistoricalDeltaT {
    fn delta_t_seconds(&self, year: i32, julian_day: f64) -> f64 {
        let first = DELTA_T_TABLE[0];
        let last = DELTA_T_TABLE[DELTA_T_TABLE.len() - 1];

        if year < DELTA_T_FIRST_YEAR - LINEAR_EXTRAPOLATION_YEARS
            || year > DELTA_T_LAST_YEAR + LINEAR_EXTRAPOLATION_YEARS
        {
            debug!("delta T for {} from the long-term parabola", year);
            long_term_parabola(julian_day)
        } else if year < DELTA_T_FIRST_YEAR {
            debug!("delta T for {} extrapolated before the table", year);
            let slope = (DELTA_T_TABLE[1] - first) / 2.0;
            (year - DELTA_T_FIRST_YEAR) as f64 * slope + first
        } else if year > DELTA_T_LAST_YEAR {
            debug!("delta T for {} extrapolated past the table", year);
            let slope = (last - DELTA_T_TABLE[DELTA_T_TABLE.len() - 2]) / 2.0;
            (year - DELTA_T_LAST_YEAR) as f64 * slope + last
        } else {
            DELTA_T_TABLE[(year - DELTA_T_FIRST_YEAR) as usize]
        }
    }
}

/// Long-term ΔT parabola in seconds
pub fn long_term_parabola(julian_day: f64) -> f64 {
    let dy = julian_day - 2_382_148.0;
    dy * dy / 41_048_480.0 - 15.0
}

/// One polynomial piece valid for `start <= year < end`
///
/// The argument is `u = offset + (year - origin) / 100`, and the polynomial
/// is `c0 + c1 u + c2 u^2 + ...`.
#[derive(Debug, Clone, Copy)]
pub struct DeltaTPolynomial {
    pub start: i32,
    pub end: i32,
    pub origin: f64,
    pub offset: f64,
    pub coefficients: &'static [f64],
}

impl DeltaTPolynomial {
    /// True if `year` falls in this piece
    pub fn covers(&self, year: i32) -> bool {
        self.start <= year && year < self.end
    }

    /// Evaluate the piece with Horner's method
    pub fn evaluate(&self, year: f64) -> f64 {
        let u = self.offset + (year - self.origin) / 100.0;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &coefficient| acc * u + coefficient)
    }
}

const fn piece(
    start: i32,
    end: i32,
    origin: f64,
    offset: f64,
    coefficients: &'static [f64],
) -> DeltaTPolynomial {
    DeltaTPolynomial {
        start,
        end,
        origin,
        offset,
        coefficients,
    }
}

/// Meeus, Astronomical Algorithms 2nd ed. (1998), max error 0.9 s
const MEEUS: &[DeltaTPolynomial] = &[
    piece(1800, 1900, 1900.0, 0.0, &[
        -2.5, 228.95, 5218.61, 56282.84, 324011.78, 1061660.75, 2087298.89, 2513807.78,
        1818961.41, 727058.63, 123563.95,
    ]),
    piece(1900, 1997, 1900.0, 0.0, &[
        -2.44, 87.24, 815.2, -2637.8, -18756.33, 124906.15, -303191.19, 372919.88,
        -232424.66, 58353.42,
    ]),
];

/// Montenbruck & Pfleger, Astronomy on the Personal Computer 4th ed. (2000)
const MONTENBRUCK_PFLEGER: &[DeltaTPolynomial] = &[
    piece(1825, 1850, 1825.0, 0.0, &[10.4, -80.8, 413.9, -572.3]),
    piece(1850, 1875, 1850.0, 0.0, &[6.6, 46.3, -358.4, 18.8]),
    piece(1875, 1900, 1875.0, 0.0, &[-3.9, -10.8, -166.2, 867.4]),
    piece(1900, 1925, 1900.0, 0.0, &[-2.6, 114.1, 327.5, -1467.4]),
    piece(1925, 1950, 1925.0, 0.0, &[24.2, -6.3, -8.2, 483.4]),
    piece(1950, 1975, 1950.0, 0.0, &[29.3, 32.5, -3.8, 550.7]),
    piece(1975, 2000, 1975.0, 0.0, &[45.3, 130.5, -570.5, 1516.7]),
];

/// Meeus & Simon (2000), up to 3.2 s error
const MEEUS_SIMON: &[DeltaTPolynomial] = &[
    piece(1620, 1690, 2000.0, 3.45, &[40.3, -107.0, 50.0, -454.0, 1244.0]),
    piece(1690, 1770, 2000.0, 2.70, &[10.2, 11.3, -1.0, -16.0, 70.0]),
    piece(1770, 1820, 2000.0, 2.05, &[14.7, -18.8, -22.0, 173.0, 6.0]),
    piece(1820, 1870, 2000.0, 1.55, &[5.7, 12.7, 111.0, -534.0, -1654.0]),
    piece(1870, 1900, 2000.0, 1.15, &[-5.8, -14.6, 27.0, 101.0, 8234.0]),
    piece(1900, 1940, 2000.0, 0.80, &[21.4, 67.0, -443.0, 19.0, 4441.0]),
    piece(1940, 1990, 2000.0, 0.35, &[36.2, 74.0, 189.0, -140.0, -1883.0]),
    piece(1990, 2000, 2000.0, 0.05, &[60.8, 82.0, -188.0, -5034.0, 0.0]),
];

/// Islam, Sadiq & Qureshi (2008), a refit of the Meeus & Simon set
const ISLAM_SADIQ_QURESHI: &[DeltaTPolynomial] = &[
    piece(1620, 1690, 2000.0, 3.45, &[42.453, -108.62, 46.908, -451.441, 1273.369]),
    piece(1690, 1770, 2000.0, 2.7, &[11.364, 9.234, 2.457, -1.194, 45.161]),
    piece(1770, 1820, 2000.0, 2.05, &[15.304, -22.998, -27.101, 281.575, 122.178]),
    piece(1820, 1870, 2000.0, 1.55, &[6.085, 14.218, 103.619, -598.093, -1496.75]),
    piece(1870, 1900, 2000.0, 1.15, &[-5.571, -11.542, -40.46, -186.858, 11825.13]),
    piece(1900, 1940, 2000.0, 0.8, &[21.462, 67.422, -448.338, -11.948, 4655.586]),
    piece(1940, 1990, 2000.0, 0.35, &[36.126, 73.93, 212.64, -137.364, -2383.49]),
    piece(1990, 2000, 2000.0, 0.05, &[60.798, 81.694, -174.854, -4823.23, -2039.63]),
];

/// Published polynomial fits to the historical ΔT record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolynomialSet {
    Meeus,
    MontenbruckPfleger,
    MeeusSimon,
    IslamSadiqQureshi,
}

impl PolynomialSet {
    /// The pieces making up this set
    pub fn pieces(&self) -> &'static [DeltaTPolynomial] {
        match self {
            PolynomialSet::Meeus => MEEUS,
            PolynomialSet::MontenbruckPfleger => MONTENBRUCK_PFLEGER,
            PolynomialSet::MeeusSimon => MEEUS_SIMON,
            PolynomialSet::IslamSadiqQureshi => ISLAM_SADIQ_QURESHI,
        }
    }

    /// ΔT from this set, or `None` when no piece covers the year
    pub fn evaluate(&self, year: i32) -> Option<f64> {
        self.pieces()
            .iter()
            .find(|piece| piece.covers(year))
            .map(|piece| piece.evaluate(year as f64))
    }
}

/// Polynomial ΔT falling back to the historical table outside its pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolynomialDeltaT {
    pub set: PolynomialSet,
}

impl PolynomialDeltaT {
    pub fn new(set: PolynomialSet) -> Self {
        Self { set }
    }
}

impl DeltaT for PolynomialDeltaT {
    fn delta_t_seconds(&self, year: i32, julian_day: f64) -> f64 {
        match self.set.evaluate(year) {
            Some(dt) => dt,
            None => {
                debug!("{:?} polynomials do not cover {}, using the table", self.set, year);
                HistoricalDeltaT.delta_t_seconds(year, julian_day)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::calendar::julian_day;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_table_covers_every_year() {
        let years = (DELTA_T_LAST_YEAR - DELTA_T_FIRST_YEAR + 1) as usize;
        assert_eq!(DELTA_T_TABLE.len(), years);
    }

    #[rstest]
    #[case(1620, 124.0)]
    #[case(1900, -2.72)]
    #[case(1980, 50.5387)]
    #[case(2000, 63.8285)]
    #[case(2026, 73.0)]
    fn test_table_lookup(#[case] year: i32, #[case] expected: f64) {
        let jd = julian_day(year, 1, 1.0);
        assert_relative_eq!(HistoricalDeltaT.delta_t_seconds(year, jd), expected);
    }

    #[test]
    fn test_linear_extrapolation() {
        // Half the 1620-1621 step per year before the table
        let dt = HistoricalDeltaT.delta_t_seconds(1600, julian_day(1600, 1, 1.0));
        assert_relative_eq!(dt, 124.0 + 20.0 * 2.5, epsilon = 1e-9);

        // 2025 -> 2026 is flat, so the extrapolation stays at the last value
        let dt = HistoricalDeltaT.delta_t_seconds(2050, julian_day(2050, 1, 1.0));
        assert_relative_eq!(dt, 73.0, epsilon = 1e-9);
    }

    #[test]
    fn test_long_term_parabola() {
        let jd = julian_day(1000, 1, 1.0);
        let dt = HistoricalDeltaT.delta_t_seconds(1000, jd);
        assert_relative_eq!(dt, long_term_parabola(jd));
        assert!(dt > 2000.0 && dt < 2200.0, "delta T in 1000 was {}", dt);
    }

    #[rstest]
    #[case(PolynomialSet::Meeus)]
    #[case(PolynomialSet::MontenbruckPfleger)]
    #[case(PolynomialSet::MeeusSimon)]
    #[case(PolynomialSet::IslamSadiqQureshi)]
    fn test_polynomials_track_the_table(#[case] set: PolynomialSet) {
        for year in [1880, 1925, 1950, 1975, 1995] {
            let jd = julian_day(year, 1, 1.0);
            let table = HistoricalDeltaT.delta_t_seconds(year, jd);
            let fitted = PolynomialDeltaT::new(set).delta_t_seconds(year, jd);
            assert!(
                (fitted - table).abs() < 4.0,
                "{:?} at {}: {} vs {}",
                set,
                year,
                fitted,
                table
            );
        }
    }

    #[test]
    fn test_polynomial_falls_back_to_table() {
        assert!(PolynomialSet::Meeus.evaluate(2010).is_none());
        let jd = julian_day(2010, 1, 1.0);
        let dt = PolynomialDeltaT::new(PolynomialSet::Meeus).delta_t_seconds(2010, jd);
        assert_relative_eq!(dt, 66.0699);
    }

    #[test]
    fn test_closure_provider() {
        let fixed = |_year: i32, _jd: f64| 32.184;
        assert_relative_eq!(fixed.delta_t_seconds(1980, 0.0), 32.184);
    }
}
