//! Constants module for astronomical calculations

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Seconds in an hour
pub const HOUR_S: f64 = 3_600.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days in a Julian year
pub const JULIAN_YEAR_DAYS: f64 = 365.25;
/// Days in a Julian century
pub const JULIAN_CENTURY_DAYS: f64 = 36_525.0;
/// Days in a Julian millennium
pub const JULIAN_MILLENNIUM_DAYS: f64 = 365_250.0;

// Sidereal time
/// Ratio of sidereal to solar time
pub const SIDEREAL_RATE: f64 = 1.002_737_909_35;
/// Greenwich sidereal time at 0h UT, constant term (hours)
pub const GST_T0_A: f64 = 6.697_374_558;
/// Greenwich sidereal time at 0h UT, linear term (hours per century)
pub const GST_T0_B: f64 = 2_400.051_336;
/// Greenwich sidereal time at 0h UT, quadratic term
pub const GST_T0_C: f64 = 0.000_025_862;

// Angles
/// Degrees of arc per hour of right ascension
pub const DEG_PER_HOUR: f64 = 15.0;

// Galactic frame (north galactic pole and node, B1950)
/// Right ascension of the north galactic pole in degrees
pub const NGP_RA_DEG: f64 = 192.25;
/// Right ascension of the north galactic pole in radians, shifted to the ascending node
pub const NGP_NODE_RAD: f64 = 3.355_395;
/// Cosine of the north galactic pole declination (27.4 degrees)
pub const NGP_DEC_COS: f64 = 0.887_815;
/// Sine of the north galactic pole declination (27.4 degrees)
pub const NGP_DEC_SIN: f64 = 0.4602;
/// Galactic longitude of the ascending node of the galactic plane
pub const GALACTIC_NODE_LON_DEG: f64 = 33.0;

// Calendar constants
/// First day of Gregorian calendar in Julian day number (1582-10-15)
pub const GREGORIAN_START: i32 = 2_299_161;
/// First Gregorian calendar date as (year, month, day)
pub const GREGORIAN_START_DATE: (i32, u32, u32) = (1582, 10, 15);
/// Calendar days skipped by the Gregorian reform (1582-10-05 to 1582-10-14)
pub const REFORM_DAYS_DROPPED: u32 = 10;
/// Earliest year the Easter computus is defined for
pub const FIRST_EASTER_YEAR: i32 = 1583;
