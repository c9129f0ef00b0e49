//! Spherical trigonometry for each frame edge
//!
//! Every function takes and returns decimal degrees. Right ascension and hour
//! angle are in degrees here too; converting to hours is the caller's job.

use crate::constants::{
    GALACTIC_NODE_LON_DEG, NGP_DEC_COS, NGP_DEC_SIN, NGP_NODE_RAD, NGP_RA_DEG,
};
use crate::numeric::{normalize_degrees, wrap_signed};

/// Separations at or below this, or this close to 180°, use the flat formula
const SMALL_SEPARATION_DEG: f64 = 0.166_666_67;

fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

/// Ecliptic longitude and latitude to right ascension and declination
pub fn ecliptic_to_equatorial(longitude: f64, latitude: f64, obliquity: f64) -> (f64, f64) {
    let (lon, lat, eps) = (
        longitude.to_radians(),
        latitude.to_radians(),
        obliquity.to_radians(),
    );
    let dec = clamp_unit(lat.sin() * eps.cos() + lat.cos() * eps.sin() * lon.sin()).asin();
    let ra = (lon.sin() * eps.cos() - lat.tan() * eps.sin()).atan2(lon.cos());
    (normalize_degrees(ra.to_degrees()), dec.to_degrees())
}

/// Right ascension and declination to ecliptic longitude and latitude
pub fn equatorial_to_ecliptic(ra: f64, dec: f64, obliquity: f64) -> (f64, f64) {
    let (alpha, delta, eps) = (ra.to_radians(), dec.to_radians(), obliquity.to_radians());
    let lat = clamp_unit(delta.sin() * eps.cos() - delta.cos() * eps.sin() * alpha.sin()).asin();
    let lon = (alpha.sin() * eps.cos() + delta.tan() * eps.sin()).atan2(alpha.cos());
    (normalize_degrees(lon.to_degrees()), lat.to_degrees())
}

/// Right ascension and declination to galactic longitude and latitude
pub fn equatorial_to_galactic(ra: f64, dec: f64) -> (f64, f64) {
    let (alpha, delta) = (ra.to_radians(), dec.to_radians());
    let sin_b = delta.cos() * NGP_DEC_COS * (alpha - NGP_NODE_RAD).cos() + delta.sin() * NGP_DEC_SIN;
    let b = clamp_unit(sin_b).asin();
    let y = delta.sin() - sin_b * NGP_DEC_SIN;
    let x = delta.cos() * (alpha - NGP_NODE_RAD).sin() * NGP_DEC_COS;
    let l = y.atan2(x).to_degrees() + GALACTIC_NODE_LON_DEG;
    (normalize_degrees(l), b.to_degrees())
}

/// Galactic longitude and latitude to right ascension and declination
pub fn galactic_to_equatorial(longitude: f64, latitude: f64) -> (f64, f64) {
    let l = (longitude - GALACTIC_NODE_LON_DEG).to_radians();
    let b = latitude.to_radians();
    let sin_dec = b.cos() * NGP_DEC_COS * l.sin() + b.sin() * NGP_DEC_SIN;
    let y = b.cos() * l.cos();
    let x = b.sin() * NGP_DEC_COS - b.cos() * NGP_DEC_SIN * l.sin();
    let ra = y.atan2(x).to_degrees() + NGP_RA_DEG;
    (normalize_degrees(ra), clamp_unit(sin_dec).asin().to_degrees())
}

/// Hour angle and declination to altitude and azimuth at `latitude`
///
/// Azimuth is measured from north through east.
pub fn equatorial_to_horizon(hour_angle: f64, dec: f64, latitude: f64) -> (f64, f64) {
    let (h, delta, phi) = (
        hour_angle.to_radians(),
        dec.to_radians(),
        latitude.to_radians(),
    );
    let sin_alt = clamp_unit(delta.sin() * phi.sin() + delta.cos() * phi.cos() * h.cos());
    let alt = sin_alt.asin();
    let cos_az = clamp_unit((delta.sin() - phi.sin() * sin_alt) / (phi.cos() * alt.cos()));
    let mut az = cos_az.acos().to_degrees();
    if h.sin() >= 0.0 {
        az = 360.0 - az;
    }
    (alt.to_degrees(), az)
}

/// Altitude and azimuth at `latitude` to hour angle and declination
pub fn horizon_to_equatorial(altitude: f64, azimuth: f64, latitude: f64) -> (f64, f64) {
    let (alt, az, phi) = (
        altitude.to_radians(),
        azimuth.to_radians(),
        latitude.to_radians(),
    );
    let sin_dec = clamp_unit(alt.sin() * phi.sin() + alt.cos() * phi.cos() * az.cos());
    let dec = sin_dec.asin();
    let cos_h = clamp_unit((alt.sin() - phi.sin() * sin_dec) / (phi.cos() * dec.cos()));
    let mut h = cos_h.acos().to_degrees();
    if az.sin() >= 0.0 {
        h = 360.0 - h;
    }
    (h, dec.to_degrees())
}

/// Great-circle distance between two points given as (longitude, latitude)
///
/// Near 0° and 180° the law of cosines loses precision, so a planar
/// approximation is used there instead.
pub fn angular_separation(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (l1, b1, l2, b2) = (
        lon1.to_radians(),
        lat1.to_radians(),
        lon2.to_radians(),
        lat2.to_radians(),
    );
    let cos_d = clamp_unit(b1.sin() * b2.sin() + b1.cos() * b2.cos() * (l1 - l2).cos());
    let separation = cos_d.acos().to_degrees();

    if separation <= SMALL_SEPARATION_DEG {
        planar_distance(lon1, lat1, lon2, lat2)
    } else if separation >= 180.0 - SMALL_SEPARATION_DEG {
        // Measure to the antipode of the second point instead
        180.0 - planar_distance(lon1, lat1, lon2 + 180.0, -lat2)
    } else {
        separation
    }
}

/// Flat-sky distance between two nearby points, in degrees
fn planar_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let mean_lat = ((lat1 + lat2) / 2.0).to_radians().cos();
    let d_lon = wrap_signed(lon1 - lon2, 180.0);
    ((mean_lat * d_lon).powi(2) + (lat1 - lat2).powi(2)).sqrt()
}
