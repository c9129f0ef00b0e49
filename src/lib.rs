//! Astrocalc: astronomical time scales and celestial coordinate transforms
//!
//! This crate converts calendar dates between civil, universal, dynamical and
//! sidereal time, and converts celestial positions between the horizon,
//! equatorial, ecliptic and galactic frames. It also evaluates VSOP87-style
//! heliocentric series from caller-supplied coefficient tables.
//!
//! ```rust
//! use astrocalc::time::{AstroDateTime, Observer, TimeScale};
//!
//! let observer = Observer::new(5.0, false, -64.0);
//! let mut date = AstroDateTime::new(1980, 4, 22, 14, 36, 51.67, TimeScale::Universal)
//!     .unwrap()
//!     .with_observer(observer);
//! date.to_gst();
//! assert_eq!((date.hours(), date.minutes()), (4, 40));
//! ```

use thiserror::Error;

pub mod almanac;
pub mod constants;
pub mod coordinates;
pub mod numeric;
pub mod nutationlib;
pub mod planetlib;
pub mod time;
pub mod units;

// Re-export commonly used types
pub use coordinates::{Coordinate, CoordinateMode, Sexagesimal};
pub use time::{AstroDateTime, DateTuple, Observer, TimeScale};

/// Main error type for the astrocalc library
#[derive(Debug, Error)]
pub enum AstroError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid coordinate mode: {0}")]
    InvalidCoordinateMode(String),

    #[error("Invalid operation for frame: {0}")]
    InvalidOperationForFrame(String),

    #[error("Unsupported year {0}: must be 1583 or later")]
    UnsupportedYearRange(i32),

    #[error("Invalid angle: {0}")]
    InvalidAngle(String),

    #[error("Unknown distance unit: {0}")]
    InvalidUnit(String),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Planet error: {0}")]
    Planet(#[from] planetlib::PlanetError),
}

/// Result type for astrocalc operations
pub type Result<T> = std::result::Result<T, AstroError>;
