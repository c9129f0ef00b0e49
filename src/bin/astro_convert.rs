//! Astronomical conversion tool
//!
//! A thin command line front-end over the astrocalc library: converts dates
//! between time scales, coordinates between frames, and prints the date of
//! Easter, the angular separation of two equatorial positions, or a distance
//! in another unit.
//!
//! Usage:
//!   cargo run --bin astro_convert -- time 1980 4 22 14 36 51.67 --from ut --to gst --longitude -64
//!   cargo run --bin astro_convert -- coord 05h14m32.3s -08d12m05.9s --to gal
//!   cargo run --bin astro_convert -- easter 2014
//!   cargo run --bin astro_convert -- separation 5h13m31.7s -8d13m30s 6h44m13.4s -16d41m11s
//!   cargo run --bin astro_convert -- distance 1.3 pc ly

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use astrocalc::coordinates::{Coordinate, CoordinateMode, Sexagesimal};
use astrocalc::time::{date_of_easter, AstroDateTime, Observer, TimeScale};
use astrocalc::units::{convert_distance, DistanceUnit};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Astronomical conversion tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts dates between time scales and coordinates between frames",
    long_about = None
)]
struct Args {
    /// Print results as JSON
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Observer settings shared by the date and coordinate commands
#[derive(clap::Args, Debug)]
struct ObserverArgs {
    /// Zone correction in hours, east positive
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    zone: f64,

    /// Daylight saving time is in effect
    #[arg(long, action = ArgAction::SetTrue)]
    dst: bool,

    /// Longitude in degrees, east positive
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    longitude: f64,
}

impl ObserverArgs {
    fn observer(&self) -> Observer {
        Observer::new(self.zone, self.dst, self.longitude)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a date and time between scales
    #[command(allow_negative_numbers = true)]
    Time {
        year: i32,
        month: u32,
        day: u32,
        hours: u32,
        minutes: u32,
        seconds: f64,

        /// Scale of the given time (lct, ut, td, gst, lst)
        #[arg(long, default_value = "ut")]
        from: TimeScale,

        /// Scale to convert to
        #[arg(long, default_value = "ut")]
        to: TimeScale,

        #[command(flatten)]
        observer: ObserverArgs,
    },

    /// Convert a coordinate between frames
    Coord {
        /// First axis, e.g. 05h14m32.3s or 139d41m10s
        #[arg(allow_hyphen_values = true)]
        first: Sexagesimal,

        /// Second axis, e.g. -08d12m05.9s
        #[arg(allow_hyphen_values = true)]
        second: Sexagesimal,

        /// Frame of the given coordinate, e.g. equ|hrs|ra, ecl, gal, hor
        #[arg(long, default_value = "equ|hrs|ra")]
        mode: CoordinateMode,

        /// Conversion to apply
        #[arg(long, value_enum)]
        to: Target,

        /// Observer latitude in degrees, needed for horizon conversions
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,

        /// Epoch (e.g. 1980.0) for the obliquity of ecliptic conversions
        #[arg(long)]
        epoch: Option<f64>,

        /// Julian date of the observation, needed for hour angles
        #[arg(long)]
        julian_day: Option<f64>,

        /// Scale of the Julian date
        #[arg(long, default_value = "ut")]
        scale: TimeScale,

        #[command(flatten)]
        observer: ObserverArgs,
    },

    /// Print the date of Easter Sunday
    Easter { year: i32 },

    /// Angular separation of two equatorial positions (RA in hours)
    #[command(allow_hyphen_values = true)]
    Separation {
        first_ra: Sexagesimal,
        first_dec: Sexagesimal,
        second_ra: Sexagesimal,
        second_dec: Sexagesimal,
    },

    /// Convert a distance between units (ft, m, km, mi, nmi, au, ly, pc)
    Distance {
        value: f64,
        from: DistanceUnit,
        to: DistanceUnit,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Target {
    /// Equatorial
    Equ,
    /// Ecliptic
    Ecl,
    /// Galactic
    Gal,
    /// Horizon
    Hor,
    /// Equatorial hour angle
    Ha,
    /// Equatorial right ascension
    Ra,
    /// Equatorial first axis in degrees
    Deg,
    /// Equatorial first axis in hours
    Hrs,
}

#[derive(Serialize)]
struct CoordinateReport {
    mode: CoordinateMode,
    first: Sexagesimal,
    second: Sexagesimal,
    pretty: String,
}

/// Prints a value either as JSON or through its Display form
fn emit<T: Serialize>(json: bool, value: &T, text: impl std::fmt::Display) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn convert(coordinate: &Coordinate, target: Target, epoch: Option<f64>) -> Result<Coordinate> {
    let converted = match target {
        Target::Equ => coordinate.to_equatorial(epoch)?,
        Target::Ecl => coordinate.to_ecliptic(epoch)?,
        Target::Gal => coordinate.to_galactic()?,
        Target::Hor => coordinate.to_horizon()?,
        Target::Ha => coordinate.to_hour_angle()?,
        Target::Ra => coordinate.to_right_ascension()?,
        Target::Deg => coordinate.to_degrees()?,
        Target::Hrs => coordinate.to_hours()?,
    };
    Ok(converted)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let json = args.json;

    match args.command {
        Command::Time {
            year,
            month,
            day,
            hours,
            minutes,
            seconds,
            from,
            to,
            observer,
        } => {
            let mut date = AstroDateTime::new(year, month, day, hours, minutes, seconds, from)?
                .with_observer(observer.observer());
            date.convert_to(to);
            emit(json, &date.to_tuple(), &date)?;
        }
        Command::Coord {
            first,
            second,
            mode,
            to,
            latitude,
            epoch,
            julian_day,
            scale,
            observer,
        } => {
            let mut coordinate = Coordinate::new(first, second, mode)?;
            if let Some(latitude) = latitude {
                coordinate.set_latitude(latitude);
            }
            if let Some(jd) = julian_day {
                coordinate.set_date(
                    AstroDateTime::from_julian_day(jd, scale).with_observer(observer.observer()),
                );
            }
            let converted = convert(&coordinate, to, epoch)?;
            let report = CoordinateReport {
                mode: converted.mode(),
                first: converted.first(),
                second: converted.second(),
                pretty: converted.to_string(),
            };
            emit(json, &report, format!("{} ({})", converted, converted.mode()))?;
        }
        Command::Easter { year } => {
            let (year, month, day) = date_of_easter(year)?;
            emit(
                json,
                &(year, month, day),
                format!("{:04}-{:02}-{:02}", year, month, day),
            )?;
        }
        Command::Separation {
            first_ra,
            first_dec,
            second_ra,
            second_dec,
        } => {
            let first = Coordinate::new(first_ra, first_dec, CoordinateMode::EQUATORIAL_RA_HOURS)?;
            let second =
                Coordinate::new(second_ra, second_dec, CoordinateMode::EQUATORIAL_RA_HOURS)?;
            let separation = first.angular_separation(&second)?;
            emit(json, &separation, separation)?;
        }
        Command::Distance { value, from, to } => {
            let converted = convert_distance(value, from, to);
            emit(json, &(converted, to), format!("{} {}", converted, to))?;
        }
    }

    Ok(())
}
