//! # Synthetic Sentence Generator
//!
//! Produces RMC sentences in the same wire format the decoder accepts, for use
//! as test fixtures. Position, speed, and heading follow an independent random
//! walk; about one sentence in five reports a void status.

use rand::Rng;
use time::{Duration, PrimitiveDateTime};

use crate::{EastWest, FixRecord, NorthSouth, RMC_HEADER, Status, checksum, format_checksum};

const VOID_PROBABILITY: f64 = 0.2;
const TICK: Duration = Duration::seconds(5);

const MICRO_MINUTES_PER_DEGREE: f64 = 60_000_000.0;

/// Encodes a fix as a complete sentence, checksum included.
///
/// Coordinates are written with six decimal places of minutes, speed with three
/// decimals, heading with four and magnetic variation with two. Decoding the
/// result gives back the same values to that precision.
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::{FixRecord, Status, generator::encode};
///
/// let fix = FixRecord {
///     hour: 10,
///     minute: 26,
///     second: 42,
///     status: Status::Active,
///     latitude: -(48.0 + 13.794316 / 60.0),
///     longitude: -(16.0 + 21.569304 / 60.0),
///     ground_speed: 7.158,
///     heading: 156.6705,
///     day: 2,
///     month: 7,
///     year: 13,
///     magnetic_variation: 20.32,
/// };
///
/// assert_eq!(
///     encode(&fix),
///     "$GPRMC,102642.00,A,4813.794316,S,01621.569304,W,7.158,156.6705,020713,20.32,E*64"
/// );
/// ```
pub fn encode(fix: &FixRecord) -> String {
    let latitude = if fix.latitude.is_sign_negative() {
        NorthSouth::South
    } else {
        NorthSouth::North
    };
    let longitude = if fix.longitude.is_sign_negative() {
        EastWest::West
    } else {
        EastWest::East
    };
    let variation = if fix.magnetic_variation.is_sign_negative() {
        EastWest::West
    } else {
        EastWest::East
    };

    let mut sentence = format!(
        "{RMC_HEADER}{:02}{:02}{:02}.00,{},{},{},{},{},{:.3},{:.4},{:02}{:02}{:02},{:.2},{}",
        fix.hour,
        fix.minute,
        fix.second,
        fix.status.letter(),
        coordinate(fix.latitude, 2),
        latitude.letter(),
        coordinate(fix.longitude, 3),
        longitude.letter(),
        fix.ground_speed.abs(),
        fix.heading,
        fix.day,
        fix.month,
        fix.year,
        fix.magnetic_variation.abs(),
        variation.letter(),
    );

    let (_, cc) = checksum(&sentence[1..]);
    sentence.push('*');
    sentence.push_str(&format_checksum(cc));

    sentence
}

/// `[D]DDMM.MMMMMM` from decimal degrees, rounded to whole micro-minutes.
fn coordinate(value: f64, degree_digits: usize) -> String {
    let micro_minutes = (value.abs() * MICRO_MINUTES_PER_DEGREE).round() as u64;
    let degrees = micro_minutes / 60_000_000;
    let minutes = micro_minutes % 60_000_000;

    format!(
        "{degrees:0width$}{:02}.{:06}",
        minutes / 1_000_000,
        minutes % 1_000_000,
        width = degree_digits,
    )
}

/// One generated sentence and the values it was generated from.
#[derive(Debug, Clone)]
pub struct Sample {
    pub sentence: String,
    pub fix: FixRecord,
}

/// An endless iterator of random-walk [`Sample`]s.
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::{decode, generator::Generator};
/// use rand::{SeedableRng, rngs::StdRng};
/// use time::{Date, Month};
///
/// let start = Date::from_calendar_date(2013, Month::July, 2)
///     .unwrap()
///     .with_hms(10, 26, 42)
///     .unwrap();
///
/// for sample in Generator::new(StdRng::seed_from_u64(7), start).take(10) {
///     assert!(!decode(&sample.sentence).is_malformed());
/// }
/// ```
#[derive(Debug)]
pub struct Generator<R> {
    rng: R,
    clock: PrimitiveDateTime,
    latitude: f64,
    longitude: f64,
    ground_speed: f64,
    heading: f64,
    magnetic_variation: f64,
}

impl<R: Rng> Generator<R> {
    /// Creates a generator whose first sentence is stamped `start`.
    pub fn new(rng: R, start: PrimitiveDateTime) -> Self {
        Self {
            rng,
            clock: start,
            latitude: 36.0 + 23.3452323 / 60.0,
            longitude: -(124.0 + 38.242425 / 60.0),
            ground_speed: 3.728,
            heading: 54.0897,
            magnetic_variation: 12.4368,
        }
    }

    fn step(&mut self, scale: f64) -> f64 {
        self.rng.gen_range(-scale..=scale)
    }

    fn advance(&mut self) {
        self.clock += TICK;

        let latitude = self.latitude + self.step(0.02 / 60.0);
        self.latitude = latitude.clamp(-90.0, 90.0);

        let longitude = self.longitude + self.step(0.02 / 60.0);
        self.longitude = (longitude + 180.0).rem_euclid(360.0) - 180.0;

        let ground_speed = self.ground_speed + self.step(2.0);
        self.ground_speed = ground_speed.abs();

        let heading = self.heading + self.step(0.02);
        self.heading = heading.rem_euclid(360.0);
    }
}

impl<R: Rng> Iterator for Generator<R> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let status = if self.rng.gen_bool(VOID_PROBABILITY) {
            Status::Void
        } else {
            Status::Active
        };

        let fix = FixRecord {
            hour: self.clock.hour(),
            minute: self.clock.minute(),
            second: self.clock.second(),
            status,
            latitude: self.latitude,
            longitude: self.longitude,
            ground_speed: self.ground_speed,
            heading: self.heading,
            day: self.clock.day(),
            month: u8::from(self.clock.month()),
            year: self.clock.year().rem_euclid(100) as u8,
            magnetic_variation: self.magnetic_variation,
        };
        let sentence = encode(&fix);

        self.advance();

        Some(Sample { sentence, fix })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate() {
        assert_eq!(coordinate(48.0 + 13.794316 / 60.0, 2), "4813.794316");
        assert_eq!(coordinate(-(16.0 + 21.569304 / 60.0), 3), "01621.569304");
        assert_eq!(coordinate(0.0, 2), "0000.000000");
        assert_eq!(coordinate(180.0, 3), "18000.000000");
        // rounds up into the next degree instead of writing 60 minutes
        assert_eq!(coordinate(12.9999999999, 2), "1300.000000");
    }
}
