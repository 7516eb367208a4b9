//! # RMC Decoder
//!
//! Decodes one `$GPRMC` sentence into a [`FixRecord`].
//!
//! ```text
//!         1         2 3            4 5             6 7     8        9      10     11
//!         |         | |            | |             | |     |        |      |      |
//!  $GPRMC,hhmmss.ss,A,ddmm.mmmmmmm,a,dddmm.mmmmmmm,a,x.xxx,xxx.xxxx,ddmmyy,xxx.xx,a*hh
//! ```
//!
//! 1. Time of fix (UTC)
//! 2. Status, `A` = active or `V` = void
//! 3. Latitude, 4. `N` or `S`
//! 5. Longitude, 6. `E` or `W`
//! 7. Ground speed in knots
//! 8. Heading in degrees
//! 9. Date of fix
//! 10. Magnetic variation in degrees, 11. `E` or `W`
//!
//! Decoding is a pure function of the input: nothing is retained between calls
//! and the input is only borrowed for the duration of a call.

mod parse;

use core::fmt;

use nom::{Err, Parser, error::ErrorKind};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, IResult,
    error::or_fail,
    frame,
    nmea0183::until_nul,
    parsing::{consumed, field, last_field},
};

/// A trait for single-letter fields that can be parsed from a token.
pub trait Parsable: Sized {
    /// Parses the input and returns a result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nmea0183_rmc::{IResult, Parsable, Status};
    ///
    /// let result: IResult<_, _> = Status::parser("A");
    /// assert_eq!(result, Ok(("", Status::Active)));
    /// ```
    fn parser(input: &str) -> IResult<&str, Self>;
}

macro_rules! letter_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// The letter this value is written as.
            pub const fn letter(self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }

        impl Parsable for $name {
            fn parser(i: &str) -> IResult<&str, Self> {
                nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*)).parse(i)
            }
        }
    };
}

letter_enum! {
    /// Fix status
    pub enum Status {
        /// A - Active, a fix is available
        'A' => Active,
        /// V - Void, no fix
        'V' => Void,
    }
}

letter_enum! {
    /// Latitude hemisphere
    pub enum NorthSouth {
        /// N - North, positive
        'N' => North,
        /// S - South, negative
        'S' => South,
    }
}

letter_enum! {
    /// Longitude hemisphere, also used for magnetic variation
    pub enum EastWest {
        /// E - East, positive
        'E' => East,
        /// W - West, negative
        'W' => West,
    }
}

/// Positional fields of an RMC sentence, in wire order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// 1. `hhmmss.ss`
    Time,
    /// 2. `A` or `V`
    Status,
    /// 3. `ddmm.mmmm`
    Latitude,
    /// 4. `N` or `S`
    LatitudeDirection,
    /// 5. `dddmm.mmmm`
    Longitude,
    /// 6. `E` or `W`
    LongitudeDirection,
    /// 7. Knots
    GroundSpeed,
    /// 8. Degrees
    Heading,
    /// 9. `ddmmyy`
    Date,
    /// 10. Degrees
    MagneticVariation,
    /// 11. `E` or `W`
    VariationDirection,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Time => "time",
            Field::Status => "status",
            Field::Latitude => "latitude",
            Field::LatitudeDirection => "latitude direction",
            Field::Longitude => "longitude",
            Field::LongitudeDirection => "longitude direction",
            Field::GroundSpeed => "ground speed",
            Field::Heading => "heading",
            Field::Date => "date",
            Field::MagneticVariation => "magnetic variation",
            Field::VariationDirection => "magnetic variation direction",
        };
        f.write_str(name)
    }
}

/// A decoded RMC fix.
///
/// Values are stored exactly as decoded. Under [`Validation::Permissive`] the
/// time, date, and coordinate ranges are not checked, so a malformed but
/// syntactically valid sentence can produce e.g. `minute == 61`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixRecord {
    /// UTC hour of the fix
    pub hour: u8,
    /// UTC minute of the fix
    pub minute: u8,
    /// UTC second of the fix, fraction discarded
    pub second: u8,
    /// Fix status, always [`Status::Active`] for a decoded record
    pub status: Status,
    /// Latitude in decimal degrees, negative south
    pub latitude: f64,
    /// Longitude in decimal degrees, negative west
    pub longitude: f64,
    /// Speed over ground in knots
    pub ground_speed: f64,
    /// Course over ground in degrees
    pub heading: f64,
    /// Day of month
    pub day: u8,
    /// Month of year
    pub month: u8,
    /// Two-digit year
    pub year: u8,
    /// Magnetic variation in degrees, negative west
    pub magnetic_variation: f64,
}

#[cfg(feature = "time")]
impl FixRecord {
    /// Fix time, or `None` if the decoded fields are not a valid time of day.
    pub fn time(&self) -> Option<time::Time> {
        time::Time::from_hms(self.hour, self.minute, self.second).ok()
    }

    /// Fix date, or `None` if the decoded fields are not a valid calendar date.
    ///
    /// Two-digit years from 83 to 99 are taken as 19xx, all others as 20xx.
    pub fn date(&self) -> Option<time::Date> {
        let year = match self.year {
            83..=99 => 1900 + self.year as i32,
            _ => 2000 + self.year as i32,
        };
        let month = time::Month::try_from(self.month).ok()?;

        time::Date::from_calendar_date(year, month, self.day).ok()
    }
}

/// Result of decoding one sentence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseOutcome {
    /// The sentence is valid and reports a fix.
    FixObtained(FixRecord),
    /// The sentence is valid but its status is void.
    NoFix,
    /// The sentence failed validation. No record is produced.
    Malformed,
}

impl ParseOutcome {
    /// Returns the fix, if one was obtained.
    pub fn fix(&self) -> Option<&FixRecord> {
        match self {
            ParseOutcome::FixObtained(fix) => Some(fix),
            _ => None,
        }
    }

    /// Returns `true` for [`ParseOutcome::FixObtained`].
    pub fn is_fix(&self) -> bool {
        matches!(self, ParseOutcome::FixObtained(_))
    }

    /// Returns `true` for [`ParseOutcome::Malformed`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseOutcome::Malformed)
    }
}

impl From<Result<Option<FixRecord>, Error>> for ParseOutcome {
    fn from(result: Result<Option<FixRecord>, Error>) -> Self {
        match result {
            Ok(Some(fix)) => ParseOutcome::FixObtained(fix),
            Ok(None) => ParseOutcome::NoFix,
            Err(_) => ParseOutcome::Malformed,
        }
    }
}

/// Defines whether decoded values are checked against their natural ranges.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Only the syntax of each field is checked.
    ///
    /// Two-digit groups may hold any value from 00 to 99, coordinates are not
    /// bounded, and headings are not wrapped.
    #[default]
    Permissive,

    /// Syntax and ranges are checked.
    ///
    /// - time: hour 0-23, minute 0-59, second 0-59
    /// - date: day 1-31, month 1-12 (no per-month or leap-year check)
    /// - coordinates: minutes below 60, latitude within ±90, longitude within ±180
    /// - heading: below 360
    /// - magnetic variation: within ±180
    ///
    /// A value outside its range fails with [`Error::OutOfRange`].
    Strict,
}

/// An RMC sentence decoder.
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::{Decoder, Error, Field, ParseOutcome, Validation};
///
/// let sentence = "$GPRMC,102642.03,A,4813.7943164,S,01621.5693035,W,7.158,156.6705,020713,020.32,E*51";
///
/// let decoder = Decoder::default();
/// let fix = match decoder.decode(sentence) {
///     ParseOutcome::FixObtained(fix) => fix,
///     other => panic!("unexpected outcome: {other:?}"),
/// };
/// assert_eq!((fix.hour, fix.minute, fix.second), (10, 26, 42));
/// assert!((fix.latitude + 48.2299).abs() < 1e-4);
/// assert!((fix.longitude + 16.3595).abs() < 1e-4);
///
/// // Diagnostics are available without changing the outcome
/// let sentence = "$GPRMC,102642.03,A,4813.7943164,I,01621.5693035,E,7.158,156.6705,020713,020.32,E*59";
/// assert_eq!(
///     decoder.try_decode(sentence),
///     Err(Error::DirectionInvalid(Field::LatitudeDirection))
/// );
/// assert_eq!(decoder.decode(sentence), ParseOutcome::Malformed);
///
/// // Range checks are opt-in
/// let strict = Decoder::new(Validation::Strict);
/// let sentence = "$GPRMC,102672.03,V,,,,,,,,,*1C";
/// assert_eq!(decoder.decode(sentence), ParseOutcome::NoFix);
/// assert_eq!(strict.try_decode(sentence), Err(Error::OutOfRange(Field::Time)));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    validation: Validation,
}

impl Decoder {
    /// Creates a decoder with the given [`Validation`] policy.
    pub const fn new(validation: Validation) -> Self {
        Self { validation }
    }

    /// The [`Validation`] policy this decoder applies.
    pub fn validation(&self) -> Validation {
        self.validation
    }

    /// Decodes one sentence into a [`ParseOutcome`].
    ///
    /// The input must be a single sentence with no line terminator. It ends at
    /// the end of the slice or at the first NUL byte, whichever comes first.
    pub fn decode(&self, sentence: impl AsRef<[u8]>) -> ParseOutcome {
        self.try_decode(sentence).into()
    }

    /// Decodes one sentence, reporting why a malformed sentence was rejected.
    ///
    /// Returns `Ok(Some(fix))` for an active fix, `Ok(None)` for a void status
    /// and `Err` for anything malformed. After a void status no further field
    /// is looked at.
    pub fn try_decode(&self, sentence: impl AsRef<[u8]>) -> Result<Option<FixRecord>, Error> {
        let sentence = until_nul(sentence.as_ref());

        let (_, body) = frame(sentence)?;
        let body = core::str::from_utf8(body).map_err(|_| Error::NonAscii)?;
        let (_, fix) = self.fields(body)?;

        Ok(fix)
    }

    fn fields<'a>(&self, i: &'a str) -> IResult<&'a str, Option<FixRecord>> {
        let (i, token) = field(Field::Time)(i)?;
        let (hour, minute, second) = convert(&token, parse::time, Error::TimeFormatInvalid)?;
        self.check(hour <= 23 && minute <= 59 && second <= 59, Field::Time)?;

        let (i, token) = field(Field::Status)(i)?;
        let status = convert(
            &token,
            consumed(Status::parser, ErrorKind::Eof),
            Error::DirectionInvalid(Field::Status),
        )?;
        if status == Status::Void {
            return Ok((i, None));
        }

        let (i, latitude) = self.coordinate(
            i,
            (Field::Latitude, Field::LatitudeDirection),
            NorthSouth::South,
            90.0,
        )?;
        let (i, longitude) = self.coordinate(
            i,
            (Field::Longitude, Field::LongitudeDirection),
            EastWest::West,
            180.0,
        )?;

        let (i, token) = field(Field::GroundSpeed)(i)?;
        let ground_speed = number(&token, Field::GroundSpeed)?;

        let (i, token) = field(Field::Heading)(i)?;
        let heading = number(&token, Field::Heading)?;
        self.check(heading < 360.0, Field::Heading)?;

        let (i, token) = field(Field::Date)(i)?;
        let (day, month, year) = convert(&token, parse::date, Error::DateFormatInvalid)?;
        self.check(
            (1..=31).contains(&day) && (1..=12).contains(&month),
            Field::Date,
        )?;

        let (i, token) = field(Field::MagneticVariation)(i)?;
        let mut magnetic_variation = number(&token, Field::MagneticVariation)?;
        self.check(magnetic_variation <= 180.0, Field::MagneticVariation)?;

        let (i, token) = last_field(Field::VariationDirection)(i)?;
        let direction = convert(
            &token,
            consumed(EastWest::parser, ErrorKind::Eof),
            Error::DirectionInvalid(Field::VariationDirection),
        )?;
        if direction == EastWest::West {
            magnetic_variation = -magnetic_variation;
        }

        Ok((
            i,
            Some(FixRecord {
                hour,
                minute,
                second,
                status,
                latitude,
                longitude,
                ground_speed,
                heading,
                day,
                month,
                year,
                magnetic_variation,
            }),
        ))
    }

    /// Decodes a coordinate value and its direction letter.
    fn coordinate<'a, H>(
        &self,
        i: &'a str,
        (value, direction): (Field, Field),
        negative: H,
        limit: f64,
    ) -> IResult<&'a str, f64>
    where
        H: Parsable + PartialEq,
    {
        let (i, token) = field(value)(i)?;
        let (degrees, minutes) = convert(
            &token,
            consumed(parse::degrees_minutes, ErrorKind::Eof),
            Error::CoordinateFormatInvalid(value),
        )?;
        self.check(minutes < 60.0, value)?;

        let (i, token) = field(direction)(i)?;
        let hemisphere = convert(
            &token,
            consumed(H::parser, ErrorKind::Eof),
            Error::DirectionInvalid(direction),
        )?;

        let mut coordinate = degrees + minutes / 60.0;
        self.check(coordinate <= limit, value)?;
        if hemisphere == negative {
            coordinate = -coordinate;
        }

        Ok((i, coordinate))
    }

    fn check(&self, in_range: bool, field: Field) -> Result<(), Err<Error>> {
        if self.validation == Validation::Strict && !in_range {
            return Err(Err::Error(Error::OutOfRange(field)));
        }

        Ok(())
    }
}

/// Runs `parser` over a whole token, reporting `error` on any failure.
fn convert<'a, T, P>(token: &'a str, mut parser: P, error: Error) -> Result<T, Err<Error>>
where
    P: Parser<&'a str, Output = T, Error = Error>,
{
    or_fail(parser.parse(token), error).map(|(_, value)| value)
}

/// A plain decimal field. An empty field reads as zero.
fn number(token: &str, field: Field) -> Result<f64, Err<Error>> {
    if token.is_empty() {
        return Ok(0.0);
    }

    convert(
        token,
        consumed(parse::decimal, ErrorKind::Eof),
        Error::NumberFormatInvalid(field),
    )
}

/// Decodes one sentence with the default, permissive [`Decoder`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::{ParseOutcome, decode};
///
/// let sentence = "$GPRMC,102642.03,V,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*49";
/// assert_eq!(decode(sentence), ParseOutcome::NoFix);
///
/// let corrupted = "$GPRMC,102642.03,V,4813.7943164,N,01621.5693035,E,7.158,156.6705,020713,020.32,E*5E";
/// assert_eq!(decode(corrupted), ParseOutcome::Malformed);
/// ```
pub fn decode(sentence: impl AsRef<[u8]>) -> ParseOutcome {
    Decoder::default().decode(sentence)
}

/// Decodes one sentence with the default decoder, keeping the error.
///
/// See [`Decoder::try_decode`].
pub fn try_decode(sentence: impl AsRef<[u8]>) -> Result<Option<FixRecord>, Error> {
    Decoder::default().try_decode(sentence)
}
