//! # Error Types
//!
//! This module defines the error type returned by every stage of RMC decoding.
//!
//! The caller-facing [`ParseOutcome`](crate::ParseOutcome) collapses all of
//! these into `Malformed`; the individual variants exist so that diagnostics
//! and tests can tell the failure conditions apart.

use core::fmt;

use nom::error::{ErrorKind, FromExternalError, ParseError};

use crate::Field;

/// Holds the result of parsing functions.
///
/// The `Ok` side is a pair containing the remainder of the input (the part of the data that
/// was not parsed) and the produced value. The `Err` side contains an instance of `nom::Err`
/// wrapping an [`Error`].
pub type IResult<I, O> = nom::IResult<I, O, Error>;

/// Represents all possible errors that can occur while decoding an RMC sentence.
///
/// None of the variants borrow from the input, so an error can outlive the
/// buffer it was produced from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The sentence does not start with the exact `$GPRMC,` header.
    HeaderMismatch,

    /// The provided input contains non-ASCII characters.
    ///
    /// NMEA messages must be ASCII-only for proper parsing and checksum calculation.
    NonAscii,

    /// No `*` checksum delimiter was found after the header.
    ChecksumDelimiterMissing,

    /// The `*` delimiter is not followed by exactly two hexadecimal digits.
    ChecksumFormatInvalid,

    /// The checksum of the sentence was corrupt or incorrect.
    ChecksumMismatch {
        /// The checksum calculated from the message content
        expected: u8,
        /// The checksum found in the message
        found: u8,
    },

    /// A comma delimiter was expected before the end of the sentence.
    FieldMissing(Field),

    /// The field does not fit in the decoder's scratch buffer.
    FieldOverflow(Field),

    /// The time field is not `HHMMSS.` followed by an optional fraction.
    TimeFormatInvalid,

    /// The date field is not exactly six digits `DDMMYY`.
    DateFormatInvalid,

    /// A latitude or longitude is missing its decimal point, has fewer than two
    /// digits before it, or contains non-digits.
    CoordinateFormatInvalid(Field),

    /// A status or direction letter is not one of the letters allowed for it.
    DirectionInvalid(Field),

    /// A plain decimal field (speed, heading, variation) is neither empty nor
    /// `digits[.digits]`.
    NumberFormatInvalid(Field),

    /// A syntactically valid value falls outside its range.
    ///
    /// Only reported under [`Validation::Strict`](crate::Validation::Strict).
    OutOfRange(Field),

    /// A low-level nom error that was not mapped to one of the variants above.
    ParsingError(ErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::HeaderMismatch => write!(f, "not an RMC sentence"),
            Error::NonAscii => write!(f, "non-ASCII input"),
            Error::ChecksumDelimiterMissing => write!(f, "no checksum"),
            Error::ChecksumFormatInvalid => write!(f, "improper checksum ending"),
            Error::ChecksumMismatch { expected, found } => {
                write!(f, "wrong checksum: expected {expected:02X}, found {found:02X}")
            }
            Error::FieldMissing(field) => write!(f, "missing {field} field"),
            Error::FieldOverflow(field) => write!(f, "{field} field too long"),
            Error::TimeFormatInvalid => write!(f, "invalid time"),
            Error::DateFormatInvalid => write!(f, "invalid date"),
            Error::CoordinateFormatInvalid(field) => write!(f, "invalid {field}"),
            Error::DirectionInvalid(field) => write!(f, "invalid {field}"),
            Error::NumberFormatInvalid(field) => write!(f, "invalid {field}"),
            Error::OutOfRange(field) => write!(f, "{field} out of range"),
            Error::ParsingError(kind) => write!(f, "parse error: {}", kind.description()),
        }
    }
}

impl core::error::Error for Error {}

impl<I> ParseError<I> for Error {
    fn from_error_kind(_: I, kind: ErrorKind) -> Self {
        Error::ParsingError(kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, EX> FromExternalError<I, EX> for Error {
    fn from_external_error(_: I, kind: ErrorKind, _: EX) -> Self {
        Error::ParsingError(kind)
    }
}

impl From<nom::Err<Error>> for Error {
    fn from(e: nom::Err<Error>) -> Self {
        match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
            nom::Err::Incomplete(_) => Error::ParsingError(ErrorKind::Complete),
        }
    }
}

/// Replaces any error in `result` with `error`.
///
/// Used at stage boundaries to turn generic nom failures into the typed
/// condition the stage reports.
pub(crate) fn or_fail<T>(
    result: Result<T, nom::Err<Error>>,
    error: Error,
) -> Result<T, nom::Err<Error>> {
    result.map_err(|_| nom::Err::Error(error))
}
