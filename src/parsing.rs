//! # Parsing Utilities
//!
//! Field tokenization for the comma-delimited sentence body, and a combinator
//! that ensures a parser consumes its whole token.
//!
//! Every token is copied into a fixed-capacity [`Scratch`] buffer before it is
//! converted. Tokens that do not fit are rejected with
//! [`Error::FieldOverflow`] instead of being truncated.

use nom::{
    Err, Input, Mode, OutputMode, PResult, Parser,
    bytes::complete::take_till,
    character::complete::char,
    combinator::rest,
    error::{ErrorKind, ParseError},
    sequence::terminated,
};

use crate::{Error, Field, IResult, error::or_fail};

/// Capacity of the scratch buffer a single field is copied into.
pub const FIELD_CAPACITY: usize = 16;

/// Bounded copy of a single field.
pub type Scratch = heapless::String<FIELD_CAPACITY>;

/// Returns a parser for one comma-terminated field.
///
/// The comma is consumed but not included in the token.
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::{Error, Field, IResult, parsing::field};
///
/// let result: IResult<_, _> = field(Field::GroundSpeed)("7.158,156.6705");
/// let (rest, token) = result.unwrap();
/// assert_eq!((rest, token.as_str()), ("156.6705", "7.158"));
///
/// let result: IResult<_, _> = field(Field::GroundSpeed)("7.158");
/// assert_eq!(
///     result.unwrap_err(),
///     nom::Err::Error(Error::FieldMissing(Field::GroundSpeed))
/// );
/// ```
pub fn field(field: Field) -> impl Fn(&str) -> IResult<&str, Scratch> {
    move |i: &str| {
        let (i, token) = or_fail(
            terminated(take_till(|c| c == ','), char(',')).parse(i),
            Error::FieldMissing(field),
        )?;

        Ok((i, scratch(token, field)?))
    }
}

/// Returns a parser for the final field, which runs up to the end of the body.
pub fn last_field(field: Field) -> impl Fn(&str) -> IResult<&str, Scratch> {
    move |i: &str| {
        let (i, token) = rest.parse(i)?;

        Ok((i, scratch(token, field)?))
    }
}

fn scratch(token: &str, field: Field) -> Result<Scratch, Err<Error>> {
    let mut buf = Scratch::new();
    buf.push_str(token)
        .map_err(|_| Err::Error(Error::FieldOverflow(field)))?;

    Ok(buf)
}

/// Ensures that the parser consumes all input.
///
/// # Arguments
///
/// * `f` - The parser to run
/// * `e` - Error kind to return if input is not fully consumed
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::parsing::consumed;
/// use nom::{IResult, Parser, bytes::complete::take, error::ErrorKind};
///
/// // Parse all 3 bytes
/// let mut parser = consumed(take(3u8), ErrorKind::Count);
/// let result: IResult<_, _> = parser.parse("abc");
/// assert!(result.is_ok());
///
/// // This would fail because not all input is consumed
/// let result: IResult<_, _> = parser.parse("abcd");
/// assert!(result.is_err());
/// ```
pub fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    Consumed { f, e }
}

struct Consumed<F> {
    f: F,
    e: ErrorKind,
}

impl<I, F> Parser<I> for Consumed<F>
where
    I: Input,
    F: Parser<I>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = <F as Parser<I>>::Error;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| {
                <F as Parser<I>>::Error::from_error_kind(i, self.e)
            })));
        }

        Ok((i, o))
    }
}
