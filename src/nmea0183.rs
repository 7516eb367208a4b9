//! # RMC Sentence Framing
//!
//! This module validates the outer structure of an RMC sentence before any field
//! is trusted: `$GPRMC,D1,D2,...,Dn*CC`
//!
//! Framing runs in a fixed order:
//! 1. The sentence must start with the exact `$GPRMC,` header
//! 2. The sentence must be ASCII-only
//! 3. A `*` delimiter must follow, with exactly two hex digits after it
//! 4. The XOR of every byte between `$` and `*` must equal the declared checksum

use nom::{
    AsBytes, AsChar, Compare, Err, FindSubstring, Input, Parser,
    bytes::complete::{tag, take, take_until},
    character::complete::{char, hex_digit1},
    error::ErrorKind,
    number::complete::hex_u32,
};

use crate::{Error, IResult, error::or_fail, parsing::consumed};

/// Talker and sentence prefix every accepted sentence starts with.
pub const RMC_HEADER: &str = "$GPRMC,";

/// Validates the header and checksum of an RMC sentence.
///
/// On success the output is the field body: everything after the header and
/// before the `*` delimiter. The remaining input is always empty.
///
/// # Errors
///
/// - [`Error::HeaderMismatch`] if the input does not start with [`RMC_HEADER`]
/// - [`Error::NonAscii`] if any byte is outside the ASCII range
/// - [`Error::ChecksumDelimiterMissing`] if there is no `*`
/// - [`Error::ChecksumFormatInvalid`] if `*` is not followed by exactly two hex digits
/// - [`Error::ChecksumMismatch`] if the declared and calculated checksums differ
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::{Error, IResult, frame};
///
/// let result: IResult<_, _> = frame("$GPRMC,data*77");
/// assert_eq!(result, Ok(("", "data")));
///
/// let result: IResult<_, _> = frame(&b"$GPRMC,data*77"[..]);
/// assert_eq!(result, Ok((&b""[..], &b"data"[..])));
///
/// let result: IResult<_, _> = frame("$GPGGA,data*77");
/// assert_eq!(result, Err(nom::Err::Error(Error::HeaderMismatch)));
///
/// let result: IResult<_, _> = frame("$GPRMC,data*78");
/// assert_eq!(
///     result,
///     Err(nom::Err::Error(Error::ChecksumMismatch { expected: 0x77, found: 0x78 }))
/// );
/// ```
pub fn frame<'a, I>(i: I) -> IResult<I, I>
where
    I: Input + AsBytes + Compare<&'a str> + FindSubstring<&'a str>,
    <I as Input>::Item: AsChar,
{
    or_fail(tag(RMC_HEADER).parse(i.clone()), Error::HeaderMismatch)?;

    if !i.as_bytes().is_ascii() {
        return Err(Err::Error(Error::NonAscii));
    }

    let (i, _) = char('$').parse(i)?;
    let (cc, data) = or_fail(take_until("*").parse(i), Error::ChecksumDelimiterMissing)?;
    let (rest, found) = checksum_field(cc)?;

    let (data, expected) = checksum(data);
    if expected != found {
        return Err(Err::Error(Error::ChecksumMismatch { expected, found }));
    }

    // the header was matched above; skip it without the leading '$'
    let (fields, _) = take(RMC_HEADER.len() - 1).parse(data)?;

    Ok((rest, fields))
}

/// Parses the trailing `*CC` checksum field.
///
/// The delimiter must be followed by exactly two hexadecimal digits and nothing
/// else, since the caller strips any line terminator before decoding.
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::{Error, IResult, checksum_field};
///
/// let result: IResult<_, _> = checksum_field("*5E");
/// assert_eq!(result, Ok(("", 0x5E)));
///
/// let result: IResult<_, _> = checksum_field("*5E\r\n");
/// assert_eq!(result, Err(nom::Err::Error(Error::ChecksumFormatInvalid)));
/// ```
pub fn checksum_field<I>(i: I) -> IResult<I, u8>
where
    I: Input + AsBytes,
    <I as Input>::Item: AsChar,
{
    let (cc, _) = char('*').parse(i)?;
    let (rest, cc) = or_fail(
        consumed(take(2u8), ErrorKind::Count).parse(cc),
        Error::ChecksumFormatInvalid,
    )?;
    let (_, cc) = or_fail(
        consumed(hex_digit1, ErrorKind::IsA).parse(cc),
        Error::ChecksumFormatInvalid,
    )?;
    let (_, cc) = hex_u32.parse(cc)?;

    Ok((rest, cc as u8))
}

/// Calculates the NMEA 0183 checksum for the given message content.
///
/// The checksum is the XOR of every byte between the `$` prefix and the `*`
/// delimiter, accumulated in an unsigned 8-bit value.
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::checksum;
///
/// let (_, cc) = checksum("GPRMC,data");
/// assert_eq!(cc, 0x77);
/// ```
pub fn checksum<I>(input: I) -> (I, u8)
where
    I: Input + AsBytes,
{
    let calculated_checksum = input
        .as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte);

    (input, calculated_checksum)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::format_checksum;
///
/// assert_eq!(format_checksum(0x5E), "5E");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

/// Cuts the input at the first NUL byte, if any.
pub(crate) fn until_nul(sentence: &[u8]) -> &[u8] {
    match sentence.iter().position(|&b| b == 0) {
        Some(end) => &sentence[..end],
        None => sentence,
    }
}
