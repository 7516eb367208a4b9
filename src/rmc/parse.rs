use nom::{
    Err, Parser,
    bytes::complete::{take, take_while_m_n, take_while1},
    character::complete::{char, digit0},
    combinator::verify,
    error::ErrorKind,
    sequence::terminated,
};

use crate::{Error, IResult, parsing::consumed};

/// Two ASCII digits as an integer.
pub(crate) fn two_digits(i: &str) -> IResult<&str, u8> {
    take_while_m_n(2, 2, |c: char| c.is_ascii_digit())
        .map_res(str::parse::<u8>)
        .parse(i)
}

/// `HHMMSS.` followed by a fraction that is ignored.
pub(crate) fn time(i: &str) -> IResult<&str, (u8, u8, u8)> {
    terminated((two_digits, two_digits, two_digits), char('.')).parse(i)
}

/// Exactly `DDMMYY`.
pub(crate) fn date(i: &str) -> IResult<&str, (u8, u8, u8)> {
    consumed((two_digits, two_digits, two_digits), ErrorKind::Eof).parse(i)
}

/// `digits[.digits]`, no sign and no exponent.
pub(crate) fn decimal(i: &str) -> IResult<&str, f64> {
    verify(take_while1(|c: char| c.is_ascii_digit() || c == '.'), |s: &str| {
        s.starts_with(|c: char| c.is_ascii_digit()) && s.matches('.').count() <= 1
    })
    .map_res(str::parse::<f64>)
        .parse(i)
}

/// Splits `[D]DDMM.MMMM` into whole degrees and decimal minutes.
///
/// The two digits before the decimal point and everything after it are the
/// minutes; any digits before those are the degrees (none means zero).
pub(crate) fn degrees_minutes(i: &str) -> IResult<&str, (f64, f64)> {
    let point = match i.find('.') {
        Some(point) if point >= 2 => point,
        _ => return Err(Err::Error(Error::ParsingError(ErrorKind::Char))),
    };

    let (minutes, degrees) = take(point - 2).parse(i)?;
    let (_, degrees) = consumed(
        digit0.map_res(|d: &str| if d.is_empty() { Ok(0.0) } else { d.parse::<f64>() }),
        ErrorKind::Digit,
    )
    .parse(degrees)?;
    let (i, minutes) = decimal(minutes)?;

    Ok((i, (degrees, minutes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time() {
        assert_eq!(time("102642.03"), Ok(("03", (10, 26, 42))));
        assert_eq!(time("235959."), Ok(("", (23, 59, 59))));
        // the fraction is not checked for digits
        assert_eq!(time("000000.xy"), Ok(("xy", (0, 0, 0))));
        // permissive on ranges
        assert_eq!(time("996161.0"), Ok(("0", (99, 61, 61))));

        assert!(time("102642").is_err());
        assert!(time("10264.03").is_err());
        assert!(time("1026421.03").is_err());
        assert!(time("1O2642.03").is_err());
        assert!(time("").is_err());
    }

    #[test]
    fn test_date() {
        assert_eq!(date("020713"), Ok(("", (2, 7, 13))));
        assert_eq!(date("000000"), Ok(("", (0, 0, 0))));

        assert!(date("02071").is_err());
        assert!(date("0207131").is_err());
        assert!(date("02-713").is_err());
        assert!(date("").is_err());
    }

    #[test]
    fn test_decimal() {
        assert_eq!(decimal("7.158"), Ok(("", 7.158)));
        assert_eq!(decimal("156"), Ok(("", 156.0)));
        assert_eq!(decimal("020.32"), Ok(("", 20.32)));
        assert_eq!(decimal("3."), Ok(("", 3.0)));
        assert_eq!(decimal("0.0625"), Ok(("", 0.0625)));
        assert_eq!(decimal("7.158,156"), Ok((",156", 7.158)));

        assert!(decimal("").is_err());
        assert!(decimal(".5").is_err());
        assert!(decimal("-1.0").is_err());
        assert!(decimal("inf").is_err());
        assert!(decimal("7.1.58").is_err());
    }

    #[test]
    fn test_degrees_minutes() {
        assert_eq!(degrees_minutes("4813.7943164"), Ok(("", (48.0, 13.7943164))));
        assert_eq!(degrees_minutes("01621.5693035"), Ok(("", (16.0, 21.5693035))));
        assert_eq!(degrees_minutes("12.5"), Ok(("", (0.0, 12.5))));

        assert!(degrees_minutes("1.5693035").is_err());
        assert!(degrees_minutes("48137943164").is_err());
        assert!(degrees_minutes("4a13.79").is_err());
        assert!(degrees_minutes(".79").is_err());
        assert!(degrees_minutes("").is_err());
    }
}
