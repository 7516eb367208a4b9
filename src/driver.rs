//! # Batch Driver
//!
//! Reads newline-separated sentences from a stream, decodes each one and writes
//! the time and position of every fix to an output stream.
//!
//! Decoding failures are not errors here: they are counted in the [`Summary`]
//! and logged at `debug` level. Only I/O failures stop a run early.

use std::io::{self, BufRead, Write};

use log::{debug, info, trace};

use crate::{Decoder, FixRecord};

/// Fix limit used by `rmc parse` unless overridden.
pub const DEFAULT_MAX_FIXES: usize = 100;

/// Counts gathered over one [`run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Non-blank lines read
    pub sentences: usize,
    /// Sentences that produced a fix
    pub fixes: usize,
    /// Valid sentences with a void status
    pub no_fix: usize,
    /// Sentences that failed to decode
    pub malformed: usize,
}

/// Reads one line into `buf` and returns it without its terminator.
///
/// A trailing `\n` is removed, along with a `\r` directly before it. The last
/// line of a stream is returned whole when it has no terminator. Returns
/// `None` at end of input.
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::driver::read_sentence;
///
/// let mut input = &b"$GPRMC,1\r\n$GPRMC,2"[..];
/// let mut buf = Vec::new();
///
/// assert_eq!(read_sentence(&mut input, &mut buf).unwrap(), Some(&b"$GPRMC,1"[..]));
/// assert_eq!(read_sentence(&mut input, &mut buf).unwrap(), Some(&b"$GPRMC,2"[..]));
/// assert_eq!(read_sentence(&mut input, &mut buf).unwrap(), None);
/// ```
pub fn read_sentence<'b, R: BufRead>(
    reader: &mut R,
    buf: &'b mut Vec<u8>,
) -> io::Result<Option<&'b [u8]>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }

    let mut line = buf.as_slice();
    if let Some(stripped) = line.strip_suffix(b"\n") {
        line = stripped;
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
    }

    Ok(Some(line))
}

/// Formats a fix as `HH:MM:SS, latitude, longitude`.
///
/// # Examples
///
/// ```rust
/// use nmea0183_rmc::{decode, driver::format_fix};
///
/// let outcome = decode("$GPRMC,102642.03,A,4813.7943164,S,01621.5693035,W,7.158,156.6705,020713,020.32,E*51");
/// assert_eq!(format_fix(outcome.fix().unwrap()), "10:26:42, -48.229905, -16.359488");
/// ```
pub fn format_fix(fix: &FixRecord) -> String {
    format!(
        "{:02}:{:02}:{:02}, {:.6}, {:.6}",
        fix.hour, fix.minute, fix.second, fix.latitude, fix.longitude
    )
}

/// Decodes every line of `input`, writing one [`format_fix`] line per fix.
///
/// Stops at end of input, or once `max_fixes` fixes have been written. Blank
/// lines are skipped and not counted.
pub fn run<R, W>(
    mut input: R,
    mut output: W,
    decoder: &Decoder,
    max_fixes: Option<usize>,
) -> io::Result<Summary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = Summary::default();
    let mut buf = Vec::new();

    while max_fixes.is_none_or(|max| summary.fixes < max) {
        let Some(line) = read_sentence(&mut input, &mut buf)? else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        summary.sentences += 1;

        match decoder.try_decode(line) {
            Ok(Some(fix)) => {
                summary.fixes += 1;
                writeln!(output, "{}", format_fix(&fix))?;
            }
            Ok(None) => {
                summary.no_fix += 1;
                trace!("sentence {}: no fix", summary.sentences);
            }
            Err(e) => {
                summary.malformed += 1;
                debug!("sentence {}: {e}", summary.sentences);
            }
        }
    }

    output.flush()?;

    info!(
        "parsed {} sentences to obtain {} fixes ({} without fix, {} malformed)",
        summary.sentences, summary.fixes, summary.no_fix, summary.malformed
    );

    Ok(summary)
}
