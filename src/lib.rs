//! # NMEA 0183 RMC Decoder
//!
//! This library decodes the RMC (Recommended Minimum Navigation Information)
//! sentence of the NMEA 0183 protocol:
//! `$GPRMC,hhmmss.ss,A,ddmm.mmmm,N,dddmm.mmmm,E,x.x,x.x,ddmmyy,x.x,E*CC`
//!
//! Decoding runs in two phases. The sentence framing (header and checksum) is
//! validated first, then each comma-delimited field is copied into a bounded
//! scratch buffer and decoded. Every input is classified as one of:
//! - [`ParseOutcome::FixObtained`] with a [`FixRecord`]
//! - [`ParseOutcome::NoFix`] when the status is void
//! - [`ParseOutcome::Malformed`] for anything else
//!
//! [`try_decode`] keeps the specific [`Error`] for diagnostics.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_rmc::{ParseOutcome, decode};
//!
//! let sentence = "$GPRMC,102642.03,A,4813.7943164,S,01621.5693035,W,7.158,156.6705,020713,020.32,E*51";
//!
//! if let ParseOutcome::FixObtained(fix) = decode(sentence) {
//!     println!("{:02}:{:02}:{:02} {:.6} {:.6}", fix.hour, fix.minute, fix.second, fix.latitude, fix.longitude);
//! }
//! ```
//!
//! ## Features
//!
//! - `time`: conversion of decoded fields into [`time`](https://docs.rs/time) values
//! - `serde`: `Serialize`/`Deserialize` for the decoded records
//! - `generator`: synthetic sentence generator (implies `time`)
//! - `cli`: the `rmc` command-line tool (implies `generator`, enabled by default)

pub mod driver;
pub mod error;
#[cfg(feature = "generator")]
pub mod generator;
mod nmea0183;
pub mod parsing;
mod rmc;

pub use error::{Error, IResult};
pub use nmea0183::*;
pub use rmc::*;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
