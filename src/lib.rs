//! Non-Drop-Frame Timecode Library
//!
//! This crate provides a single value type, [`Timecode`], representing a
//! non-drop-frame video timecode (`HH:MM:SS:FF`) at a given frame rate:
//!
//! - **Parsing and formatting**: loose textual input is normalized into the
//!   canonical `HH:MM:SS:FF` form, and every value formats back to it
//! - **Frame-count conversion**: bidirectional conversion between the text
//!   form and an absolute frame count at the rounded integer rate
//! - **Frame-rate handling**: real rates are stored as given, with the NTSC
//!   `23` / `23.98` shorthands aliased to 23.976
//! - **Arithmetic and comparison**: operators over timecode, frame-count,
//!   and text operands, always yielding a new value at the left rate
//!
//! Drop-frame counting and 24-hour wraparound are out of scope.
//!
//! # Quick Start
//!
//! ```rust
//! use framestamp::{FrameRate, Timecode};
//!
//! let rate = FrameRate::new(23.976).unwrap();
//! let tc = Timecode::new("10:10:10:10", rate).unwrap();
//! assert_eq!(tc.to_string(), "10:10:10:10");
//!
//! // Arithmetic borrows across fields at the nominal rate (24 here).
//! let earlier = (tc - 11i64).unwrap();
//! assert_eq!(earlier.to_string(), "10:10:09:23");
//!
//! // Loose input is normalized before validation.
//! let padded = Timecode::new("1", rate).unwrap();
//! assert_eq!(padded.to_string(), "00:00:00:01");
//! ```
//!
//! # Rate Changes
//!
//! A rate change returns a new value; the caller chooses whether the
//! displayed text or the absolute frame count is preserved:
//!
//! ```rust
//! use framestamp::{FrameRate, RateChange, Timecode};
//!
//! let tc = Timecode::new("01:00:00:00", FrameRate::new(24.0).unwrap()).unwrap();
//! let pal = tc
//!     .with_frame_rate(FrameRate::new(25.0).unwrap(), RateChange::PreserveTimecode)
//!     .unwrap();
//! assert_eq!(pal.to_string(), "01:00:00:00");
//! assert_eq!(pal.frames(), 90_000);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod random;
pub mod rate;
pub mod timecode;

pub use error::{Result, TimecodeError};
pub use random::random_timecode;
pub use rate::{FrameRate, NTSC_FILM_RATE};
pub use timecode::{is_timecode, Operand, RateChange, Timecode};

/// Maximum hours value in a timecode (23).
pub const MAX_HOURS: u8 = 23;

/// Maximum minutes value in a timecode (59).
pub const MAX_MINUTES: u8 = 59;

/// Maximum seconds value in a timecode (59).
pub const MAX_SECONDS: u8 = 59;

/// Maximum value of the frames field accepted by validation (59).
///
/// The format check is rate-independent, so frame 59 passes validation
/// even at rates where it never occurs.
pub const MAX_FRAMES_FIELD: u8 = 59;

/// Parse a timecode string at a real frame rate.
///
/// Convenience for constructing the [`FrameRate`] and the [`Timecode`] in
/// one call.
///
/// # Example
/// ```rust
/// use framestamp::timecode;
///
/// let tc = timecode("01:30:45:12", 24.0).unwrap();
/// assert_eq!(tc.to_string(), "01:30:45:12");
/// ```
pub fn timecode(text: &str, fps: f64) -> Result<Timecode> {
    Timecode::new(text, FrameRate::new(fps)?)
}
