//! The non-drop-frame timecode value type.
//!
//! A [`Timecode`] owns an absolute frame count and a [`FrameRate`], and
//! converts bidirectionally between the count and the `HH:MM:SS:FF` text
//! form. All field arithmetic uses the rounded integer rate, so 23.976 fps
//! content is counted at exactly 24 frames per second.

use crate::error::{Result, TimecodeError};
use crate::rate::FrameRate;
use crate::{MAX_FRAMES_FIELD, MAX_HOURS, MAX_MINUTES, MAX_SECONDS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};
use std::sync::OnceLock;

const SECONDS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;

/// The `DD:DD:DD:DD` shape check, compiled once per process.
fn shape_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("timecode shape pattern")
    })
}

/// Check whether `text` is a syntactically and semantically valid
/// `HH:MM:SS:FF` timecode.
///
/// The shape must be exactly two digits and a colon, four times over, with
/// no other separators. Field ranges are hours 0-23 and minutes, seconds,
/// and frames 0-59.
///
/// The frames field is range-checked against 59 regardless of frame rate:
/// `"00:00:00:58"` passes even at 24 fps where frame 58 never occurs. This
/// looseness is an accepted boundary of the format check, which runs before
/// any rate is known.
#[must_use]
pub fn is_timecode(text: &str) -> bool {
    if !shape_pattern().is_match(text) {
        return false;
    }
    match (
        text[0..2].parse::<u8>(),
        text[3..5].parse::<u8>(),
        text[6..8].parse::<u8>(),
        text[9..11].parse::<u8>(),
    ) {
        (Ok(h), Ok(m), Ok(s), Ok(f)) => {
            h <= MAX_HOURS && m <= MAX_MINUTES && s <= MAX_SECONDS && f <= MAX_FRAMES_FIELD
        }
        _ => false,
    }
}

/// Normalize loose input into canonical `HH:MM:SS:FF` form.
///
/// Strips every non-digit character, truncates more than 8 digits to the
/// first 8, reads fewer than 8 digits as an integer and zero-pads it to 8
/// (so `"1"` becomes `"00000001"`), and treats an input with no digits at
/// all as `"00000000"`.
fn canonicalize(text: &str) -> String {
    let mut digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() > 8 {
        digits.truncate(8);
    } else if digits.len() < 8 {
        let value: u64 = digits.parse().unwrap_or(0);
        digits = format!("{value:08}");
    }
    format!(
        "{}:{}:{}:{}",
        &digits[0..2],
        &digits[2..4],
        &digits[4..6],
        &digits[6..8]
    )
}

/// Compose `h*3600*R + m*60*R + s*R + f` with checked arithmetic; extreme
/// but valid rates or hour counts surface as `Overflow` instead of a
/// panic.
fn compose_frames(h: i64, m: i64, s: i64, f: i64, nominal: i64) -> Result<i64> {
    let seconds = h
        .checked_mul(SECONDS_PER_HOUR)
        .and_then(|hs| hs.checked_add(m * SECONDS_PER_MINUTE))
        .and_then(|total| total.checked_add(s))
        .ok_or(TimecodeError::Overflow)?;
    seconds
        .checked_mul(nominal)
        .and_then(|frames| frames.checked_add(f))
        .ok_or(TimecodeError::Overflow)
}

/// Field extraction by fixed position. The caller must have validated the
/// shape already.
fn tc_to_frames(tc: &str, nominal: i64) -> Result<i64> {
    let field = |a: usize, b: usize| tc[a..b].parse::<i64>().unwrap_or(0);
    compose_frames(field(0, 2), field(3, 5), field(6, 8), field(9, 11), nominal)
}

/// Division flooring toward negative infinity, like the reference
/// arithmetic this library preserves.
fn div_floor(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && (a < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

/// Floored modulo; the sign of the result follows the divisor.
fn mod_floor(a: i64, b: i64) -> i64 {
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

fn divmod(a: i64, b: i64) -> (i64, i64) {
    (div_floor(a, b), mod_floor(a, b))
}

/// How [`Timecode::with_frame_rate`] reconciles the old and new rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateChange {
    /// Keep the displayed `HH:MM:SS:FF` text; the frame count is recomputed
    /// under the new rate.
    PreserveTimecode,
    /// Keep the absolute frame count; the displayed text changes.
    PreserveFrames,
}

/// Right-hand operand for timecode arithmetic and comparison.
///
/// Text operands are parsed at the left operand's frame rate at the point
/// of use, so a malformed string surfaces as
/// [`TimecodeError::InvalidTimecode`] from the operation itself rather
/// than from a hidden conversion.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// Another timecode. Its own rate is ignored by arithmetic; the result
    /// always carries the left operand's rate.
    Timecode(Timecode),
    /// A raw frame count.
    Frames(i64),
    /// A timecode string, parsed at the left operand's rate.
    Text(&'a str),
}

impl<'a> From<Timecode> for Operand<'a> {
    fn from(tc: Timecode) -> Self {
        Self::Timecode(tc)
    }
}

impl<'a> From<&Timecode> for Operand<'a> {
    fn from(tc: &Timecode) -> Self {
        Self::Timecode(*tc)
    }
}

impl<'a> From<i64> for Operand<'a> {
    fn from(frames: i64) -> Self {
        Self::Frames(frames)
    }
}

impl<'a> From<i32> for Operand<'a> {
    fn from(frames: i32) -> Self {
        Self::Frames(frames.into())
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

/// A non-drop-frame timecode: an absolute frame count at a frame rate.
///
/// The frame count may be negative (the result of a subtraction) and may
/// exceed 24 hours; no wraparound is performed. Values are immutable;
/// every operation, including a rate change, returns a new `Timecode`.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Timecode {
    frames: i64,
    rate: FrameRate,
}

impl Timecode {
    /// Parse a timecode string at the given rate.
    ///
    /// Input is normalized before validation: every non-digit character is
    /// stripped, the digit string is truncated to 8 digits or left-zero
    /// padded to 8, and the result is read as `HHMMSSFF`. An input with no
    /// digits at all therefore parses as `00:00:00:00`, not an error.
    ///
    /// # Example
    /// ```rust
    /// use framestamp::{FrameRate, Timecode};
    ///
    /// let rate = FrameRate::new(23.976).unwrap();
    /// let tc = Timecode::new("10:10:10:10", rate).unwrap();
    /// assert_eq!(tc.frames(), 878_650);
    /// ```
    pub fn new(text: &str, rate: FrameRate) -> Result<Self> {
        let canonical = canonicalize(text);
        if !is_timecode(&canonical) {
            return Err(TimecodeError::invalid_timecode(format!(
                "{text:?} normalizes to {canonical}, which is out of range"
            )));
        }
        Ok(Self {
            frames: tc_to_frames(&canonical, rate.nominal())?,
            rate,
        })
    }

    /// Wrap an absolute frame count at the given rate.
    ///
    /// An 8-digit count renders the same as an `HHMMSSFF` digit string, so
    /// that case emits a warning that the value is being interpreted as a
    /// frame count and not as a timecode. The value is stored either way.
    #[must_use]
    pub fn from_frames(frames: i64, rate: FrameRate) -> Self {
        if frames.to_string().len() == 8 {
            tracing::warn!(
                frames,
                "timecode created from a frame count, not a timecode string"
            );
        }
        Self { frames, rate }
    }

    /// Absolute frame count since `00:00:00:00`.
    #[must_use]
    pub fn frames(&self) -> i64 {
        self.frames
    }

    /// The frame rate carried by this value.
    #[must_use]
    pub fn frame_rate(&self) -> FrameRate {
        self.rate
    }

    /// Decompose into `(hours, minutes, seconds, frames)` at the nominal
    /// rate.
    ///
    /// Division floors toward negative infinity, so for negative frame
    /// counts the minute, second, and frame fields stay in range and the
    /// sign lands on the hour field: frame -1 at 24 fps is `-1:59:59:23`.
    #[must_use]
    pub fn components(&self) -> (i64, i64, i64, i64) {
        // Staged divisions are equivalent to dividing by R*3600 and R*60
        // directly, without forming those products (which overflow for
        // extreme but valid rates).
        let (total_seconds, f) = divmod(self.frames, self.rate.nominal());
        let (total_minutes, s) = divmod(total_seconds, SECONDS_PER_MINUTE);
        let (h, m) = divmod(total_minutes, MINUTES_PER_HOUR);
        (h, m, s, f)
    }

    /// Return a copy of this timecode at a different rate.
    ///
    /// With [`RateChange::PreserveTimecode`] the displayed `HH:MM:SS:FF`
    /// stays identical and the frame count is recomputed under the new
    /// nominal rate; with [`RateChange::PreserveFrames`] the count is kept
    /// and the displayed text generally changes. Recomputation that would
    /// exceed the frame-count range fails with
    /// [`TimecodeError::Overflow`].
    pub fn with_frame_rate(&self, rate: FrameRate, mode: RateChange) -> Result<Self> {
        match mode {
            RateChange::PreserveTimecode => {
                let (h, m, s, f) = self.components();
                let frames = compose_frames(h, m, s, f, rate.nominal())?;
                Ok(Self { frames, rate })
            }
            RateChange::PreserveFrames => Ok(Self {
                frames: self.frames,
                rate,
            }),
        }
    }

    /// Sample count at the given audio sample rate.
    ///
    /// Computes `frames * round(sample_rate / fps)` using the real stored
    /// rate, failing with [`TimecodeError::Overflow`] when the product
    /// exceeds the sample-count range. No pull-up/pull-down correction is
    /// applied.
    pub fn to_samples(&self, sample_rate: f64) -> Result<i64> {
        let samples_per_frame = (sample_rate / self.rate.as_f64()).round() as i64;
        self.frames
            .checked_mul(samples_per_frame)
            .ok_or(TimecodeError::Overflow)
    }

    /// Identical to [`Timecode::to_samples`], kept for parity with the
    /// original API surface; the two names were never distinct operations.
    pub fn samples_to_frames(&self, sample_rate: f64) -> Result<i64> {
        self.to_samples(sample_rate)
    }

    /// Resolve an operand to a frame count, parsing text at this value's
    /// rate.
    fn operand_frames(&self, operand: Operand<'_>) -> Result<i64> {
        match operand {
            Operand::Timecode(tc) => Ok(tc.frames),
            Operand::Frames(frames) => Ok(frames),
            Operand::Text(text) => Ok(Self::new(text, self.rate)?.frames),
        }
    }

    /// Floor division of frame counts, toward negative infinity.
    ///
    /// The `/` operator performs real division rounded to nearest; this is
    /// the truncating counterpart.
    pub fn floor_div<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Self> {
        let rhs = self.operand_frames(rhs.into())?;
        if rhs == 0 {
            return Err(TimecodeError::DivisionByZero);
        }
        Ok(Self::from_frames(div_floor(self.frames, rhs), self.rate))
    }

    /// Polymorphic equality over timecode, frame-count, and text operands.
    ///
    /// Two timecodes are equal only if both rate and frame count match; a
    /// bare frame count compares against the frame count alone; text is
    /// parsed at this value's rate and then compared as a timecode.
    pub fn try_eq<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<bool> {
        match rhs.into() {
            Operand::Timecode(tc) => Ok(self.rate == tc.rate && self.frames == tc.frames),
            Operand::Frames(frames) => Ok(self.frames == frames),
            Operand::Text(text) => Ok(*self == Self::new(text, self.rate)?),
        }
    }

    /// Polymorphic ordering over the same operand kinds as [`Timecode::try_eq`].
    ///
    /// Only frame counts are compared; rates do not participate in
    /// ordering.
    pub fn try_cmp<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Ordering> {
        let rhs = self.operand_frames(rhs.into())?;
        Ok(self.frames.cmp(&rhs))
    }
}

impl fmt::Display for Timecode {
    /// Canonical `HH:MM:SS:FF` form, each field zero-padded to width 2.
    ///
    /// Negative frame counts put the sign on the hour field, e.g.
    /// `-1:59:59:23` for frame -1 at 24 fps.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s, fr) = self.components();
        write!(f, "{h:02}:{m:02}:{s:02}:{fr:02}")
    }
}

impl fmt::Debug for Timecode {
    /// Inspection form appending the frame rate, e.g.
    /// `10:10:10:10 at 23.976 fps`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} fps", self, self.rate)
    }
}

impl PartialEq for Timecode {
    fn eq(&self, other: &Self) -> bool {
        self.rate == other.rate && self.frames == other.frames
    }
}

// Sound because the rate is finite by construction, never NaN.
impl Eq for Timecode {}

impl PartialOrd for Timecode {
    /// Ordering compares frame counts only; rates are ignored. The one
    /// corner where that would contradict `==` (equal counts at different
    /// rates) is reported as incomparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.frames.cmp(&other.frames) {
            Ordering::Equal if self.rate != other.rate => None,
            ordering => Some(ordering),
        }
    }
}

impl Timecode {
    fn add_operand(self, rhs: Operand<'_>) -> Result<Self> {
        let rhs = self.operand_frames(rhs)?;
        let frames = self
            .frames
            .checked_add(rhs)
            .ok_or(TimecodeError::Overflow)?;
        Ok(Self::from_frames(frames, self.rate))
    }

    fn sub_operand(self, rhs: Operand<'_>) -> Result<Self> {
        let rhs = self.operand_frames(rhs)?;
        let frames = self
            .frames
            .checked_sub(rhs)
            .ok_or(TimecodeError::Overflow)?;
        Ok(Self::from_frames(frames, self.rate))
    }

    // Multiplies the absolute frame counts directly. Not a
    // time-domain-meaningful operation, but preserved as specified by the
    // original API.
    fn mul_operand(self, rhs: Operand<'_>) -> Result<Self> {
        let rhs = self.operand_frames(rhs)?;
        let frames = self
            .frames
            .checked_mul(rhs)
            .ok_or(TimecodeError::Overflow)?;
        Ok(Self::from_frames(frames, self.rate))
    }

    // Real division of the frame counts, rounded to the nearest frame.
    // floor_div is the flooring counterpart.
    fn div_operand(self, rhs: Operand<'_>) -> Result<Self> {
        let rhs = self.operand_frames(rhs)?;
        if rhs == 0 {
            return Err(TimecodeError::DivisionByZero);
        }
        let frames = (self.frames as f64 / rhs as f64).round() as i64;
        Ok(Self::from_frames(frames, self.rate))
    }

    // Floored modulo; the sign of the result follows the divisor.
    fn rem_operand(self, rhs: Operand<'_>) -> Result<Self> {
        let rhs = self.operand_frames(rhs)?;
        if rhs == 0 {
            return Err(TimecodeError::DivisionByZero);
        }
        Ok(Self::from_frames(mod_floor(self.frames, rhs), self.rate))
    }
}

/// Operator impls for every operand kind. Each returns `Result` because a
/// text operand can fail to parse and integer arithmetic can overflow.
macro_rules! impl_timecode_ops {
    ($($rhs:ty),* $(,)?) => {$(
        impl Add<$rhs> for Timecode {
            type Output = Result<Timecode>;

            fn add(self, rhs: $rhs) -> Result<Timecode> {
                self.add_operand(rhs.into())
            }
        }

        impl Sub<$rhs> for Timecode {
            type Output = Result<Timecode>;

            fn sub(self, rhs: $rhs) -> Result<Timecode> {
                self.sub_operand(rhs.into())
            }
        }

        impl Mul<$rhs> for Timecode {
            type Output = Result<Timecode>;

            fn mul(self, rhs: $rhs) -> Result<Timecode> {
                self.mul_operand(rhs.into())
            }
        }

        impl Div<$rhs> for Timecode {
            type Output = Result<Timecode>;

            fn div(self, rhs: $rhs) -> Result<Timecode> {
                self.div_operand(rhs.into())
            }
        }

        impl Rem<$rhs> for Timecode {
            type Output = Result<Timecode>;

            fn rem(self, rhs: $rhs) -> Result<Timecode> {
                self.rem_operand(rhs.into())
            }
        }
    )*};
}

impl_timecode_ops!(Timecode, &Timecode, i64, i32, &str, Operand<'_>);
