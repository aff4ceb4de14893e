//! Frame rate handling, including the NTSC 23.976 special case.

use crate::error::{Result, TimecodeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The canonical NTSC film rate that the `23` / `23.98` shorthands alias to.
pub const NTSC_FILM_RATE: f64 = 23.976;

/// A frames-per-second rate.
///
/// Stores the real rate (e.g. `23.976`) even though all frame arithmetic
/// operates on the rounded integer rate from [`FrameRate::nominal`]. The
/// stored value is always finite, positive, and rounds to at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FrameRate(f64);

impl FrameRate {
    /// Create a frame rate from a real number.
    ///
    /// The NTSC shorthands `23.0` and `23.98` are aliased to `23.976`.
    /// Non-finite rates, non-positive rates, and rates that round to zero
    /// frames per second are rejected.
    pub fn new(rate: f64) -> Result<Self> {
        let rate = if rate == 23.0 || rate == 23.98 {
            NTSC_FILM_RATE
        } else {
            rate
        };
        Self::from_real(rate)
    }

    /// Range validation without NTSC aliasing, shared by the constructors.
    fn from_real(rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 || rate.round() < 1.0 {
            return Err(TimecodeError::invalid_frame_rate(rate.to_string()));
        }
        Ok(Self(rate))
    }

    /// The stored real rate.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// The rounded integer rate used for all frame arithmetic.
    ///
    /// 23.976 fps content is counted at exactly 24 frames per second; no
    /// drop-frame compensation is applied.
    #[must_use]
    pub fn nominal(&self) -> i64 {
        self.0.round() as i64
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = TimecodeError;

    fn try_from(rate: f64) -> Result<Self> {
        Self::new(rate)
    }
}

impl From<FrameRate> for f64 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}

impl FromStr for FrameRate {
    type Err = TimecodeError;

    /// Parse a textual frame rate descriptor.
    ///
    /// The literal shorthands `"23"` and `"23.98"` alias to 23.976. Other
    /// inputs are parsed as a real number; if that fails, parsing is
    /// retried after stripping every character that is not an ASCII digit
    /// or `.`, which tolerates descriptors like `"24fps"`. Aliasing only
    /// inspects the raw input, so `"23fps"` yields 23.0, not 23.976.
    ///
    /// A descriptor containing `"drop"` that parses to a rate is accepted
    /// and treated as non-drop, with a warning; the warning is not emitted
    /// for descriptors that fail to parse at all.
    fn from_str(s: &str) -> Result<Self> {
        let rate = if s == "23" || s == "23.98" {
            Self::from_real(NTSC_FILM_RATE)
        } else if let Ok(parsed) = s.parse::<f64>() {
            Self::from_real(parsed)
        } else {
            let stripped: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            stripped
                .parse::<f64>()
                .map_err(|_| TimecodeError::invalid_frame_rate(s))
                .and_then(Self::from_real)
                .map_err(|_| TimecodeError::invalid_frame_rate(s))
        }?;
        if s.contains("drop") {
            tracing::warn!(input = s, "drop frame rates not supported; treating as non-drop");
        }
        Ok(rate)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
