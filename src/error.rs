//! Error types for timecode operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for timecode operations.
pub type Result<T> = std::result::Result<T, TimecodeError>;

/// Errors that can occur during timecode operations.
///
/// All of these are user-correctable input errors surfaced synchronously at
/// the offending call; none is process-fatal.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimecodeError {
    /// Text failed timecode validation after normalization.
    #[error("Invalid timecode: {message}")]
    InvalidTimecode {
        /// Description of what was rejected.
        message: String,
    },

    /// Frame rate input unparsable by both the primary and the fallback
    /// parsing strategy, or out of the valid range.
    #[error("Invalid frame rate: {input}")]
    InvalidFrameRate {
        /// The rejected input, as given.
        input: String,
    },

    /// Division or modulo by a zero frame count.
    #[error("Division by zero frame count")]
    DivisionByZero,

    /// Overflow during frame-count arithmetic.
    #[error("Frame count overflow")]
    Overflow,
}

impl TimecodeError {
    /// Create an invalid timecode error.
    pub fn invalid_timecode(message: impl Into<String>) -> Self {
        Self::InvalidTimecode {
            message: message.into(),
        }
    }

    /// Create an invalid frame rate error.
    pub fn invalid_frame_rate(input: impl Into<String>) -> Self {
        Self::InvalidFrameRate {
            input: input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = TimecodeError::invalid_timecode("hours field out of range");
        assert_eq!(err.to_string(), "Invalid timecode: hours field out of range");

        let err = TimecodeError::invalid_frame_rate("fast");
        assert_eq!(err.to_string(), "Invalid frame rate: fast");

        assert_eq!(
            TimecodeError::DivisionByZero.to_string(),
            "Division by zero frame count"
        );
        assert_eq!(TimecodeError::Overflow.to_string(), "Frame count overflow");
    }

    #[test]
    fn test_error_serialization() {
        let err = TimecodeError::invalid_timecode("test error");
        let json = serde_json::to_string(&err).unwrap();
        let decoded: TimecodeError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, decoded);
    }
}
