//! Error types for color construction and parsing
//!
//! Conversions never fail. The only fallible entry points are the strict
//! constructor [`Color::try_new`](crate::Color::try_new) and hex parsing.

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3, 4, 6 or 8 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(
                    f,
                    "invalid hex color length (expected 3, 4, 6 or 8 characters)"
                )
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for strict color construction from external numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorError {
    /// A channel was NaN or infinite
    NotFinite {
        /// Channel name ("red", "green", "blue" or "alpha")
        channel: &'static str,
    },
    /// A channel was outside 0.0..=1.0
    OutOfRange {
        /// Channel name ("red", "green", "blue" or "alpha")
        channel: &'static str,
        /// The rejected value
        value: f64,
    },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::NotFinite { channel } => {
                write!(f, "{} channel is not a finite number", channel)
            }
            ColorError::OutOfRange { channel, value } => {
                write!(f, "{} channel {} is outside 0.0..=1.0", channel, value)
            }
        }
    }
}

impl std::error::Error for ColorError {}
