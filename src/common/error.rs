//! Error taxonomy (spec §7). Validation runs before any tissue mutation;
//! once a calculation starts it always returns a `DiveProfile` and reports
//! problems as `Warning`s instead.

use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable, matchable discriminant for caller-supplied input problems.
/// The UI layer (out of scope here) maps these to localized messages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InvalidInput {
    InvalidGasMix { reason: String },
    InvalidDepth { reason: String },
    InvalidSegments { reason: String },
    InvalidRates { reason: String },
    InvalidGradientFactors { reason: String },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::InvalidGasMix { reason } => write!(f, "invalid gas mix: {reason}"),
            InvalidInput::InvalidDepth { reason } => write!(f, "invalid depth: {reason}"),
            InvalidInput::InvalidSegments { reason } => write!(f, "invalid segments: {reason}"),
            InvalidInput::InvalidRates { reason } => write!(f, "invalid rates: {reason}"),
            InvalidInput::InvalidGradientFactors { reason } => {
                write!(f, "invalid gradient factors: {reason}")
            }
        }
    }
}

#[cfg(not(feature = "no-std"))]
impl std::error::Error for InvalidInput {}

/// Config-level validation error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigValidationErr {
    pub field: String,
    pub reason: String,
}

impl ConfigValidationErr {
    pub fn new(field: &str, reason: &str) -> Self {
        Self {
            field: String::from(field),
            reason: String::from(reason),
        }
    }
}

impl fmt::Display for ConfigValidationErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}
