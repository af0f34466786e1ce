use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structured, queryable engine output in place of logging: the engine is a
/// pure computation with no I/O, so operational conditions surface here
/// instead of a log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WarningLevel {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Warning {
    pub level: WarningLevel,
    pub message: String,
    pub details: String,
}

impl Warning {
    pub fn new(level: WarningLevel, message: &str, details: &str) -> Self {
        Self {
            level,
            message: String::from(message),
            details: String::from(details),
        }
    }

    pub fn info(message: &str, details: &str) -> Self {
        Self::new(WarningLevel::Info, message, details)
    }

    pub fn warning(message: &str, details: &str) -> Self {
        Self::new(WarningLevel::Warning, message, details)
    }

    pub fn danger(message: &str, details: &str) -> Self {
        Self::new(WarningLevel::Danger, message, details)
    }
}
