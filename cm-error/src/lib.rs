//! Unified error handling for chamber-module
//!
//! This crate provides the single error type used by the settings accessor,
//! the config builders and the registration path. Every configuration error
//! is fatal to startup, so the variants carry enough context (section, option,
//! offending value, violated bound) to be reported as-is.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias using ChamberError
pub type Result<T> = std::result::Result<T, ChamberError>;

/// A numeric constraint attached to a settings option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// value >= limit
    Minimum(f64),
    /// value <= limit
    Maximum(f64),
    /// value > limit
    Above(f64),
    /// value < limit
    Below(f64),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Minimum(v) => write!(f, "minimum of {}", v),
            Bound::Maximum(v) => write!(f, "maximum of {}", v),
            Bound::Above(v) => write!(f, "value above {}", v),
            Bound::Below(v) => write!(f, "value below {}", v),
        }
    }
}

/// Unified error type for all chamber-module operations
#[derive(thiserror::Error, Debug)]
pub enum ChamberError {
    // ============================================================================
    // Settings Accessor Errors
    // ============================================================================
    #[error("Option '{option}' in section '{section}' must be specified")]
    MissingOption {
        section: String,
        option: String,
    },

    #[error("Unable to parse option '{option}' in section '{section}': {reason}")]
    InvalidValue {
        section: String,
        option: String,
        reason: String,
    },

    #[error("Option '{option}' in section '{section}' must have {bound} (got {value})")]
    OutOfRange {
        section: String,
        option: String,
        value: f64,
        bound: Bound,
    },

    #[error("Option '{option}' is not valid in section '{section}'")]
    UnknownOption {
        section: String,
        option: String,
    },

    #[error("Section '{0}' not found")]
    SectionNotFound(String),

    // ============================================================================
    // Registration Errors
    // ============================================================================
    #[error("Printer object '{0}' already registered")]
    DuplicateObject(String),

    #[error("Subsystem '{subsystem}' rejected configuration: {reason}")]
    Subsystem {
        subsystem: String,
        reason: String,
    },

    // ============================================================================
    // Snapshot Loading Errors
    // ============================================================================
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("File too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChamberError {
    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing option error
    pub fn missing(section: impl Into<String>, option: impl Into<String>) -> Self {
        Self::MissingOption {
            section: section.into(),
            option: option.into(),
        }
    }

    /// Create a parse/shape error for an option
    pub fn invalid_value(
        section: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section: section.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Create a bound violation error
    pub fn out_of_range(
        section: impl Into<String>,
        option: impl Into<String>,
        value: f64,
        bound: Bound,
    ) -> Self {
        Self::OutOfRange {
            section: section.into(),
            option: option.into(),
            value,
            bound,
        }
    }

    /// Create a subsystem failure error
    pub fn subsystem(subsystem: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Subsystem {
            subsystem: subsystem.into(),
            reason: reason.into(),
        }
    }

    /// Name of the option this error is about, if any
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::MissingOption { option, .. }
            | Self::InvalidValue { option, .. }
            | Self::OutOfRange { option, .. }
            | Self::UnknownOption { option, .. } => Some(option),
            _ => None,
        }
    }
}
