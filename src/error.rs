//! Unified error types for the harvester firmware.
//!
//! `Error` is what construction can fail with.  Motor command refusals
//! stay a separate `MotorError` taxonomy: they are reported, never
//! propagated.  All variants are `Copy` so they can be carried inside
//! events and log lines without allocation.

use core::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.  The message names the field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Motor command errors
// ---------------------------------------------------------------------------

/// How loudly a refused command is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Redundant command; state is already what was asked for.
    Warning,
    /// Unsafe command; rejected to protect the motor.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotorError {
    /// Turn-on requested while the motor is running.
    AlreadyRunning,
    /// Turn-off requested while the motor is off.
    AlreadyStopped,
    /// Direction toggle requested while the motor is off.
    NotRunning,
    /// Turn-on requested while the pool is outside the safe band.
    UnsafeLevel { quantity: u32 },
}

impl MotorError {
    pub const fn severity(self) -> Severity {
        match self {
            Self::AlreadyRunning | Self::AlreadyStopped | Self::NotRunning => Severity::Warning,
            Self::UnsafeLevel { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "motor already running"),
            Self::AlreadyStopped => write!(f, "motor already off"),
            Self::NotRunning => write!(f, "motor is off"),
            Self::UnsafeLevel { quantity } => {
                write!(f, "pool level {quantity} outside safe operating band")
            }
        }
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
