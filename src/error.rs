//! Unified error type for the battery meter.
//!
//! The metering path itself is infallible: readings are clamped, and pin
//! writes that fail are dropped at the driver boundary. Errors only arise
//! from configuration checks and firmware bring-up. All variants are
//! `Copy` so they can be logged and passed around without allocation.

use core::fmt;

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration failed a range check.
    /// The `&'static str` names the field and the violated rule.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
