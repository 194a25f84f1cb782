//! Battery charge meter library.
//!
//! Reads one analog battery measurement, bins it onto an `N`-segment
//! scale, and drives a bank of indicators: direct GPIOs or a 74HC595
//! chain. Refreshes are paced by a timer or gated by an activation pin or
//! button. The pure-logic modules build and test on the host; all
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod activation;
pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod level;
pub mod pins;

pub mod adapters;
pub mod drivers;

pub use activation::{ActivationMode, AlwaysOn, ButtonStatus, MomentaryButton, MomentaryPin};
pub use app::service::MeterController;
pub use config::{ActiveLevel, MeterConfig};
pub use error::{Error, Result};
pub use level::{Calibration, Level, LevelMapper};
