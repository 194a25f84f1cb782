//! Meter configuration parameters.
//!
//! Everything here is fixed before the first `tick()`. Only the
//! calibration range can change afterwards, through
//! [`MeterController::recalibrate`](crate::app::service::MeterController::recalibrate).
//! The struct is serde-enabled so a board can keep its calibration in
//! flash ([`MeterConfig::to_bytes`]) or receive it from host tooling as JSON.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::activation::ActivationMode;
use crate::error::{Error, Result};
use crate::level::{Calibration, MAX_LEVELS};

/// Default refresh interval: one minute.
pub const DEFAULT_UPDATE_INTERVAL_MS: u32 = 60_000;

/// Electrical level that counts as "on" (indicators) or "asserted"
/// (activation pin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveLevel {
    High,
    Low,
}

impl ActiveLevel {
    /// Pin state that represents "on" for this polarity.
    pub fn on_state(self) -> embedded_hal::digital::PinState {
        match self {
            Self::High => embedded_hal::digital::PinState::High,
            Self::Low => embedded_hal::digital::PinState::Low,
        }
    }

    /// Logical complement of [`on_state`](Self::on_state).
    pub fn off_state(self) -> embedded_hal::digital::PinState {
        !self.on_state()
    }

    /// Map a raw "pin is high" sample to "is asserted" for this polarity.
    pub fn is_asserted(self, pin_high: bool) -> bool {
        match self {
            Self::High => pin_high,
            Self::Low => !pin_high,
        }
    }
}

/// Core meter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterConfig {
    // --- Sensing ---
    /// Raw readings for empty and full charge.
    pub calibration: Calibration,

    // --- Indicators ---
    /// Number of indicator segments (1..=10).
    pub level_count: u8,
    /// Polarity that lights an indicator.
    pub indicator_on: ActiveLevel,

    // --- Activation ---
    /// When the indicators are allowed to show a level.
    pub mode: ActivationMode,
    /// Level on the activation pin that means "show the meter".
    pub activation_level: ActiveLevel,

    // --- Timing ---
    /// Minimum time between timer-driven refreshes (milliseconds).
    pub update_interval_ms: u32,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            // Single lithium cell behind a divider: 2.7 V .. 4.2 V
            calibration: Calibration { min: 552, max: 865 },

            level_count: 5,
            indicator_on: ActiveLevel::High,

            mode: ActivationMode::AlwaysOn,
            activation_level: ActiveLevel::Low, // button to ground, pull-up

            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
        }
    }
}

impl MeterConfig {
    /// Use an activation pin. Switches the mode to
    /// [`ActivationMode::MomentaryPin`]; set `mode` afterwards to override.
    #[must_use]
    pub fn with_activation_pin(mut self, activation_level: ActiveLevel) -> Self {
        self.mode = ActivationMode::MomentaryPin;
        self.activation_level = activation_level;
        self
    }

    /// Check the configuration-misuse cases.
    ///
    /// The controller never calls this; an invalid config yields
    /// unspecified (but non-panicking) metering behaviour.
    pub fn validate(&self) -> Result<()> {
        let result = if self.calibration.min >= self.calibration.max {
            Err(Error::Config("calibration min must be below max"))
        } else if self.level_count == 0 {
            Err(Error::Config("level_count must be at least 1"))
        } else if usize::from(self.level_count) > MAX_LEVELS {
            Err(Error::Config("level_count exceeds 10"))
        } else {
            Ok(())
        };

        if let Err(e) = result {
            warn!("MeterConfig rejected: {}", e);
        }
        result
    }

    /// Compact binary encoding for flash storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| Error::Config("encode failed"))
    }

    /// Decode a config written by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        postcard::from_bytes(bytes).map_err(|_| Error::Config("stored config corrupted"))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|_| Error::Config("encode failed"))
    }

    /// Parse a config from host tooling. Missing fields are an error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON config"))
    }
}
