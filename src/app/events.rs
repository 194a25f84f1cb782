//! Outbound diagnostic events.
//!
//! The [`MeterController`](super::service::MeterController) emits these
//! through the [`DiagnosticSink`](super::ports::DiagnosticSink) port. The
//! `Display` impl renders the one-line form shared by the log and text
//! sinks.

use core::fmt;

use crate::activation::ActivationMode;
use crate::level::{Calibration, Level, MAX_LEVELS};

/// On/off state of every indicator in the bank, first indicator in bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorStates {
    bits: u16,
    count: u8,
}

impl IndicatorStates {
    /// States after committing `level` to a bank of `count` indicators.
    pub fn for_level(level: Level, count: usize) -> Self {
        let count = count.min(MAX_LEVELS);
        let lit = usize::from(level).min(count);
        Self {
            bits: (1u16 << lit) - 1,
            count: count as u8,
        }
    }

    pub fn count(&self) -> usize {
        usize::from(self.count)
    }

    pub fn is_on(&self, index: usize) -> bool {
        index < self.count() && self.bits & (1 << index) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.count()).map(|i| self.is_on(i))
    }
}

impl fmt::Display for IndicatorStates {
    /// Bar graph, `#` lit and `.` dark.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for on in self.iter() {
            f.write_str(if on { "#" } else { "." })?;
        }
        Ok(())
    }
}

/// Structured events emitted by the meter.
#[derive(Debug, Clone, PartialEq)]
pub enum MeterEvent {
    /// First tick after construction.
    Started {
        mode: ActivationMode,
        calibration: Calibration,
        levels: u8,
        level_width: f32,
    },

    /// The sensor was read and the level committed.
    Refreshed {
        reading: f32,
        level: Level,
        percentage: u8,
        indicators: IndicatorStates,
    },

    /// The meter was deactivated and level 0 committed.
    Cleared { indicators: IndicatorStates },

    /// The calibration range was replaced.
    Recalibrated { calibration: Calibration },
}

impl MeterEvent {
    /// Indicator states carried by commit events.
    pub fn indicators(&self) -> Option<&IndicatorStates> {
        match self {
            Self::Refreshed { indicators, .. } | Self::Cleared { indicators } => Some(indicators),
            Self::Started { .. } | Self::Recalibrated { .. } => None,
        }
    }
}

impl fmt::Display for MeterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started {
                mode,
                calibration,
                levels,
                level_width,
            } => write!(
                f,
                "Mode: {:?} | reading at low: {} | reading at high: {} | levels: {} | level width: {:.2}",
                mode, calibration.min, calibration.max, levels, level_width
            ),
            Self::Refreshed {
                reading,
                level,
                percentage,
                indicators,
            } => write!(
                f,
                "Reading: {:.1} | Battery level: {} | Percentage: {}% | [{}]",
                reading, level, percentage, indicators
            ),
            Self::Cleared { indicators } => {
                write!(f, "Battery level: 0 (deactivated) | [{}]", indicators)
            }
            Self::Recalibrated { calibration } => write!(
                f,
                "Recalibrated: reading at low: {} | reading at high: {}",
                calibration.min, calibration.max
            ),
        }
    }
}
