//! Raw reading → ordinal charge level and percentage.
//!
//! Example lithium cell behind a divider, five segments:
//!
//! | Level | Readings        | Voltage   |
//! |-------|-----------------|-----------|
//! | 1     | 552.0 – 614.6   | 2.7 – 3.0 |
//! | 2     | 614.6 – 677.2   | 3.0 – 3.3 |
//! | 3     | 677.2 – 739.8   | 3.3 – 3.6 |
//! | 4     | 739.8 – 802.4   | 3.6 – 3.9 |
//! | 5     | 802.4 – 865.0   | 3.9 – 4.2 |
//!
//! Level 0 is never produced here; it is reserved for "meter deactivated".

use core::fmt;

use serde::{Deserialize, Serialize};

/// Largest supported number of indicator segments.
pub const MAX_LEVELS: usize = 10;

/// Raw-reading bounds for an empty and a full battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calibration {
    pub min: u32,
    pub max: u32,
}

impl Calibration {
    pub fn span(&self) -> f32 {
        self.max as f32 - self.min as f32
    }
}

/// Number of indicators that should be lit, `0..=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(u8);

impl Level {
    /// All indicators dark.
    pub const OFF: Self = Self(0);

    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn is_off(self) -> bool {
        self.0 == 0
    }
}

impl From<Level> for usize {
    fn from(level: Level) -> Self {
        level.0 as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pure binning of raw readings. Deterministic and total: any `f32`,
/// including out-of-range and NaN, maps to a level and a percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelMapper {
    calibration: Calibration,
    levels: u8,
    level_width: f32,
}

impl LevelMapper {
    pub fn new(calibration: Calibration, levels: u8) -> Self {
        Self {
            calibration,
            levels,
            level_width: calibration.span() / f32::from(levels),
        }
    }

    /// Replace the bounds; the level count is kept.
    pub fn recalibrate(&mut self, calibration: Calibration) {
        *self = Self::new(calibration, self.levels);
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Number of levels `N`.
    pub fn levels(&self) -> u8 {
        self.levels
    }

    /// Raw-reading span of one level, `(max - min) / N`.
    pub fn level_width(&self) -> f32 {
        self.level_width
    }

    /// Map a reading onto `1..=N`.
    ///
    /// Readings below `min` land in level 1, readings at or above `max`
    /// in level `N`.
    pub fn compute_level(&self, reading: f32) -> Level {
        let min = self.calibration.min as f32;
        for i in 0..self.levels {
            // Recomputed from `min` each step so rounding stays within
            // ±0.5 for any N.
            let threshold = min + f32::from(i + 1) * self.level_width;
            if reading < threshold {
                return Level(i + 1);
            }
        }
        Level(self.levels)
    }

    /// Linear charge estimate in `0..=100`, truncated toward zero.
    pub fn compute_percentage(&self, reading: f32) -> u8 {
        let min = self.calibration.min as f32;
        let max = self.calibration.max as f32;
        if reading < min {
            return 0;
        }
        if reading > max {
            return 100;
        }
        let percentage = 100.0 * (reading - min) / (max - min);
        // NaN and the degenerate `min == max` case saturate here.
        percentage.clamp(0.0, 100.0) as u8
    }
}
