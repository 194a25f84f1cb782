//! One GPIO per indicator.
//!
//! Each write is applied immediately, so every indicator change is
//! individually observable. This is fine for a handful of discrete LEDs
//! driven straight from the MCU.

use embedded_hal::digital::OutputPin;
use heapless::Vec;
use log::warn;

use crate::app::ports::OutputStrategy;
use crate::config::ActiveLevel;
use crate::level::{Level, MAX_LEVELS};

pub struct DirectPins<P> {
    pins: Vec<P, MAX_LEVELS>,
    on: ActiveLevel,
}

impl<P: OutputPin> DirectPins<P> {
    /// Take ownership of the indicator pins (lowest level first) and drive
    /// them all off. Pins beyond the tenth are dropped.
    pub fn new(pins: impl IntoIterator<Item = P>, on: ActiveLevel) -> Self {
        let mut owned = Vec::new();
        for pin in pins {
            if owned.push(pin).is_err() {
                warn!("DirectPins: more than {} indicators, extra pins ignored", MAX_LEVELS);
                break;
            }
        }

        let mut bank = Self {
            pins: owned,
            on,
        };
        bank.commit(Level::OFF);
        bank
    }

    pub fn pins(&self) -> &[P] {
        &self.pins
    }

    /// Give the pins back, e.g. to reconfigure them as inputs.
    pub fn release(self) -> Vec<P, MAX_LEVELS> {
        self.pins
    }
}

impl<P: OutputPin> OutputStrategy for DirectPins<P> {
    fn indicator_count(&self) -> usize {
        self.pins.len()
    }

    fn commit(&mut self, level: Level) {
        let lit = usize::from(level);
        for (i, pin) in self.pins.iter_mut().enumerate() {
            let state = if i < lit {
                self.on.on_state()
            } else {
                self.on.off_state()
            };
            // Write failures are not observable at this layer.
            let _ = pin.set_state(state);
        }
    }
}
