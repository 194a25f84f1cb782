//! Indicators on a serial shift-register chain.
//!
//! A chain only changes its outputs on an explicit latch, and each bit
//! written on its own becomes visible at a different clock edge. So a
//! level is applied by staging every indicator bit first and then issuing
//! exactly one [`ShiftRegisterPort::commit`]. The whole bar changes at once.

use heapless::Vec;
use log::warn;

use crate::app::ports::{OutputStrategy, ShiftRegisterPort};
use crate::config::ActiveLevel;
use crate::level::{Level, MAX_LEVELS};

pub struct ShiftRegisterBank<T> {
    transport: T,
    /// Chain bit index of each indicator, lowest level first.
    bits: Vec<u8, MAX_LEVELS>,
    on: ActiveLevel,
}

impl<T: ShiftRegisterPort> ShiftRegisterBank<T> {
    /// `bits` is copied; the caller's buffer may be reused afterwards.
    pub fn new(transport: T, bits: &[u8], on: ActiveLevel) -> Self {
        if bits.len() > MAX_LEVELS {
            warn!("ShiftRegisterBank: more than {} indicators, extra bits ignored", MAX_LEVELS);
        }
        let bits = bits.iter().copied().take(MAX_LEVELS).collect();
        Self {
            transport,
            bits,
            on,
        }
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn release(self) -> T {
        self.transport
    }
}

impl<T: ShiftRegisterPort> OutputStrategy for ShiftRegisterBank<T> {
    fn indicator_count(&self) -> usize {
        self.bits.len()
    }

    fn commit(&mut self, level: Level) {
        let lit = usize::from(level);
        for (i, &bit) in self.bits.iter().enumerate() {
            let state = if i < lit {
                self.on.on_state()
            } else {
                self.on.off_state()
            };
            self.transport.stage(bit, state);
        }
        self.transport.commit();
    }
}
