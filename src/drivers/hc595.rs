//! Bit-banged 74HC595 chain.
//!
//! ## Hardware
//!
//! `BYTES` registers daisy-chained (Q7' → SER). Three MCU outputs:
//! serial data (SER), shift clock (SRCLK) and storage/latch clock (RCLK).
//! Bit `n` is output `Q(n % 8)` of register `n / 8`, where register 0 is
//! the one wired to the MCU.
//!
//! The driver keeps a shadow copy of every output. [`stage`] edits the
//! shadow only; [`commit`] clocks the whole shadow out, farthest register
//! first, MSB first, then pulses the latch once. Bits nobody staged keep
//! their last value, so several users can share one chain.
//!
//! [`stage`]: ShiftRegisterPort::stage
//! [`commit`]: ShiftRegisterPort::commit

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::ShiftRegisterPort;

pub struct Hc595Chain<D, CK, LT, const BYTES: usize> {
    data: D,
    clock: CK,
    latch: LT,
    shadow: [u8; BYTES],
}

impl<D, CK, LT, const BYTES: usize> Hc595Chain<D, CK, LT, BYTES>
where
    D: OutputPin,
    CK: OutputPin,
    LT: OutputPin,
{
    /// All outputs start low in the shadow; nothing is sent until the
    /// first commit.
    pub fn new(data: D, clock: CK, latch: LT) -> Self {
        let mut chain = Self {
            data,
            clock,
            latch,
            shadow: [0; BYTES],
        };
        let _ = chain.clock.set_low();
        let _ = chain.latch.set_low();
        chain
    }

    /// Number of addressable outputs.
    pub const fn len(&self) -> usize {
        BYTES * 8
    }

    pub const fn is_empty(&self) -> bool {
        BYTES == 0
    }

    /// Staged state of one output.
    pub fn get(&self, bit: u8) -> Option<PinState> {
        let (byte, mask) = Self::locate(bit)?;
        Some(PinState::from(self.shadow[byte] & mask != 0))
    }

    pub fn shadow(&self) -> &[u8; BYTES] {
        &self.shadow
    }

    fn locate(bit: u8) -> Option<(usize, u8)> {
        let byte = usize::from(bit / 8);
        (byte < BYTES).then(|| (byte, 1 << (bit % 8)))
    }

    fn pulse(pin: &mut impl OutputPin) {
        let _ = pin.set_high();
        let _ = pin.set_low();
    }
}

impl<D, CK, LT, const BYTES: usize> ShiftRegisterPort for Hc595Chain<D, CK, LT, BYTES>
where
    D: OutputPin,
    CK: OutputPin,
    LT: OutputPin,
{
    fn stage(&mut self, bit: u8, state: PinState) {
        // Bits past the end of the chain are ignored.
        let Some((byte, mask)) = Self::locate(bit) else {
            return;
        };
        match state {
            PinState::High => self.shadow[byte] |= mask,
            PinState::Low => self.shadow[byte] &= !mask,
        }
    }

    fn commit(&mut self) {
        for &byte in self.shadow.iter().rev() {
            for b in (0..8).rev() {
                let _ = self.data.set_state(PinState::from(byte & (1 << b) != 0));
                Self::pulse(&mut self.clock);
            }
        }
        Self::pulse(&mut self.latch);
    }
}
