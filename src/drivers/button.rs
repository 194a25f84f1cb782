//! Polled, debounced push button.
//!
//! ## Hardware
//!
//! Momentary switch on a GPIO, either to ground with a pull-up
//! ([`ActiveLevel::Low`]) or to the supply with a pull-down
//! ([`ActiveLevel::High`]). Each [`status`](ButtonStatusPort::status)
//! query samples the pin and advances the debounce state machine.
//!
//! ## Status reporting
//!
//! | Status            | Condition                                   |
//! |-------------------|---------------------------------------------|
//! | `WasPressed`      | press stable for `debounce_ms` (once)       |
//! | `IsPressed`       | held, or release not yet stable             |
//! | `WasShortPressed` | release stable, held < `long_press_ms` (once) |
//! | `WasLongPressed`  | release stable, held >= `long_press_ms` (once) |
//! | `NotPressed`      | otherwise                                   |

use embedded_hal::digital::InputPin;

use crate::activation::ButtonStatus;
use crate::app::ports::{ButtonStatusPort, Clock};
use crate::config::ActiveLevel;

const DEBOUNCE_MS: u32 = 50;
const LONG_PRESS_MS: u32 = 2000;

/// Internal debounce state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Up,
    DebounceDown { since_ms: u32 },
    Down { since_ms: u32 },
    DebounceUp { down_since_ms: u32, since_ms: u32 },
}

pub struct DebouncedButton<P, C> {
    pin: P,
    clock: C,
    active: ActiveLevel,
    state: PressState,
    debounce_ms: u32,
    long_press_ms: u32,
}

impl<P: InputPin, C: Clock> DebouncedButton<P, C> {
    pub fn new(pin: P, active: ActiveLevel, clock: C) -> Self {
        Self {
            pin,
            clock,
            active,
            state: PressState::Up,
            debounce_ms: DEBOUNCE_MS,
            long_press_ms: LONG_PRESS_MS,
        }
    }

    #[must_use]
    pub fn with_timing(mut self, debounce_ms: u32, long_press_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self.long_press_ms = long_press_ms;
        self
    }

    /// Debounced "held down" state.
    pub fn is_down(&self) -> bool {
        matches!(self.state, PressState::Down { .. } | PressState::DebounceUp { .. })
    }

    fn raw_pressed(&mut self) -> bool {
        // A failed read counts as released.
        self.pin
            .is_high()
            .map(|high| self.active.is_asserted(high))
            .unwrap_or(false)
    }

    fn step(&mut self, pressed: bool, now_ms: u32) -> ButtonStatus {
        match self.state {
            PressState::Up => {
                if pressed {
                    self.state = PressState::DebounceDown { since_ms: now_ms };
                }
                ButtonStatus::NotPressed
            }

            PressState::DebounceDown { since_ms } => {
                if !pressed {
                    self.state = PressState::Up;
                    ButtonStatus::NotPressed
                } else if now_ms.wrapping_sub(since_ms) >= self.debounce_ms {
                    self.state = PressState::Down { since_ms };
                    ButtonStatus::WasPressed
                } else {
                    ButtonStatus::NotPressed
                }
            }

            PressState::Down { since_ms } => {
                if !pressed {
                    self.state = PressState::DebounceUp {
                        down_since_ms: since_ms,
                        since_ms: now_ms,
                    };
                }
                ButtonStatus::IsPressed
            }

            PressState::DebounceUp {
                down_since_ms,
                since_ms,
            } => {
                if pressed {
                    self.state = PressState::Down {
                        since_ms: down_since_ms,
                    };
                    ButtonStatus::IsPressed
                } else if now_ms.wrapping_sub(since_ms) >= self.debounce_ms {
                    self.state = PressState::Up;
                    if since_ms.wrapping_sub(down_since_ms) >= self.long_press_ms {
                        ButtonStatus::WasLongPressed
                    } else {
                        ButtonStatus::WasShortPressed
                    }
                } else {
                    ButtonStatus::IsPressed
                }
            }
        }
    }
}

impl<P: InputPin, C: Clock> ButtonStatusPort for DebouncedButton<P, C> {
    fn status(&mut self) -> ButtonStatus {
        let pressed = self.raw_pressed();
        let now = self.clock.now_ms();
        self.step(pressed, now)
    }
}
