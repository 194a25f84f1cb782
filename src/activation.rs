//! Activation state machine — decides when the bar may show a level.
//!
//! ```text
//!              on edge: forced refresh
//!   ┌──────┐ ─────────────────────────▶ ┌────────┐
//!   │ Idle │                            │ Active │ ── held: timer-gated refresh
//!   └──────┘ ◀───────────────────────── └────────┘
//!              off edge: clear to level 0
//! ```
//!
//! | Mode            | Source                    | Initial | Notes                         |
//! |-----------------|---------------------------|---------|-------------------------------|
//! | AlwaysOn        | none                      | Active  | first poll forces a refresh   |
//! | MomentaryPin    | GPIO at configured level  | Idle    | edges derived from pin level  |
//! | MomentaryButton | [`ButtonStatusPort`]      | Idle    | edges reported by the button  |
//!
//! Turning on is edge-triggered so the bar appears without waiting out an
//! interval. Turning off is never gated so a stale level cannot linger
//! after the user lets go.

use embedded_hal::digital::InputPin;
use serde::{Deserialize, Serialize};

use crate::app::ports::ButtonStatusPort;
use crate::config::ActiveLevel;

/// How the meter is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationMode {
    AlwaysOn,
    MomentaryPin,
    MomentaryButton,
}

/// Press state reported by a debounced button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStatus {
    NotPressed,
    /// Held down; the press edge was already reported.
    IsPressed,
    /// Press edge. Reported once.
    WasPressed,
    /// Release edge after a short hold. Reported once.
    WasShortPressed,
    /// Release edge after a long hold. Reported once.
    WasLongPressed,
}

/// One sample of an activation source, before edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Unconditionally on.
    Steady,
    /// The source reported a press edge.
    JustPressed,
    /// The source is asserted.
    Asserted,
    /// The source reported a release edge and is confirmed up.
    Released,
    /// The source is not asserted.
    Deasserted,
    /// Nothing actionable this tick.
    Quiet,
}

/// Something the controller can sample for activation.
pub trait ActivationSource {
    fn mode(&self) -> ActivationMode;
    fn sample(&mut self) -> Signal;
}

/// Meter is always shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOn;

impl ActivationSource for AlwaysOn {
    fn mode(&self) -> ActivationMode {
        ActivationMode::AlwaysOn
    }

    fn sample(&mut self) -> Signal {
        Signal::Steady
    }
}

/// Meter is shown while a GPIO reads its active level.
pub struct MomentaryPin<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> MomentaryPin<P> {
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> ActivationSource for MomentaryPin<P> {
    fn mode(&self) -> ActivationMode {
        ActivationMode::MomentaryPin
    }

    fn sample(&mut self) -> Signal {
        // A failed read counts as "not asserted".
        match self.pin.is_high() {
            Ok(high) if self.active.is_asserted(high) => Signal::Asserted,
            _ => Signal::Deasserted,
        }
    }
}

/// Meter is shown while a debounced button is pressed.
pub struct MomentaryButton<B> {
    button: B,
}

impl<B: ButtonStatusPort> MomentaryButton<B> {
    pub fn new(button: B) -> Self {
        Self { button }
    }

    pub fn release(self) -> B {
        self.button
    }
}

impl<B: ButtonStatusPort> ActivationSource for MomentaryButton<B> {
    fn mode(&self) -> ActivationMode {
        ActivationMode::MomentaryButton
    }

    fn sample(&mut self) -> Signal {
        match self.button.status() {
            ButtonStatus::WasPressed => Signal::JustPressed,
            ButtonStatus::IsPressed => Signal::Asserted,
            ButtonStatus::WasShortPressed | ButtonStatus::WasLongPressed => {
                // Re-poll: only clear once the button is really up. A new
                // press seen here still gets its immediate refresh.
                match self.button.status() {
                    ButtonStatus::NotPressed => Signal::Released,
                    ButtonStatus::WasPressed => Signal::JustPressed,
                    ButtonStatus::IsPressed => Signal::Asserted,
                    ButtonStatus::WasShortPressed | ButtonStatus::WasLongPressed => Signal::Quiet,
                }
            }
            ButtonStatus::NotPressed => Signal::Deasserted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    Idle,
    Active,
}

/// What the meter should do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Refresh if the gate allows it; `forced` bypasses the interval.
    Refresh { forced: bool },
    /// Commit level 0 now, bypassing the gate.
    Clear,
    /// Leave the indicators as they are.
    Hold,
}

pub struct ActivationController<A> {
    source: A,
    state: ActivationState,
    /// Set once the first AlwaysOn refresh has been forced.
    primed: bool,
}

impl<A: ActivationSource> ActivationController<A> {
    pub fn new(source: A) -> Self {
        let state = match source.mode() {
            ActivationMode::AlwaysOn => ActivationState::Active,
            ActivationMode::MomentaryPin | ActivationMode::MomentaryButton => {
                ActivationState::Idle
            }
        };
        Self {
            source,
            state,
            primed: false,
        }
    }

    pub fn mode(&self) -> ActivationMode {
        self.source.mode()
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ActivationState::Active
    }

    /// Sample the source once and advance the state machine.
    pub fn poll(&mut self) -> Directive {
        let signal = self.source.sample();
        let was_active = self.is_active();

        match signal {
            Signal::Steady => {
                self.state = ActivationState::Active;
                let forced = !self.primed;
                self.primed = true;
                Directive::Refresh { forced }
            }
            Signal::JustPressed => {
                self.state = ActivationState::Active;
                Directive::Refresh { forced: true }
            }
            Signal::Asserted => {
                self.state = ActivationState::Active;
                Directive::Refresh { forced: !was_active }
            }
            Signal::Released => {
                self.state = ActivationState::Idle;
                Directive::Clear
            }
            Signal::Deasserted => {
                self.state = ActivationState::Idle;
                if was_active {
                    Directive::Clear
                } else {
                    Directive::Hold
                }
            }
            Signal::Quiet => Directive::Hold,
        }
    }

    pub fn source_mut(&mut self) -> &mut A {
        &mut self.source
    }

    pub fn into_source(self) -> A {
        self.source
    }
}
