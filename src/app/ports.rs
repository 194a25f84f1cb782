//! Port traits — the hexagonal boundary between meter logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MeterController (domain)
//! ```
//!
//! Driven adapters (ADC, GPIO banks, shift-register chains, buttons,
//! clocks, diagnostic sinks) implement these traits. The
//! [`MeterController`](super::service::MeterController) is generic over
//! them, so the domain core never touches hardware directly.
//!
//! All ports are infallible by contract: an adapter that hits an I/O error
//! drops it and carries on, and the meter treats whatever comes back as a
//! valid sample.

use embedded_hal::digital::PinState;

use crate::activation::ButtonStatus;
use crate::level::Level;

use super::events::MeterEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw analog reading of the battery sense line.
pub trait SensorPort {
    fn read_raw(&mut self) -> f32;
}

/// Closures make quick sensors: `|| adc.read(&mut ch).unwrap_or(0) as f32`.
impl<F: FnMut() -> f32> SensorPort for F {
    fn read_raw(&mut self) -> f32 {
        self()
    }
}

// ───────────────────────────────────────────────────────────────
// Output ports (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Strategy for showing a level on a bank of indicators.
///
/// After `commit(level)` the first `level` indicators (in configured order)
/// are on and the rest are off.
pub trait OutputStrategy {
    /// Number of indicators `N` in the bank.
    fn indicator_count(&self) -> usize;

    fn commit(&mut self, level: Level);
}

/// Serial register transport: stage bits without transmitting, then make
/// every staged bit visible at once.
pub trait ShiftRegisterPort {
    /// Set one bit of the chain's shadow copy. Nothing changes on the wire.
    fn stage(&mut self, bit: u8, state: PinState);

    /// Transmit the shadow copy and latch it.
    fn commit(&mut self);
}

/// Lets a bank borrow a chain owned (and shared) elsewhere.
impl<T: ShiftRegisterPort + ?Sized> ShiftRegisterPort for &mut T {
    fn stage(&mut self, bit: u8, state: PinState) {
        (**self).stage(bit, state);
    }

    fn commit(&mut self) {
        (**self).commit();
    }
}

// ───────────────────────────────────────────────────────────────
// Input ports
// ───────────────────────────────────────────────────────────────

/// Debounced button consumed through a press-state query.
pub trait ButtonStatusPort {
    fn status(&mut self) -> ButtonStatus;
}

impl<T: ButtonStatusPort + ?Sized> ButtonStatusPort for &mut T {
    fn status(&mut self) -> ButtonStatus {
        (**self).status()
    }
}

/// Monotonic millisecond clock. Wraps at `u32::MAX`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Shared clocks: the controller and a button can read the same source.
impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Diagnostic sink (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The controller emits a [`MeterEvent`] after each observable action.
/// Purely observational; nothing in the meter depends on it.
pub trait DiagnosticSink {
    fn emit(&mut self, event: &MeterEvent);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn emit(&mut self, event: &MeterEvent) {
        (**self).emit(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    fn emit(&mut self, _event: &MeterEvent) {}
}
