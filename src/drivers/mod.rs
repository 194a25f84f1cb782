//! Indicator output strategies, register transport, and input drivers.

pub mod button;
pub mod direct_pins;
pub mod hc595;
pub mod shift_register;

pub use direct_pins::DirectPins;
pub use shift_register::ShiftRegisterBank;
