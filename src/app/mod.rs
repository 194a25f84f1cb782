//! Application core — meter orchestration, zero direct I/O.
//!
//! Hardware is reached only through the **port traits** in [`ports`],
//! which keeps this layer testable on the host without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
