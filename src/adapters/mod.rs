//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements      | Connects to                   |
//! |-------------|-----------------|-------------------------------|
//! | `log_sink`  | DiagnosticSink  | `log` facade / serial console |
//! | `text_sink` | DiagnosticSink  | any `core::fmt::Write`        |
//! | `time`      | Clock           | esp_timer / `Instant`         |
//!
//! The GPIO and register adapters live in [`crate::drivers`].

pub mod log_sink;
pub mod text_sink;
pub mod time;
