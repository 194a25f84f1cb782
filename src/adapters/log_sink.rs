//! Log-based diagnostic sink.
//!
//! Implements [`DiagnosticSink`] by writing meter events to the `log`
//! facade (the ESP-IDF logger on the board, whatever logger the host
//! installs in simulation). Per-indicator lines go out at `debug`.

use log::{debug, info};

use crate::app::events::MeterEvent;
use crate::app::ports::DiagnosticSink;

/// Adapter that logs every [`MeterEvent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for LogSink {
    fn emit(&mut self, event: &MeterEvent) {
        info!("[BatteryMeter] {}", event);
        if let Some(indicators) = event.indicators() {
            for (i, on) in indicators.iter().enumerate() {
                debug!(
                    "[BatteryMeter] Level: {}    State: {}",
                    i + 1,
                    if on { "On" } else { "Off" }
                );
            }
        }
    }
}
