//! Line-oriented text sink.
//!
//! Writes one `[BatteryMeter] ...` line per event, followed by one line per
//! indicator for commit events. Works with any [`core::fmt::Write`]: a
//! `String` in tests, a UART wrapper on the board.

use core::fmt::Write;

use crate::app::events::MeterEvent;
use crate::app::ports::DiagnosticSink;

pub struct TextSink<W> {
    out: W,
    per_indicator: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            per_indicator: true,
        }
    }

    /// Only the summary line per event.
    #[must_use]
    pub fn summary_only(mut self) -> Self {
        self.per_indicator = false;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &MeterEvent) -> core::fmt::Result {
        writeln!(self.out, "[BatteryMeter] {}", event)?;
        if !self.per_indicator {
            return Ok(());
        }
        if let Some(indicators) = event.indicators() {
            for (i, on) in indicators.iter().enumerate() {
                writeln!(
                    self.out,
                    "[BatteryMeter] Level: {}    State: {}",
                    i + 1,
                    if on { "On" } else { "Off" }
                )?;
            }
        }
        Ok(())
    }
}

impl<W: Write> DiagnosticSink for TextSink<W> {
    fn emit(&mut self, event: &MeterEvent) {
        // A full or broken stream must not disturb metering.
        let _ = self.write_event(event);
    }
}
