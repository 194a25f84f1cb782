//! Meter controller — the hexagonal core.
//!
//! [`MeterController`] owns the level mapper, update gate, and activation
//! state machine, plus the ports it drives. The external scheduling loop
//! calls [`tick`](MeterController::tick) synchronously; a tick never
//! blocks and all state is mutated only from inside it.
//!
//! ```text
//!  ActivationSource ──▶ ┌──────────────────────────────┐
//!                       │       MeterController        │ ──▶ OutputStrategy
//!  SensorPort ────────▶ │ Activation · Gate · Mapper   │ ──▶ DiagnosticSink
//!  Clock ─────────────▶ └──────────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::activation::{ActivationController, ActivationMode, ActivationSource, Directive};
use crate::config::MeterConfig;
use crate::gate::UpdateGate;
use crate::level::{Calibration, Level, LevelMapper};

use super::events::{IndicatorStates, MeterEvent};
use super::ports::{Clock, DiagnosticSink, NoDiagnostics, OutputStrategy, SensorPort};

// ───────────────────────────────────────────────────────────────
// MeterController
// ───────────────────────────────────────────────────────────────

pub struct MeterController<S, O, A, C, D = NoDiagnostics> {
    sensor: S,
    output: O,
    activation: ActivationController<A>,
    clock: C,
    sink: D,
    mapper: LevelMapper,
    gate: UpdateGate,
    /// Level last committed to the indicators.
    displayed: Level,
    started: bool,
    refresh_count: u64,
}

impl<S, O, A, C> MeterController<S, O, A, C>
where
    S: SensorPort,
    O: OutputStrategy,
    A: ActivationSource,
    C: Clock,
{
    /// Build a controller. The update interval starts now; nothing is
    /// committed until the first [`tick`](Self::tick).
    pub fn new(config: &MeterConfig, sensor: S, output: O, activation: A, clock: C) -> Self {
        if config.mode != activation.mode() {
            warn!(
                "Configured mode {:?} differs from activation source {:?}; using the source",
                config.mode,
                activation.mode()
            );
        }
        if output.indicator_count() != usize::from(config.level_count) {
            warn!(
                "level_count {} does not match {} indicators",
                config.level_count,
                output.indicator_count()
            );
        }

        let gate = UpdateGate::new(config.update_interval_ms, clock.now_ms());

        Self {
            sensor,
            output,
            activation: ActivationController::new(activation),
            clock,
            sink: NoDiagnostics,
            mapper: LevelMapper::new(config.calibration, config.level_count),
            gate,
            displayed: Level::OFF,
            started: false,
            refresh_count: 0,
        }
    }
}

impl<S, O, A, C, D> MeterController<S, O, A, C, D>
where
    S: SensorPort,
    O: OutputStrategy,
    A: ActivationSource,
    C: Clock,
    D: DiagnosticSink,
{
    /// Attach a diagnostic sink, replacing the current one.
    pub fn with_diagnostics<D2: DiagnosticSink>(self, sink: D2) -> MeterController<S, O, A, C, D2> {
        MeterController {
            sensor: self.sensor,
            output: self.output,
            activation: self.activation,
            clock: self.clock,
            sink,
            mapper: self.mapper,
            gate: self.gate,
            displayed: self.displayed,
            started: self.started,
            refresh_count: self.refresh_count,
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one scheduling step: activation → gate → sensor → mapper → output.
    pub fn tick(&mut self) {
        if !self.started {
            self.started = true;
            self.announce();
        }

        let now = self.clock.now_ms();
        match self.activation.poll() {
            Directive::Refresh { forced } => {
                if self.gate.should_refresh(now, forced) {
                    self.refresh(now);
                }
            }
            Directive::Clear => self.clear(),
            Directive::Hold => {}
        }
    }

    /// Refresh now, regardless of the timer and the activation state.
    pub fn update_now(&mut self) {
        let now = self.clock.now_ms();
        self.refresh(now);
    }

    // ── Runtime settings ──────────────────────────────────────

    /// Replace the raw-reading bounds. Takes effect on the next refresh.
    pub fn recalibrate(&mut self, min: u32, max: u32) {
        let calibration = Calibration { min, max };
        self.mapper.recalibrate(calibration);
        info!(
            "Recalibrated: min={} max={} width={:.2}",
            min,
            max,
            self.mapper.level_width()
        );
        self.sink.emit(&MeterEvent::Recalibrated { calibration });
    }

    pub fn set_update_interval(&mut self, interval_ms: u32) {
        self.gate.set_interval(interval_ms);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Raw sensor reading (diagnostic).
    pub fn read_sensor(&mut self) -> f32 {
        self.sensor.read_raw()
    }

    /// Level for a fresh reading, `1..=N`. Does not touch the indicators.
    pub fn level(&mut self) -> Level {
        let reading = self.sensor.read_raw();
        self.mapper.compute_level(reading)
    }

    /// Charge estimate for a fresh reading, `0..=100`.
    pub fn percentage(&mut self) -> u8 {
        let reading = self.sensor.read_raw();
        self.mapper.compute_percentage(reading)
    }

    /// Level last committed to the indicators (0 when cleared).
    pub fn displayed_level(&self) -> Level {
        self.displayed
    }

    pub fn mode(&self) -> ActivationMode {
        self.activation.mode()
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    pub fn calibration(&self) -> Calibration {
        self.mapper.calibration()
    }

    pub fn update_interval_ms(&self) -> u32 {
        self.gate.interval_ms()
    }

    /// Refreshes performed since construction.
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn activation_source_mut(&mut self) -> &mut A {
        self.activation.source_mut()
    }

    // ── Internal ──────────────────────────────────────────────

    fn announce(&mut self) {
        let event = MeterEvent::Started {
            mode: self.activation.mode(),
            calibration: self.mapper.calibration(),
            levels: self.mapper.levels(),
            level_width: self.mapper.level_width(),
        };
        info!("BatteryMeter started: {}", event);
        self.sink.emit(&event);
    }

    fn refresh(&mut self, now: u32) {
        let reading = self.sensor.read_raw();
        let level = self.mapper.compute_level(reading);
        self.output.commit(level);
        self.gate.reset(now);
        self.displayed = level;
        self.refresh_count += 1;

        let event = MeterEvent::Refreshed {
            reading,
            level,
            percentage: self.mapper.compute_percentage(reading),
            indicators: IndicatorStates::for_level(level, self.output.indicator_count()),
        };
        debug!("{}", event);
        self.sink.emit(&event);
    }

    fn clear(&mut self) {
        self.output.commit(Level::OFF);
        self.displayed = Level::OFF;

        let event = MeterEvent::Cleared {
            indicators: IndicatorStates::for_level(Level::OFF, self.output.indicator_count()),
        };
        debug!("{}", event);
        self.sink.emit(&event);
    }
}
