//! End-to-end meter runs against mock hardware.

use battery_meter::activation::ActivationMode;
use battery_meter::app::events::MeterEvent;
use battery_meter::drivers::hc595::Hc595Chain;
use battery_meter::drivers::button::DebouncedButton;
use battery_meter::drivers::{DirectPins, ShiftRegisterBank};
use battery_meter::{
    ActiveLevel, AlwaysOn, ButtonStatus, Calibration, Level, MeterConfig, MeterController,
    MomentaryButton, MomentaryPin,
};
use embedded_hal::digital::PinState;

use crate::mock_hw::{
    HwOp, ManualClock, ManualLine, RecordingPin, RecordingRegister, ScriptedButton,
    ScriptedSensor, VecSink, pin_bank,
};

const HIGH: PinState = PinState::High;
const LOW: PinState = PinState::Low;

fn lit(count: usize) -> Vec<Option<PinState>> {
    (0..5)
        .map(|i| Some(if i < count { HIGH } else { LOW }))
        .collect()
}

// ── AlwaysOn ──────────────────────────────────────────────────

#[test]
fn always_on_refreshes_on_first_tick_then_every_interval() {
    let (pins, log) = pin_bank(5);
    let output = DirectPins::new(pins, ActiveLevel::High);
    assert_eq!(log.pin_states(5), lit(0), "bank starts dark");
    log.clear();

    let sensor = ScriptedSensor::new(700.0);
    let clock = ManualClock::new(0);
    let config = MeterConfig::default();
    let mut meter = MeterController::new(&config, sensor.port(), output, AlwaysOn, &clock);

    meter.tick();
    assert_eq!(log.pin_states(5), lit(3));
    assert_eq!(meter.displayed_level(), Level::new(3));

    sensor.set(600.0);
    log.clear();
    clock.set(10);
    meter.tick();
    clock.set(59_999);
    meter.tick();
    assert!(log.is_empty(), "nothing committed inside the interval");

    clock.set(60_000);
    meter.tick();
    assert_eq!(log.pin_states(5), lit(1));
    assert_eq!(meter.refresh_count(), 2);
}

#[test]
fn interval_survives_clock_rollover() {
    let (pins, log) = pin_bank(5);
    let sensor = ScriptedSensor::new(900.0);
    let clock = ManualClock::new(u32::MAX - 1_000);
    let config = MeterConfig::default();
    let mut meter = MeterController::new(
        &config,
        sensor.port(),
        DirectPins::new(pins, ActiveLevel::High),
        AlwaysOn,
        &clock,
    );

    meter.tick();
    assert_eq!(meter.refresh_count(), 1);

    clock.advance(30_000);
    meter.tick();
    assert_eq!(meter.refresh_count(), 1);

    clock.advance(30_000);
    log.clear();
    meter.tick();
    assert_eq!(meter.refresh_count(), 2);
    assert_eq!(log.pin_states(5), lit(5));
}

#[test]
fn shorter_interval_takes_effect_on_next_tick() {
    let (pins, _log) = pin_bank(5);
    let sensor = ScriptedSensor::new(700.0);
    let clock = ManualClock::new(0);
    let mut meter = MeterController::new(
        &MeterConfig::default(),
        sensor.port(),
        DirectPins::new(pins, ActiveLevel::High),
        AlwaysOn,
        &clock,
    );

    meter.tick();
    meter.set_update_interval(1_000);
    assert_eq!(meter.update_interval_ms(), 1_000);

    clock.set(999);
    meter.tick();
    assert_eq!(meter.refresh_count(), 1);
    clock.set(1_000);
    meter.tick();
    assert_eq!(meter.refresh_count(), 2);
}

// ── Momentary pin ─────────────────────────────────────────────

#[test]
fn momentary_pin_shows_level_only_while_held() {
    let (pins, log) = pin_bank(5);
    let output = DirectPins::new(pins, ActiveLevel::High);
    log.clear();

    let line = ManualLine::new(true); // pulled up, released
    let sensor = ScriptedSensor::new(700.0);
    let clock = ManualClock::new(0);
    let config = MeterConfig::default().with_activation_pin(ActiveLevel::Low);
    let mut meter = MeterController::new(
        &config,
        sensor.port(),
        output,
        MomentaryPin::new(line.clone(), config.activation_level),
        &clock,
    );
    assert_eq!(meter.mode(), ActivationMode::MomentaryPin);

    meter.tick();
    assert!(log.is_empty(), "idle and released: no output");
    assert!(!meter.is_active());

    // Press: immediate forced refresh.
    clock.set(50);
    line.set_low();
    meter.tick();
    assert!(meter.is_active());
    assert_eq!(log.pin_states(5), lit(3));

    // Held: gated by the timer.
    sensor.set(900.0);
    log.clear();
    clock.set(100);
    meter.tick();
    assert!(log.is_empty());
    clock.set(60_050);
    meter.tick();
    assert_eq!(log.pin_states(5), lit(5));

    // Release: cleared at once.
    log.clear();
    clock.set(60_100);
    line.set_high();
    meter.tick();
    assert_eq!(log.pin_states(5), lit(0));
    assert_eq!(meter.displayed_level(), Level::OFF);

    // Stays released: no further writes.
    log.clear();
    clock.set(200_000);
    meter.tick();
    assert!(log.is_empty());
}

#[test]
fn repeated_presses_each_force_a_refresh() {
    let (pins, _log) = pin_bank(5);
    let line = ManualLine::new(false);
    let clock = ManualClock::new(0);
    let config = MeterConfig::default().with_activation_pin(ActiveLevel::High);
    let mut meter = MeterController::new(
        &config,
        ScriptedSensor::new(600.0).port(),
        DirectPins::new(pins, ActiveLevel::High),
        MomentaryPin::new(line.clone(), ActiveLevel::High),
        &clock,
    );

    for t in [100, 200, 300] {
        clock.set(t);
        line.set_high();
        meter.tick();
        clock.set(t + 50);
        line.set_low();
        meter.tick();
    }
    assert_eq!(meter.refresh_count(), 3);
    assert!(!meter.is_active());
}

// ── Momentary button ──────────────────────────────────────────

#[test]
fn momentary_button_short_press_cycle() {
    let (pins, log) = pin_bank(5);
    let output = DirectPins::new(pins, ActiveLevel::High);
    log.clear();

    let button = ScriptedButton::new([
        ButtonStatus::NotPressed,
        ButtonStatus::WasPressed,
        ButtonStatus::IsPressed,
        ButtonStatus::WasShortPressed,
        ButtonStatus::NotPressed, // re-poll after release
        ButtonStatus::NotPressed,
    ]);
    let clock = ManualClock::new(0);
    let config = MeterConfig {
        mode: ActivationMode::MomentaryButton,
        ..MeterConfig::default()
    };
    let mut meter = MeterController::new(
        &config,
        ScriptedSensor::new(700.0).port(),
        output,
        MomentaryButton::new(button),
        &clock,
    );

    meter.tick();
    assert!(log.is_empty());

    meter.tick(); // WasPressed
    assert_eq!(log.pin_states(5), lit(3));
    assert_eq!(meter.refresh_count(), 1);

    meter.tick(); // IsPressed, inside interval
    assert_eq!(meter.refresh_count(), 1);

    log.clear();
    meter.tick(); // WasShortPressed, then NotPressed
    assert_eq!(log.pin_states(5), lit(0));
    assert!(!meter.is_active());

    log.clear();
    meter.tick(); // NotPressed while idle
    assert!(log.is_empty());
}

#[test]
fn long_press_not_yet_released_keeps_indicators_lit() {
    let (pins, log) = pin_bank(5);
    let button = ScriptedButton::new([
        ButtonStatus::WasPressed,
        ButtonStatus::WasLongPressed,
        ButtonStatus::IsPressed, // re-poll: pressed again already
    ]);
    let clock = ManualClock::new(0);
    let mut meter = MeterController::new(
        &MeterConfig::default(),
        ScriptedSensor::new(900.0).port(),
        DirectPins::new(pins, ActiveLevel::High),
        MomentaryButton::new(button),
        &clock,
    );

    meter.tick();
    log.clear();
    meter.tick();
    assert!(log.is_empty());
    assert_eq!(meter.displayed_level(), Level::new(5));
}

#[test]
fn press_caught_on_release_repoll_refreshes_at_once() {
    let (pins, log) = pin_bank(5);
    let button = ScriptedButton::new([
        ButtonStatus::WasPressed,
        ButtonStatus::WasShortPressed,
        ButtonStatus::WasPressed, // re-poll: pressed again already
        ButtonStatus::IsPressed,
    ]);
    let sensor = ScriptedSensor::new(600.0);
    let clock = ManualClock::new(0);
    let mut meter = MeterController::new(
        &MeterConfig::default(),
        sensor.port(),
        DirectPins::new(pins, ActiveLevel::High),
        MomentaryButton::new(button),
        &clock,
    );

    meter.tick();
    assert_eq!(meter.displayed_level(), Level::new(1));

    sensor.set(900.0);
    clock.set(100);
    meter.tick();
    assert_eq!(meter.refresh_count(), 2);
    assert_eq!(meter.displayed_level(), Level::new(5));
    assert_eq!(log.lit_pins(5, HIGH), 5);

    clock.set(200);
    meter.tick(); // held, inside interval
    assert_eq!(meter.refresh_count(), 2);
    assert!(meter.is_active());
}

#[test]
fn debounced_button_drives_meter_end_to_end() {
    let (pins, log) = pin_bank(5);
    let output = DirectPins::new(pins, ActiveLevel::High);
    log.clear();

    let line = ManualLine::new(true);
    let clock = ManualClock::new(0);
    let button = DebouncedButton::new(line.clone(), ActiveLevel::Low, &clock);
    let mut meter = MeterController::new(
        &MeterConfig::default(),
        ScriptedSensor::new(700.0).port(),
        output,
        MomentaryButton::new(button),
        &clock,
    );

    line.set_low();
    for _ in 0..3 {
        meter.tick();
        clock.advance(20);
    }
    // 60 ms held: debounced press has been reported.
    meter.tick();
    assert_eq!(log.pin_states(5), lit(3));
    assert_eq!(log.lit_pins(5, HIGH), 3);

    line.set_high();
    log.clear();
    for _ in 0..4 {
        clock.advance(20);
        meter.tick();
    }
    assert_eq!(log.pin_states(5), lit(0));
    assert!(!meter.is_active());
}

// ── Shift register ────────────────────────────────────────────

#[test]
fn shift_register_bank_latches_once_per_refresh() {
    let log = crate::mock_hw::HwLog::new();
    let register = RecordingRegister::new(&log);
    let outputs = register.outputs();
    let bank = ShiftRegisterBank::new(register, &[7, 6, 5, 4, 3], ActiveLevel::High);

    let clock = ManualClock::new(0);
    let mut meter = MeterController::new(
        &MeterConfig::default(),
        ScriptedSensor::new(700.0).port(),
        bank,
        AlwaysOn,
        &clock,
    );
    meter.tick();

    let ops = log.ops();
    assert_eq!(ops.len(), 6);
    assert_eq!(log.latch_count(), 1);
    assert_eq!(ops.last(), Some(&HwOp::Latch));
    assert!(ops[..5].iter().all(|op| matches!(op, HwOp::Stage { .. })));

    // A second refresh stages a fresh batch behind its own latch.
    clock.set(60_000);
    meter.tick();
    assert_eq!(log.latch_count(), 2);
    assert_eq!(log.ops().len(), 12);

    let latched = *outputs.borrow();
    assert_eq!(&latched[3..8], &[LOW, LOW, HIGH, HIGH, HIGH]);
}

#[test]
fn hc595_chain_shifts_level_out_msb_first() {
    let log = crate::mock_hw::HwLog::new();
    let chain: Hc595Chain<_, _, _, 1> = Hc595Chain::new(
        RecordingPin::new(0, &log),
        RecordingPin::new(1, &log),
        RecordingPin::new(2, &log),
    );
    let bank = ShiftRegisterBank::new(chain, &[0, 1, 2, 3, 4], ActiveLevel::High);

    let clock = ManualClock::new(0);
    let mut meter = MeterController::new(
        &MeterConfig::default(),
        ScriptedSensor::new(700.0).port(),
        bank,
        AlwaysOn,
        &clock,
    );
    log.clear();
    meter.tick();

    assert_eq!(meter.output().transport().shadow(), &[0b0000_0111]);
    // Q7 goes out first.
    assert_eq!(
        log.writes_to(0),
        vec![LOW, LOW, LOW, LOW, LOW, HIGH, HIGH, HIGH]
    );
    // Eight clock pulses, one latch pulse.
    assert_eq!(log.writes_to(1).len(), 16);
    assert_eq!(log.writes_to(2), vec![HIGH, LOW]);
}

// ── Diagnostics ───────────────────────────────────────────────

#[test]
fn sink_sees_started_refreshed_and_cleared() {
    let (pins, _log) = pin_bank(5);
    let line = ManualLine::new(true);
    let clock = ManualClock::new(0);
    let config = MeterConfig::default().with_activation_pin(ActiveLevel::Low);
    let mut meter = MeterController::new(
        &config,
        ScriptedSensor::new(700.0).port(),
        DirectPins::new(pins, ActiveLevel::High),
        MomentaryPin::new(line.clone(), ActiveLevel::Low),
        &clock,
    )
    .with_diagnostics(VecSink::default());

    meter.tick();
    line.set_low();
    meter.tick();
    line.set_high();
    meter.tick();

    let events = &meter.sink().events;
    assert_eq!(events.len(), 3);
    assert!(matches!(
        events[0],
        MeterEvent::Started {
            mode: ActivationMode::MomentaryPin,
            levels: 5,
            ..
        }
    ));
    match &events[1] {
        MeterEvent::Refreshed {
            level,
            percentage,
            indicators,
            ..
        } => {
            assert_eq!(*level, Level::new(3));
            assert_eq!(*percentage, 47);
            assert_eq!(indicators.to_string(), "###..");
        }
        other => panic!("expected Refreshed, got {:?}", other),
    }
    assert_eq!(
        events[2].to_string(),
        "Battery level: 0 (deactivated) | [.....]"
    );
}

// ── Runtime control ───────────────────────────────────────────

#[test]
fn recalibrate_then_update_now_uses_new_bounds() {
    let (pins, log) = pin_bank(5);
    let clock = ManualClock::new(0);
    let mut meter = MeterController::new(
        &MeterConfig::default(),
        ScriptedSensor::new(700.0).port(),
        DirectPins::new(pins, ActiveLevel::High),
        AlwaysOn,
        &clock,
    )
    .with_diagnostics(VecSink::default());

    meter.tick();
    assert_eq!(log.pin_states(5), lit(3));

    meter.recalibrate(0, 1_000);
    assert_eq!(meter.calibration(), Calibration { min: 0, max: 1_000 });
    assert_eq!(meter.level(), Level::new(4));
    assert_eq!(log.pin_states(5), lit(3), "queries do not commit");

    clock.set(5);
    meter.update_now();
    assert_eq!(log.pin_states(5), lit(4));
    assert!(matches!(
        meter.sink().events.last(),
        Some(MeterEvent::Refreshed { percentage: 70, .. })
    ));
}

#[test]
fn update_now_ignores_idle_activation() {
    let (pins, log) = pin_bank(5);
    let clock = ManualClock::new(0);
    let config = MeterConfig::default().with_activation_pin(ActiveLevel::Low);
    let mut meter = MeterController::new(
        &config,
        ScriptedSensor::new(900.0).port(),
        DirectPins::new(pins, ActiveLevel::High),
        MomentaryPin::new(ManualLine::new(true), ActiveLevel::Low),
        &clock,
    );

    meter.tick();
    meter.update_now();
    assert_eq!(log.pin_states(5), lit(5));
    assert!(!meter.is_active());
}
