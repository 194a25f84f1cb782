//! Battery Meter Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  ADC closure     DirectPins     MomentaryPin   LogSink   │
//! │  (SensorPort)    (Output)       (Activation)   (Sink)    │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │        MeterController (pure logic)                │  │
//! │  │  Activation · UpdateGate · LevelMapper             │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyOutputPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use battery_meter::adapters::log_sink::LogSink;
use battery_meter::adapters::time::MonotonicClock;
use battery_meter::drivers::DirectPins;
use battery_meter::{ActiveLevel, Error, MeterConfig, MeterController, MomentaryPin, pins};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("BatteryMeter v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = MeterConfig::default().with_activation_pin(ActiveLevel::Low);
    config.validate()?;
    if pins::LED_GPIOS.len() != usize::from(config.level_count) {
        return Err(Error::Init("LED pin map does not match level_count").into());
    }

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    // Battery sense: GPIO 4 / ADC1 CH3 (pins::BATTERY_SENSE_GPIO).
    let adc = AdcDriver::new(peripherals.adc1)?;
    let adc_config = AdcChannelConfig {
        attenuation: DB_11,
        ..Default::default()
    };
    let mut sense = AdcChannelDriver::new(&adc, peripherals.pins.gpio4, &adc_config)?;
    let sensor = || match adc.read(&mut sense) {
        Ok(raw) => f32::from(raw),
        Err(e) => {
            warn!("ADC read failed: {}", e);
            0.0
        }
    };

    let mut leds = Vec::with_capacity(pins::LED_GPIOS.len());
    for gpio in pins::LED_GPIOS {
        // SAFETY: each LED GPIO appears once in the pin map and is not
        // claimed through `peripherals.pins` anywhere else.
        let pin = unsafe { AnyOutputPin::new(gpio) };
        leds.push(PinDriver::output(pin)?);
    }
    let output = DirectPins::new(leds, config.indicator_on);

    let mut button = PinDriver::input(peripherals.pins.gpio0)?;
    button.set_pull(Pull::Up)?;
    let activation = MomentaryPin::new(button, config.activation_level);

    info!(
        "Pins: sense=GPIO{} leds={:?} activation=GPIO{}",
        pins::BATTERY_SENSE_GPIO,
        pins::LED_GPIOS,
        pins::ACTIVATION_GPIO
    );

    // ── 4. Main loop ──────────────────────────────────────────
    let mut meter =
        MeterController::new(&config, sensor, output, activation, MonotonicClock::new())
            .with_diagnostics(LogSink::new());

    loop {
        meter.tick();
        FreeRtos::delay_ms(pins::TICK_MS);
    }
}
