//! Fuzz target: `LevelMapper::compute_level` / `compute_percentage`
//!
//! Builds a mapper from arbitrary bounds and level count, feeds it an
//! arbitrary reading (NaN and infinities included), and asserts that it
//! never panics and that accepted configurations always yield an in-range
//! level.
//!
//! cargo fuzz run fuzz_level_mapper

#![no_main]

use battery_meter::{Calibration, LevelMapper, MeterConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 13 {
        return;
    }
    let word = |i: usize| u32::from_le_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);

    let calibration = Calibration {
        min: word(0),
        max: word(4),
    };
    let levels = data[8];
    let reading = f32::from_bits(word(9));

    let mapper = LevelMapper::new(calibration, levels);
    let level = mapper.compute_level(reading);
    let pct = mapper.compute_percentage(reading);
    assert!(pct <= 100, "percentage out of range: {}", pct);

    let config = MeterConfig {
        calibration,
        level_count: levels,
        ..MeterConfig::default()
    };
    if config.validate().is_ok() {
        assert!(
            (1..=levels).contains(&level.get()),
            "level {} outside 1..={}",
            level,
            levels
        );
    }
});
