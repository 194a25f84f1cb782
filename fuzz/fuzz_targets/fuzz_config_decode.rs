//! Fuzz target: `MeterConfig::from_bytes`
//!
//! Stored configs come back from flash; corrupted bytes must be rejected
//! with an error, never a panic, and anything that decodes must re-encode
//! to an equal config.
//!
//! cargo fuzz run fuzz_config_decode

#![no_main]

use battery_meter::MeterConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = MeterConfig::from_bytes(data) else {
        return;
    };
    let bytes = config.to_bytes().expect("decoded config must re-encode");
    let again = MeterConfig::from_bytes(&bytes).expect("re-encoded config must decode");
    assert_eq!(config, again);
});
