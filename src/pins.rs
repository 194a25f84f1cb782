//! GPIO assignments for the reference ESP32-S3 meter board.
//!
//! Single source of truth for the firmware binary. Change a pin here and
//! it propagates everywhere.

// ---------------------------------------------------------------------------
// Battery sense (ADC1)
// ---------------------------------------------------------------------------

/// Cell voltage through a 1:1 divider. ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const BATTERY_SENSE_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// Direct-drive LED bar, lowest segment first. Active HIGH.
pub const LED_GPIOS: [i32; 5] = [5, 6, 7, 15, 16];

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

/// "Show charge" push-button, active LOW with internal pull-up.
/// Shared with the BOOT strap; released at reset.
pub const ACTIVATION_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Main loop period. Fast enough that a press feels immediate.
pub const TICK_MS: u32 = 50;
