//! GPIO assignments for the Sonoff S20 outlet board.
//!
//! Single source of truth: drivers reference this module rather than
//! hard-coding pin numbers.  Polarity is recorded here and applied once in
//! the hardware adapter; the rest of the firmware only sees logical levels.

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Front-panel push-button.  Active LOW with pull-up; falling edge resets.
pub const BUTTON_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Relay coil driver switching the AC path.  Active HIGH.
/// The blue LED is wired to the coil and lights with it in hardware.
pub const RELAY_GPIO: i32 = 12;

/// Green status LED.  Active LOW; mirrors the relay logically.
pub const LED_GPIO: i32 = 13;

