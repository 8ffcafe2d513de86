//! Reset button edge latch.
//!
//! ## Hardware
//!
//! Active-low momentary switch on GPIO0 with internal pull-up.  The GPIO
//! fires on the falling edge; the ISR only stores `true` into
//! [`BUTTON_EDGE`].  The watchdog thread observes the latch and restarts,
//! so no debounce or gesture classification is needed: the first edge is
//! the last thing the firmware does.

use core::sync::atomic::{AtomicBool, Ordering};

/// Set by the ISR, read by the watchdog.  Never cleared: the device
/// restarts once it is set.
pub static BUTTON_EDGE: AtomicBool = AtomicBool::new(false);

/// ISR handler: register this on the button GPIO falling edge.
/// Safe to call from interrupt context (lock-free atomic store).
pub fn on_falling_edge() {
    BUTTON_EDGE.store(true, Ordering::Release);
}
