//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Outlet (domain)
//! ```
//!
//! Driven adapters (pins, system metrics, restart, event sinks) implement
//! these traits.  The [`Outlet`](super::outlet::Outlet) device context
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Levels crossing this boundary are always logical: polarity is
//! the adapter's business.

use crate::error::Result;

use super::relay::RelayState;
use super::watchdog::ResetCause;

// ───────────────────────────────────────────────────────────────
// Switch port (driven adapter: domain → relay + LED)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the two switched outputs.
pub trait SwitchPort {
    /// Drive the relay to a logical level.
    fn drive_relay(&mut self, state: RelayState) -> Result<()>;

    /// Drive the status LED to a logical level.
    fn drive_led(&mut self, state: RelayState) -> Result<()>;

    /// Logical level currently latched on the relay output.
    fn relay_level(&mut self) -> Result<RelayState>;

    /// Logical level currently latched on the LED output.
    fn led_level(&mut self) -> Result<RelayState>;
}

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-only snapshot of the push-button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pressed => "PRESSED",
            Self::Released => "NOT PRESSED",
        }
    }
}

pub trait ButtonPort {
    fn button(&mut self) -> Result<ButtonState>;
}

// ───────────────────────────────────────────────────────────────
// System port (driven adapter: runtime metrics)
// ───────────────────────────────────────────────────────────────

/// Monotonic clock and heap metric.  Display-only; no invariant beyond
/// monotonic uptime.
pub trait SystemPort {
    /// Milliseconds since boot.
    fn uptime_ms(&self) -> u64;

    /// Free heap in bytes.
    fn free_heap_bytes(&self) -> u32;

    /// Whole seconds since boot.
    fn uptime_secs(&self) -> u64 {
        self.uptime_ms() / 1000
    }
}

// ───────────────────────────────────────────────────────────────
// Restart port (driven adapter: domain → chip reset)
// ───────────────────────────────────────────────────────────────

/// Unconditional device restart.  Never returns: nothing is saved and no
/// shutdown runs.
pub trait RestartPort {
    fn restart(&self, cause: ResetCause) -> !;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
