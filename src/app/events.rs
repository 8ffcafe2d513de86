//! Outbound application events.
//!
//! The [`Outlet`](super::outlet::Outlet) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them; in production they go to the serial log.

use super::commands::Command;
use super::ports::ButtonState;
use super::relay::RelayState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Outputs driven to their boot level.
    Booted { relay: RelayState },

    /// A switching command was applied.
    Switched { command: Command, relay: RelayState },

    /// `/status` was rendered from this snapshot.
    StatusServed(StatusReport),

    /// The request line matched nothing; default page served.
    UnknownRequest,
}

/// Everything the status page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub relay: RelayState,
    pub led: RelayState,
    pub button: ButtonState,
    pub free_heap_bytes: u32,
    pub uptime_secs: u64,
}
