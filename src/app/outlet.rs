//! Device context: the hexagonal core.
//!
//! [`Outlet`] owns the relay state machine and every port the router
//! needs.  It is built once at startup and handed by `&mut` to the router
//! and the connection handler; there are no ambient globals.
//!
//! ```text
//!  SwitchPort ◀──┐                       ┌──▶ EventSink
//!  ButtonPort ──▶│  Outlet (Relay, page) │
//!  SystemPort ──▶│                       │
//!     DelayNs ◀──┘                       └
//! ```

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::OutletConfig;
use crate::error::Result;

use super::events::{AppEvent, StatusReport};
use super::ports::{ButtonPort, EventSink, SwitchPort, SystemPort};
use super::relay::{Relay, RelayState};

pub struct Outlet<H, D, S, E> {
    pub(super) hw: H,
    pub(super) delay: D,
    pub(super) system: S,
    pub(super) sink: E,
    pub(super) relay: Relay,
    pub(super) title: heapless::String<32>,
}

impl<H, D, S, E> Outlet<H, D, S, E>
where
    H: SwitchPort + ButtonPort,
    D: DelayNs,
    S: SystemPort,
    E: EventSink,
{
    /// Assemble the context.  Outputs are untouched until [`boot`](Self::boot).
    pub fn new(hw: H, delay: D, system: S, sink: E, config: &OutletConfig) -> Self {
        Self {
            hw,
            delay,
            system,
            sink,
            relay: Relay::new(config.cycle_off_ms),
            title: config.title.clone(),
        }
    }

    /// Switch the outlet on, as it must be after every (re)boot.
    pub fn boot(&mut self) -> Result<()> {
        self.relay.set(&mut self.hw, RelayState::On)?;
        self.sink.emit(&AppEvent::Booted {
            relay: self.relay.current(),
        });
        info!("Outlet: booted with relay {}", self.relay.current().label());
        Ok(())
    }

    /// Read pins and metrics for the status page.  No side effects.
    pub fn status(&mut self) -> Result<StatusReport> {
        Ok(StatusReport {
            relay: self.hw.relay_level()?,
            led: self.hw.led_level()?,
            button: self.hw.button()?,
            free_heap_bytes: self.system.free_heap_bytes(),
            uptime_secs: self.system.uptime_secs(),
        })
    }

    pub fn relay(&self) -> RelayState {
        self.relay.current()
    }

    pub fn system(&self) -> &S {
        &self.system
    }
}
