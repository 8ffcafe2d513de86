//! Relay state machine.
//!
//! Authoritative on/off state of the relay.  Every transition writes the
//! relay output and then mirrors the LED to the same logical level, so the
//! LED is lit exactly when the relay is on.
//!
//! `pulse_cycle` blocks the calling thread for the whole off period.  The
//! device serves one connection at a time, so it accepts nothing new while
//! a cycle runs; queued clients wait in the listen backlog.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::error::Result;

use super::ports::SwitchPort;

/// Logical relay level.  Also used for the LED, which mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    On,
    Off,
}

impl RelayState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

pub struct Relay {
    state: RelayState,
    cycle_off_ms: u32,
}

impl Relay {
    /// The state is only a placeholder until the first [`set`](Self::set);
    /// the outlet drives the pins at boot.
    pub fn new(cycle_off_ms: u32) -> Self {
        Self {
            state: RelayState::Off,
            cycle_off_ms,
        }
    }

    /// Drive relay and LED to `state`.  Idempotent.
    pub fn set(&mut self, hw: &mut impl SwitchPort, state: RelayState) -> Result<()> {
        hw.drive_relay(state)?;
        hw.drive_led(state)?;
        if self.state != state {
            info!("Relay: {} -> {}", self.state.label(), state.label());
        }
        self.state = state;
        Ok(())
    }

    /// Off, block for the configured delay, on.  Always ends on.
    pub fn pulse_cycle(
        &mut self,
        hw: &mut impl SwitchPort,
        delay: &mut impl DelayNs,
    ) -> Result<()> {
        self.set(hw, RelayState::Off)?;
        info!("Relay: holding off for {} ms", self.cycle_off_ms);
        delay.delay_ms(self.cycle_off_ms);
        self.set(hw, RelayState::On)
    }

    pub fn current(&self) -> RelayState {
        self.state
    }
}
