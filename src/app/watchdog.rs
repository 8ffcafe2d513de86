//! Reset policy.
//!
//! Two independent triggers force a hard restart:
//!
//! - a falling edge on the button, latched by the GPIO interrupt into an
//!   atomic flag, and
//! - a fixed deadline `boot + period` that is never pushed back.  Successful
//!   requests do not feed it; the device reboots on a fixed cadence.
//!
//! This module only decides.  The poll loop lives in
//! [`drivers::watchdog`](crate::drivers::watchdog) and the restart itself
//! behind [`RestartPort`](super::ports::RestartPort).

use core::sync::atomic::{AtomicBool, Ordering};

/// Why the device is about to restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCause {
    /// Falling edge on the front-panel button.
    ButtonPressed,
    /// The fixed restart period elapsed.
    PeriodicTimeout,
    /// A fault reached the top-level boundary.
    Fault,
}

impl core::fmt::Display for ResetCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ButtonPressed => write!(f, "button pressed"),
            Self::PeriodicTimeout => write!(f, "periodic timeout"),
            Self::Fault => write!(f, "fault"),
        }
    }
}

pub struct Watchdog {
    deadline_ms: u64,
    period_ms: u64,
    edge: &'static AtomicBool,
}

impl Watchdog {
    /// Arm the watchdog at `now_ms`.  The deadline is fixed from here on.
    pub fn new(period_ms: u64, edge: &'static AtomicBool, now_ms: u64) -> Self {
        Self {
            deadline_ms: now_ms.saturating_add(period_ms),
            period_ms,
            edge,
        }
    }

    /// Decide whether to restart now.  A latched button edge wins over
    /// the deadline.
    pub fn poll(&self, now_ms: u64) -> Option<ResetCause> {
        if self.edge.load(Ordering::Acquire) {
            return Some(ResetCause::ButtonPressed);
        }
        if now_ms >= self.deadline_ms {
            return Some(ResetCause::PeriodicTimeout);
        }
        None
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Time left until the periodic restart.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.deadline_ms.saturating_sub(now_ms)
    }
}
