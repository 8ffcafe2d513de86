//! Application core: pure domain logic, zero I/O.
//!
//! Business rules of the outlet: command parsing, the relay state machine,
//! page rendering and the reset policy.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod outlet;
pub mod ports;
pub mod relay;
pub mod router;
pub mod watchdog;
