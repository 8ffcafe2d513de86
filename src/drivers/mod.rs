//! Pin drivers, hardware initialisation, and the watchdog task.

pub mod button;
pub mod console;
pub mod deadline_timer;
#[cfg(target_os = "espidf")]
pub mod hw_init;
pub mod polarity;
pub mod restart;
pub mod task;
pub mod watchdog;

