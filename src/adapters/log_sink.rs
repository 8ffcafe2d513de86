//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Booted { relay } => {
                info!("BOOT | relay={}", relay.label());
            }
            AppEvent::Switched { command, relay } => {
                info!("SWITCH | cmd={:?} | relay={}", command, relay.label());
            }
            AppEvent::StatusServed(s) => {
                info!(
                    "STATUS | relay={} led={} button={} | heap={}B | up={}s",
                    s.relay.label(),
                    s.led.label(),
                    s.button.label(),
                    s.free_heap_bytes,
                    s.uptime_secs,
                );
            }
            AppEvent::UnknownRequest => {
                info!("REQUEST | unknown, default page");
            }
        }
    }
}
