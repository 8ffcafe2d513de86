//! Request router.
//!
//! Maps one request line to a [`Command`], applies its state transition on
//! the [`Outlet`] and renders the HTML page.  Every page is header +
//! command fragment + usage footer; there is no error page.  Faults from
//! the pins propagate to the caller instead.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::error::Result;

use super::commands::Command;
use super::events::{AppEvent, StatusReport};
use super::outlet::Outlet;
use super::ports::{ButtonPort, EventSink, SwitchPort, SystemPort};
use super::relay::RelayState;

const SWITCHED_ON: &str = "<p>Switched Relais ON</p>";
const SWITCHED_OFF: &str = "<p>Switched Relais OFF</p>";
const RULE: &str = "<hr>";

/// A rendered page, ready for the connection handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub command: Command,
    pub body: String,
}

impl<H, D, S, E> Outlet<H, D, S, E>
where
    H: SwitchPort + ButtonPort,
    D: DelayNs,
    S: SystemPort,
    E: EventSink,
{
    /// Dispatch `line` and render the response body.
    ///
    /// `/cycle` blocks for the relay's off period before returning.
    pub fn route(&mut self, line: &[u8]) -> Result<Page> {
        let command = Command::parse(line);
        debug!("Router: {:?} <- {:?}", command, String::from_utf8_lossy(line).trim_end());

        let mut body = String::with_capacity(640);
        let _ = write!(body, "<html><head><title>{}</title></head><body>", self.title);

        match command {
            Command::On => {
                info!("--> Switching relay ON");
                self.relay.set(&mut self.hw, RelayState::On)?;
                body.push_str(SWITCHED_ON);
                body.push_str(RULE);
            }
            Command::Off => {
                info!("--> Switching relay OFF");
                self.relay.set(&mut self.hw, RelayState::Off)?;
                body.push_str(SWITCHED_OFF);
                body.push_str(RULE);
            }
            Command::Cycle => {
                info!("--> Power cycling relay");
                body.push_str(SWITCHED_OFF);
                self.relay.pulse_cycle(&mut self.hw, &mut self.delay)?;
                body.push_str(SWITCHED_ON);
                body.push_str(RULE);
            }
            Command::Status => {
                let report = self.status()?;
                render_status(&mut body, &report);
                self.sink.emit(&AppEvent::StatusServed(report));
            }
            Command::Unknown => {
                self.sink.emit(&AppEvent::UnknownRequest);
            }
        }

        if command.mutates() {
            self.sink.emit(&AppEvent::Switched {
                command,
                relay: self.relay.current(),
            });
        }

        render_footer(&mut body);
        Ok(Page { command, body })
    }
}

fn render_status(body: &mut String, report: &StatusReport) {
    let _ = write!(
        body,
        "<p>Relais Status is: {}</p>\
         <p>Green LED Status is: {}</p>\
         <p>Button Status is: {}</p>\
         <p>Free Mem is: {}</p>\
         <p>Uptime in sec: {}</p>{RULE}",
        report.relay.label(),
        report.led.label(),
        report.button.label(),
        report.free_heap_bytes,
        report.uptime_secs,
    );
}

fn render_footer(body: &mut String) {
    body.push_str("<p>Usage:</p>");
    for (label, command) in [
        ("Switch on", Command::On),
        ("Switch off", Command::Off),
        ("Power cycle", Command::Cycle),
        ("Status", Command::Status),
    ] {
        if let Some(path) = command.path() {
            let _ = write!(body, "<p>{label}: <a href=\"{path}\">{path}</a></p>");
        }
    }
    body.push_str("</body></html>");
}
