//! Accept loop.
//!
//! Serves connections strictly one after another, forever.  The listener is
//! polled non-blocking so the loop reaches its safe point (between
//! connections) even when no client shows up; that is where the operator
//! [`StopSignal`] is honoured.  The watchdog never waits for this loop.

use std::convert::Infallible;
use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::outlet::Outlet;
use crate::app::ports::{ButtonPort, EventSink, SwitchPort, SystemPort};
use crate::error::{Error, Result};

use super::connection::serve_connection;

/// Idle sleep between accept polls.
const ACCEPT_POLL_MS: u64 = 20;

/// Shared flag asking the accept loop to stop at its next safe point.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct Server {
    listener: TcpListener,
    stop: StopSignal,
}

impl Server {
    pub fn new(listener: TcpListener, stop: StopSignal) -> Result<Self> {
        listener.set_nonblocking(true)?;
        Ok(Self { listener, stop })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until a fault or an operator stop.  Only returns `Err`:
    /// [`Error::Interrupted`] for a stop, anything else is a fault.
    pub fn run<H, D, S, E>(&self, outlet: &mut Outlet<H, D, S, E>) -> Result<Infallible>
    where
        H: SwitchPort + ButtonPort,
        D: DelayNs,
        S: SystemPort,
        E: EventSink,
    {
        info!("HTTP: serving on {}", self.local_addr()?);
        loop {
            if self.stop.is_raised() {
                warn!("HTTP: stop requested, leaving accept loop");
                return Err(Error::Interrupted);
            }

            let (mut stream, peer) = match self.listener.accept() {
                Ok(conn) => conn,
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    std::thread::sleep(Duration::from_millis(ACCEPT_POLL_MS));
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            stream.set_nonblocking(false)?;
            info!("HTTP: client connected from {}", peer);

            let exchange = serve_connection(&mut stream, outlet)?;
            drop(stream);

            info!(
                "HTTP: {} served {:?} ({} headers, {} bytes) | free heap {} B",
                peer,
                exchange.command,
                exchange.headers,
                exchange.bytes,
                outlet.system().free_heap_bytes()
            );
        }
    }
}
