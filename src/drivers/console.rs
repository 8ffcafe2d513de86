//! Serial console interrupt.
//!
//! Watches the console for Ctrl-C (0x03) and raises the [`StopSignal`], so
//! an operator on the UART can drop the firmware out of its accept loop
//! without a reset.  Every other byte is ignored.

use std::io::{ErrorKind, Read};
use std::time::Duration;

use log::{info, warn};

use crate::http::StopSignal;

/// ASCII ETX, sent by terminals for Ctrl-C.
pub const CTRL_C: u8 = 0x03;

const IDLE_POLL_MS: u64 = 50;

/// Read `console` until Ctrl-C or end of input.  Returns whether the stop
/// was raised.
pub fn watch(mut console: impl Read, stop: &StopSignal) -> bool {
    let mut byte = [0u8; 1];
    loop {
        match console.read(&mut byte) {
            Ok(1) if byte[0] == CTRL_C => {
                info!("Console: Ctrl-C received");
                stop.raise();
                return true;
            }
            Ok(1) => {}
            Ok(_) => return false,
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::Interrupted => {
                std::thread::sleep(Duration::from_millis(IDLE_POLL_MS));
            }
            Err(e) => {
                warn!("Console: read failed ({}), interrupt disabled", e);
                return false;
            }
        }
    }
}
