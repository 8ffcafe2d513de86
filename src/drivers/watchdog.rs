//! Watchdog task.
//!
//! Runs the [`Watchdog`] policy on its own FreeRTOS task so a restart never
//! waits for the connection handler: it may be blocked in `accept`, in a
//! slow client read, or inside a power cycle.  The task only sleeps, reads
//! the clock and the edge latch, and calls the diverging restart.
//!
//! On the device the periodic restart is primarily driven by the
//! [`deadline_timer`](super::deadline_timer) one-shot; the deadline check
//! here is the fallback should the timer task be starved.

use std::thread::JoinHandle;
use std::time::Duration;

use log::{info, warn};

use crate::app::ports::{RestartPort, SystemPort};
use crate::app::watchdog::Watchdog;
use crate::error::Result;

use super::task::spawn_task;

/// Above the main task so a busy handler cannot starve it.
const PRIORITY: u8 = 10;
const STACK_KB: usize = 4;

/// Start polling `watchdog` every `poll_ms`.  The returned handle only
/// completes if the restart port unwinds, which the device one never does.
pub fn spawn<R, C>(watchdog: Watchdog, restart: R, clock: C, poll_ms: u32) -> Result<JoinHandle<()>>
where
    R: RestartPort + Send + 'static,
    C: SystemPort + Send + 'static,
{
    info!(
        "Watchdog: armed, period {} ms, restart in {} ms, poll {} ms",
        watchdog.period_ms(),
        watchdog.remaining_ms(clock.uptime_ms()),
        poll_ms
    );
    spawn_task("watchdog\0", PRIORITY, STACK_KB, move || {
        run(&watchdog, &restart, &clock, poll_ms);
    })
}

/// The poll loop.  Never returns.
pub fn run<R, C>(watchdog: &Watchdog, restart: &R, clock: &C, poll_ms: u32) -> !
where
    R: RestartPort,
    C: SystemPort,
{
    let period = Duration::from_millis(u64::from(poll_ms.max(1)));
    loop {
        if let Some(cause) = watchdog.poll(clock.uptime_ms()) {
            warn!("Watchdog: {} at {} ms", cause, clock.uptime_ms());
            restart.restart(cause);
        }
        std::thread::sleep(period);
    }
}
