//! Outlet Firmware: Main Entry Point
//!
//! Hexagonal layout: the [`Outlet`] core sees the hardware only through
//! port traits; adapters plug the ESP32 in from the outside.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter   SystemAdapter   LogEventSink   WiFi STA   │
//! │  (Switch+Button)   (SystemPort)    (EventSink)    TCP :80    │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │  Outlet (pure logic): Relay · Router · Status page │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  Deadline one-shot + watchdog task (button latch) → restart  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::convert::Infallible;

use anyhow::{Context, Result};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::peripherals::Peripherals;
use log::{error, info, warn};

use outlet::adapters::log_sink::LogEventSink;
use outlet::adapters::system::SystemAdapter;
use outlet::adapters::{tcp_listener, wifi};
use outlet::app::outlet::Outlet;
use outlet::app::ports::{RestartPort, SystemPort};
use outlet::app::watchdog::{ResetCause, Watchdog};
use outlet::config::OutletConfig;
use outlet::diagnostics;
use outlet::drivers::button::BUTTON_EDGE;
use outlet::drivers::hw_init::init_board;
use outlet::drivers::restart::SystemRestart;
use outlet::drivers::{console, deadline_timer, task, watchdog};
use outlet::error::{Recovery, recovery_for};
use outlet::http::{Server, StopSignal};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Outlet v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    info!("Last reset: {}", diagnostics::reset_reason());

    // ── 2. Recovery boundary ──────────────────────────────────
    let restart = SystemRestart::new();
    match run(restart) {
        Ok(never) => match never {},
        Err(e) => match recovery_for(&e) {
            Recovery::Halt => {
                warn!("Stopped: {:#}", e);
                Ok(())
            }
            Recovery::Restart => {
                error!("Fault: {:#}", e);
                restart.restart(ResetCause::Fault)
            }
        },
    }
}

/// Runs in the ESP timer task when the reset period elapses.
fn periodic_restart() {
    SystemRestart::new().restart(ResetCause::PeriodicTimeout)
}

fn run(restart: SystemRestart) -> Result<Infallible> {
    diagnostics::install_panic_handler(restart);

    // ── 3. Flash-time configuration ───────────────────────────
    let config = OutletConfig::from_build_env().context("flash-time configuration")?;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 4. Watchdog first, so a hung bring-up still resets ────
    let system = SystemAdapter::new();
    let wd = Watchdog::new(config.reset_period_ms, &BUTTON_EDGE, system.uptime_ms());
    let _deadline = deadline_timer::arm(wd.remaining_ms(system.uptime_ms()), periodic_restart)?;
    watchdog::spawn(wd, restart, system, config.watchdog_poll_ms)?;

    // ── 5. Pins, relay on ─────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let board = init_board(
        peripherals.pins.gpio0,
        peripherals.pins.gpio12,
        peripherals.pins.gpio13,
    )?;
    let mut outlet = Outlet::new(board, FreeRtos, system, LogEventSink::new(), &config);
    outlet.boot()?;

    // ── 6. Network ────────────────────────────────────────────
    let sys_loop = EspSystemEventLoop::take()?;
    let _station = wifi::connect(peripherals.modem, sys_loop, &config.network)
        .context("WiFi station bring-up")?;
    let listener = tcp_listener::bind(config.http_port, config.http_backlog)?;

    // ── 7. Operator interrupt on the serial console ───────────
    let stop = StopSignal::new();
    let console_stop = stop.clone();
    task::spawn_task("console\0", 1, 3, move || {
        console::watch(std::io::stdin(), &console_stop);
    })?;

    // ── 8. Serve forever ──────────────────────────────────────
    let server = Server::new(listener, stop)?;
    Ok(server.run(&mut outlet)?)
}
