//! Watchdog task against the mock clock.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use outlet::app::ports::SystemPort;
use outlet::app::watchdog::{ResetCause, Watchdog};
use outlet::drivers::watchdog;

use super::mock_hw::{MockClock, Rig, UnwindRestart};

#[test]
fn idle_device_restarts_after_period() {
    static EDGE: AtomicBool = AtomicBool::new(false);
    let clock = MockClock::default();
    let wd = Watchdog::new(300_000, &EDGE, clock.uptime_ms());
    let handle = watchdog::spawn(wd, UnwindRestart, clock.clone(), 1).unwrap();

    clock.set_ms(299_999);
    std::thread::sleep(Duration::from_millis(20));
    assert!(!handle.is_finished());

    clock.set_ms(300_000);
    let payload = handle.join().unwrap_err();
    assert_eq!(
        *payload.downcast::<ResetCause>().unwrap(),
        ResetCause::PeriodicTimeout
    );
}

#[test]
fn requests_do_not_postpone_the_deadline() {
    static EDGE: AtomicBool = AtomicBool::new(false);
    let mut rig = Rig::new();
    let wd = Watchdog::new(300_000, &EDGE, rig.clock.uptime_ms());

    // a busy device: a power cycle every 2 s of mock time
    for _ in 0..149 {
        rig.outlet.route(b"GET /cycle HTTP/1.0\r\n").unwrap();
        assert_eq!(wd.poll(rig.clock.uptime_ms()), None);
    }
    rig.outlet.route(b"GET /cycle HTTP/1.0\r\n").unwrap();
    assert_eq!(rig.clock.uptime_ms(), 300_000);
    assert_eq!(wd.poll(rig.clock.uptime_ms()), Some(ResetCause::PeriodicTimeout));
}
