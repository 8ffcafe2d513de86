//! Integration tests for the router → relay → pins pipeline.
//!
//! Drive the outlet with raw request lines and assert on wire levels, so
//! the active-low LED and button polarity are exercised end to end.

use super::mock_hw::{Call, HEAP_BYTES, Rig};

use outlet::app::commands::Command;
use outlet::app::events::AppEvent;
use outlet::app::relay::RelayState;

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_switches_relay_on_and_lights_led() {
    let rig = Rig::new();
    assert!(rig.relay_high(), "relay is active-high");
    assert!(!rig.led_high(), "LED is active-low: lit means wire low");
    assert_eq!(
        rig.sink.events(),
        vec![AppEvent::Booted {
            relay: RelayState::On
        }]
    );
}

// ── Switching ─────────────────────────────────────────────────

#[test]
fn off_drives_relay_low_and_led_wire_high() {
    let mut rig = Rig::new();
    rig.outlet.route(b"GET /off HTTP/1.0\r\n").unwrap();
    assert!(!rig.relay_high());
    assert!(rig.led_high());
    assert_eq!(
        rig.timeline.calls(),
        vec![
            Call::Wire {
                pin: "relay",
                high: false
            },
            Call::Wire {
                pin: "led",
                high: true
            },
        ]
    );
}

#[test]
fn on_then_status_reports_on() {
    let mut rig = Rig::new();
    rig.outlet.route(b"GET /off HTTP/1.0\r\n").unwrap();
    rig.outlet.route(b"GET /on HTTP/1.0\r\n").unwrap();
    let page = rig.outlet.route(b"GET /status HTTP/1.0\r\n").unwrap();
    assert!(page.body.contains("<p>Relais Status is: ON</p>"));
    assert!(page.body.contains("<p>Green LED Status is: ON</p>"));
}

#[test]
fn off_then_status_reports_off() {
    let mut rig = Rig::new();
    rig.outlet.route(b"GET /off HTTP/1.0\r\n").unwrap();
    let page = rig.outlet.route(b"GET /status HTTP/1.0\r\n").unwrap();
    assert!(page.body.contains("<p>Relais Status is: OFF</p>"));
    assert!(page.body.contains("<p>Green LED Status is: OFF</p>"));
}

#[test]
fn cycle_is_off_delay_on_in_that_order() {
    let mut rig = Rig::new();
    let page = rig.outlet.route(b"GET /cycle HTTP/1.0\r\n").unwrap();
    assert_eq!(page.command, Command::Cycle);

    let calls = rig.timeline.calls();
    assert_eq!(
        calls,
        vec![
            Call::Wire {
                pin: "relay",
                high: false
            },
            Call::Wire {
                pin: "led",
                high: true
            },
            Call::Delay { ms: 2000 },
            Call::Wire {
                pin: "relay",
                high: true
            },
            Call::Wire {
                pin: "led",
                high: false
            },
        ]
    );
    assert!(rig.relay_high());

    let off = page.body.find("Switched Relais OFF").unwrap();
    let on = page.body.find("Switched Relais ON").unwrap();
    assert!(off < on);
}

#[test]
fn configured_cycle_delay_is_honoured() {
    let mut config = outlet::config::OutletConfig::default();
    config.cycle_off_ms = 500;
    let mut rig = Rig::with_config(&config);
    rig.outlet.route(b"GET /cycle").unwrap();
    assert!(rig.timeline.calls().contains(&Call::Delay { ms: 500 }));
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn status_reads_button_and_metrics_without_writing() {
    let mut rig = Rig::new();
    rig.clock.set_ms(125_900);

    let page = rig.outlet.route(b"GET /status HTTP/1.0\r\n").unwrap();
    assert!(page.body.contains("<p>Button Status is: NOT PRESSED</p>"));
    assert!(page.body.contains(&format!("<p>Free Mem is: {HEAP_BYTES}</p>")));
    assert!(page.body.contains("<p>Uptime in sec: 125</p>"));

    rig.press(true);
    let page = rig.outlet.route(b"GET /status HTTP/1.0\r\n").unwrap();
    assert!(page.body.contains("<p>Button Status is: PRESSED</p>"));

    assert!(rig.timeline.calls().is_empty(), "status must not write pins");
}

#[test]
fn consecutive_status_pages_agree() {
    let mut rig = Rig::new();
    let a = rig.outlet.status().unwrap();
    let b = rig.outlet.status().unwrap();
    assert_eq!((a.relay, a.led, a.button), (b.relay, b.led, b.button));
}

// ── Unknown ───────────────────────────────────────────────────

#[test]
fn unknown_request_writes_nothing() {
    let mut rig = Rig::new();
    for line in [&b"GET / HTTP/1.0\r\n"[..], b"", b"PUT /on\r\n", b"\xc3\x28"] {
        let page = rig.outlet.route(line).unwrap();
        assert_eq!(page.command, Command::Unknown);
        assert!(page.body.ends_with("</body></html>"));
    }
    assert!(rig.timeline.calls().is_empty());
    assert!(rig.relay_high());
}

#[test]
fn title_comes_from_config() {
    let mut config = outlet::config::OutletConfig::default();
    config
        .apply(&[("OUTLET_TITLE", Some("Rack 3 PSU"))])
        .unwrap();
    let mut rig = Rig::with_config(&config);
    let page = rig.outlet.route(b"GET / HTTP/1.0\r\n").unwrap();
    assert!(page.body.starts_with("<html><head><title>Rack 3 PSU</title></head><body>"));
}
