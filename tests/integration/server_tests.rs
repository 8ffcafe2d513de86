//! Loopback tests of the real accept loop over `std::net`.
//!
//! Each test moves a booted rig into a server thread, talks to it as an
//! HTTP client would, then raises the stop signal and takes the rig back.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use outlet::adapters::tcp_listener;
use outlet::app::relay::RelayState;
use outlet::app::watchdog::{ResetCause, Watchdog};
use outlet::drivers::watchdog;
use outlet::error::Error;
use outlet::http::{STATUS_LINE, Server, StopSignal};

use super::mock_hw::{Call, MockOutlet, Rig, UnwindRestart};

struct Running {
    port: u16,
    stop: StopSignal,
    handle: JoinHandle<(Error, MockOutlet)>,
}

fn serve(mut outlet: MockOutlet) -> Running {
    let listener = tcp_listener::bind(0, 5).unwrap();
    let port = listener.local_addr().unwrap().port();
    let stop = StopSignal::new();
    let server = Server::new(listener, stop.clone()).unwrap();
    let handle = std::thread::spawn(move || {
        let Err(e) = server.run(&mut outlet);
        (e, outlet)
    });
    Running { port, stop, handle }
}

impl Running {
    fn request(&self, raw: &[u8]) -> String {
        let mut client = TcpStream::connect(("127.0.0.1", self.port)).unwrap();
        client.write_all(raw).unwrap();
        let mut response = String::new();
        client.read_to_string(&mut response).unwrap();
        response
    }

    fn stop(self) -> (Error, MockOutlet) {
        self.stop.raise();
        self.handle.join().unwrap()
    }
}

#[test]
fn on_request_end_to_end() {
    let mut rig = Rig::new();
    rig.outlet.route(b"GET /off").unwrap();
    let relay_wire = rig.relay_wire.clone();

    let server = serve(rig.outlet);
    let response = server.request(b"GET /on HTTP/1.0\r\nHost: outlet\r\nAccept: */*\r\n\r\n");

    assert!(response.as_bytes().starts_with(STATUS_LINE));
    assert!(response.contains("<p>Switched Relais ON</p><hr>"));
    assert!(response.ends_with("</body></html>"));
    assert!(relay_wire.load(Ordering::SeqCst));

    let (err, outlet) = server.stop();
    assert_eq!(err, Error::Interrupted);
    assert_eq!(outlet.relay(), RelayState::On);
}

#[test]
fn connections_are_served_in_sequence() {
    let rig = Rig::new();
    let timeline = rig.timeline.clone();
    let server = serve(rig.outlet);

    assert!(server.request(b"GET /off HTTP/1.0\r\n\r\n").contains("Switched Relais OFF"));
    let status = server.request(b"GET /status HTTP/1.1\r\nHost: x\r\n\r\n");
    assert!(status.contains("<p>Relais Status is: OFF</p>"));
    let cycle = server.request(b"GET /cycle HTTP/1.0\n\n");
    assert!(cycle.contains("<p>Switched Relais OFF</p><p>Switched Relais ON</p><hr>"));

    let (_, outlet) = server.stop();
    assert_eq!(outlet.relay(), RelayState::On);
    assert!(timeline.calls().contains(&Call::Delay { ms: 2000 }));
}

#[test]
fn silent_client_gets_default_page() {
    let server = serve(Rig::new().outlet);

    let mut client = TcpStream::connect(("127.0.0.1", server.port)).unwrap();
    client.shutdown(Shutdown::Write).unwrap();
    let mut response = String::new();
    client.read_to_string(&mut response).unwrap();

    assert!(response.starts_with("HTTP/1.0 200 OK\r\n\r\n<html><head><title>Outlet TC</title>"));
    assert!(!response.contains("Switched"));
    server.stop();
}

#[test]
fn oversized_headers_are_drained() {
    let server = serve(Rig::new().outlet);
    let mut raw = b"GET /off HTTP/1.0\r\nCookie: ".to_vec();
    raw.extend(std::iter::repeat_n(b'z', 5000));
    raw.extend_from_slice(b"\r\n\r\n");

    assert!(server.request(&raw).contains("Switched Relais OFF"));
    let (_, outlet) = server.stop();
    assert_eq!(outlet.relay(), RelayState::Off);
}

#[test]
fn stop_before_any_client() {
    let server = serve(Rig::new().outlet);
    let (err, _) = server.stop();
    assert_eq!(err, Error::Interrupted);
}

#[test]
fn second_client_waits_out_a_power_cycle() {
    let (rig, gate) = Rig::gated();
    let server = serve(rig.outlet);
    let port = server.port;

    let cycling = std::thread::spawn(move || {
        let mut client = TcpStream::connect(("127.0.0.1", port)).unwrap();
        client.write_all(b"GET /cycle HTTP/1.0\r\n\r\n").unwrap();
        let mut response = String::new();
        client.read_to_string(&mut response).unwrap();
        response
    });
    assert_eq!(gate.entered(), 2000);

    // relay held off: the second client sits in the backlog
    let mut status = TcpStream::connect(("127.0.0.1", port)).unwrap();
    status.write_all(b"GET /status HTTP/1.0\r\n\r\n").unwrap();
    status
        .set_read_timeout(Some(Duration::from_millis(100)))
        .unwrap();
    let mut buf = [0u8; 64];
    let err = status.read(&mut buf).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut));
    assert!(!cycling.is_finished());

    gate.release();
    let cycle = cycling.join().unwrap();
    assert!(cycle.contains("<p>Switched Relais OFF</p><p>Switched Relais ON</p><hr>"));

    status.set_read_timeout(None).unwrap();
    let mut response = String::new();
    status.read_to_string(&mut response).unwrap();
    assert!(response.starts_with("HTTP/1.0 200 OK\r\n\r\n"));
    assert!(response.contains("<p>Relais Status is: ON</p>"));

    let (_, outlet) = server.stop();
    assert_eq!(outlet.relay(), RelayState::On);
}

#[test]
fn button_edge_mid_request_restarts_without_response() {
    static EDGE: AtomicBool = AtomicBool::new(false);
    let (rig, gate) = Rig::gated();
    let clock = rig.clock.clone();
    let server = serve(rig.outlet);

    let wd = watchdog::spawn(
        Watchdog::new(300_000, &EDGE, 0),
        UnwindRestart,
        clock,
        1,
    )
    .unwrap();

    // full request read and routed; the handler is inside the power cycle
    let mut client = TcpStream::connect(("127.0.0.1", server.port)).unwrap();
    client.write_all(b"GET /cycle HTTP/1.0\r\n\r\n").unwrap();
    assert_eq!(gate.entered(), 2000);

    EDGE.store(true, Ordering::Release);
    let payload = wd.join().expect_err("watchdog must restart");
    assert_eq!(
        *payload.downcast::<ResetCause>().unwrap(),
        ResetCause::ButtonPressed
    );

    // the restart came while the response was still unwritten
    client
        .set_read_timeout(Some(Duration::from_millis(50)))
        .unwrap();
    let mut buf = [0u8; 64];
    let err = client.read(&mut buf).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut));

    gate.release();
    server.stop();
}
