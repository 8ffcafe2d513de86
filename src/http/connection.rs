//! Per-connection request handling.
//!
//! ```text
//! READ_REQUEST_LINE → ROUTE → DRAIN_HEADERS → WRITE_RESPONSE
//! ```
//!
//! Generic over any `Read + Write` stream so it runs unchanged over a lwIP
//! socket, a host `TcpStream` or an in-memory buffer.  Closing is the
//! caller's job: it drops the stream.

use std::io::{BufRead, BufReader, Read, Write};

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::app::commands::Command;
use crate::app::outlet::Outlet;
use crate::app::ports::{ButtonPort, EventSink, SwitchPort, SystemPort};
use crate::error::Result;

use super::{MAX_LINE, STATUS_LINE};

/// What one connection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub command: Command,
    /// Header lines drained after the request line.
    pub headers: usize,
    /// Response bytes written, status line included.
    pub bytes: usize,
}

/// Read one line of at most [`MAX_LINE`] bytes into `buf`.  Returns 0 at
/// end of stream.
fn read_bounded_line(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> std::io::Result<usize> {
    buf.clear();
    reader.take(MAX_LINE as u64).read_until(b'\n', buf)
}

fn is_blank(line: &[u8]) -> bool {
    line == b"\r\n" || line == b"\n"
}

/// Consume header lines until a blank line or end of stream.
///
/// `at_line_start` is false when the request line was cut at
/// [`MAX_LINE`]; its tail is then consumed first and never mistaken for
/// the blank terminator.
fn drain_headers(reader: &mut impl BufRead, mut at_line_start: bool) -> std::io::Result<usize> {
    let mut buf = Vec::with_capacity(MAX_LINE);
    let mut lines = 0;
    loop {
        if read_bounded_line(reader, &mut buf)? == 0 {
            return Ok(lines);
        }
        let complete = buf.ends_with(b"\n");
        if at_line_start && is_blank(&buf) {
            return Ok(lines);
        }
        if at_line_start {
            lines += 1;
            trace!("HTTP: header {:?}", String::from_utf8_lossy(&buf).trim_end());
        }
        at_line_start = complete;
    }
}

/// Serve one request on `stream`.
///
/// A `/cycle` request holds the connection open for the whole off period.
pub fn serve_connection<S, H, D, Sy, E>(
    stream: &mut S,
    outlet: &mut Outlet<H, D, Sy, E>,
) -> Result<Exchange>
where
    S: Read + Write,
    H: SwitchPort + ButtonPort,
    D: DelayNs,
    Sy: SystemPort,
    E: EventSink,
{
    let (page, headers) = {
        let mut reader = BufReader::with_capacity(MAX_LINE, &mut *stream);

        let mut line = Vec::with_capacity(MAX_LINE);
        read_bounded_line(&mut reader, &mut line)?;
        debug!("HTTP: request {:?}", String::from_utf8_lossy(&line).trim_end());

        let page = outlet.route(&line)?;
        let headers = if line.is_empty() {
            0
        } else {
            drain_headers(&mut reader, line.ends_with(b"\n"))?
        };
        (page, headers)
    };

    stream.write_all(STATUS_LINE)?;
    stream.write_all(page.body.as_bytes())?;
    stream.flush()?;

    Ok(Exchange {
        command: page.command,
        headers,
        bytes: STATUS_LINE.len() + page.body.len(),
    })
}
