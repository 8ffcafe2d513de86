//! Minimal HTTP/1.0 control surface.
//!
//! One connection at a time: read the request line, route it, drain the
//! headers, answer `200 OK` with an HTML page, close.  There is no error
//! status; a fault ends the session and reaches the recovery boundary.

pub mod connection;
pub mod server;

pub use connection::{Exchange, serve_connection};
pub use server::{Server, StopSignal};

/// Every response starts with this, whatever the request was.
pub const STATUS_LINE: &[u8] = b"HTTP/1.0 200 OK\r\n\r\n";

/// Longest line read in one piece.  Longer lines are consumed in chunks of
/// this size and only the first chunk of the request line is routed.
pub const MAX_LINE: usize = 512;
