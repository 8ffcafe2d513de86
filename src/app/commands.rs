//! Inbound commands parsed from the HTTP request line.
//!
//! The request line is never fully parsed: it is prefix-matched against a
//! fixed table, in a fixed order, and the first hit wins.  So
//! `GET /onion HTTP/1.0` still switches the relay on, and a line that is
//! not even valid UTF-8 falls through to [`Command::Unknown`].

/// The entire command surface of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Relay and LED on.
    On,
    /// Relay and LED off.
    Off,
    /// Off, wait, on.
    Cycle,
    /// Render pin levels and runtime metrics.
    Status,
    /// Anything else: default page, no state change.
    Unknown,
}

/// Dispatch order.  Changing it changes which command a line maps to.
const PREFIXES: [(&[u8], Command); 4] = [
    (b"GET /on", Command::On),
    (b"GET /off", Command::Off),
    (b"GET /cycle", Command::Cycle),
    (b"GET /status", Command::Status),
];

impl Command {
    /// Classify a raw request line.
    pub fn parse(line: &[u8]) -> Self {
        PREFIXES
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix))
            .map_or(Self::Unknown, |&(_, cmd)| cmd)
    }

    /// Whether routing this command can change relay state.
    pub const fn mutates(self) -> bool {
        matches!(self, Self::On | Self::Off | Self::Cycle)
    }

    /// Link target shown in the usage footer.
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::On => Some("/on"),
            Self::Off => Some("/off"),
            Self::Cycle => Some("/cycle"),
            Self::Status => Some("/status"),
            Self::Unknown => None,
        }
    }
}
