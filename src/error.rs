//! Unified error types for the outlet firmware.
//!
//! Every subsystem funnels into one `Error` enum so the top-level boundary
//! can map each kind to exactly one [`Recovery`] action.  All variants are
//! `Copy`; nothing here allocates.
//!
//! | Kind          | Recovery  |
//! |---------------|-----------|
//! | `Interrupted` | `Halt`    |
//! | everything else | `Restart` |

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A digital pin read or write failed.
    Pin(embedded_hal::digital::ErrorKind),
    /// Socket or stream I/O failed.
    Io(std::io::ErrorKind),
    /// WiFi association or addressing failed.
    Wifi(&'static str),
    /// Flash-time configuration is invalid.
    Config(&'static str),
    /// An ESP-IDF call returned a non-OK code.
    Platform(i32),
    /// The operator interrupted the firmware from the serial console.
    Interrupted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin(kind) => write!(f, "pin: {kind:?}"),
            Self::Io(kind) => write!(f, "io: {kind}"),
            Self::Wifi(msg) => write!(f, "wifi: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Platform(code) => write!(f, "esp-idf: error code {code}"),
            Self::Interrupted => write!(f, "interrupted by operator"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

#[cfg(target_os = "espidf")]
impl From<esp_idf_sys::EspError> for Error {
    fn from(e: esp_idf_sys::EspError) -> Self {
        Self::Platform(e.code())
    }
}

/// Lift an `embedded-hal` pin error into the firmware error.
pub fn pin_error<E: embedded_hal::digital::Error>(e: E) -> Error {
    Error::Pin(e.kind())
}

// ---------------------------------------------------------------------------
// Recovery policy
// ---------------------------------------------------------------------------

/// What the top-level boundary does with an error.  There is no retry tier
/// and no component-local repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Log and let the process stop (development only).
    Halt,
    /// Hard-restart the device; state is re-derived from pins and config.
    Restart,
}

impl Error {
    /// Map this error to its recovery action.  The match is exhaustive on
    /// purpose: a new variant must pick its recovery explicitly.
    pub const fn recovery(&self) -> Recovery {
        match self {
            Self::Interrupted => Recovery::Halt,
            Self::Pin(_)
            | Self::Io(_)
            | Self::Wifi(_)
            | Self::Config(_)
            | Self::Platform(_) => Recovery::Restart,
        }
    }
}

/// Recovery for a bootstrap error that may or may not carry a typed
/// [`Error`].  Unclassified faults restart.
pub fn recovery_for(err: &anyhow::Error) -> Recovery {
    err.downcast_ref::<Error>()
        .map_or(Recovery::Restart, Error::recovery)
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
