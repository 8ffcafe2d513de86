//! Crash handling and boot diagnostics.
//!
//! A custom panic hook logs the panic and restarts through the same
//! [`RestartPort`] the watchdog uses, with [`ResetCause::Fault`].  Nothing
//! is persisted; the reason for the previous reset is read back from the
//! chip at boot instead.

use std::any::Any;

use log::error;

use crate::app::ports::RestartPort;
use crate::app::watchdog::ResetCause;

/// Best-effort text of a panic payload.
pub fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

// ───────────────────────────────────────────────────────────────
// Custom panic handler: restart instead of abort
// ───────────────────────────────────────────────────────────────

/// Install a panic hook that restarts the device.
///
/// Must be called once during init, before the watchdog task starts, so a
/// panic on any thread ends in the same restart.
pub fn install_panic_handler<R>(restart: R)
where
    R: RestartPort + Send + Sync + 'static,
{
    std::panic::set_hook(Box::new(move |info| {
        let reason = panic_reason(info.payload());
        match info.location() {
            Some(loc) => error!("PANIC: {} at {}:{}", reason, loc.file(), loc.line()),
            None => error!("PANIC: {}", reason),
        }
        restart.restart(ResetCause::Fault);
    }));
}

/// Why the chip came out of its last reset.
#[cfg(target_os = "espidf")]
pub fn reset_reason() -> &'static str {
    use esp_idf_sys as sys;
    // SAFETY: reads a latched RTC register, no side effects.
    match unsafe { sys::esp_reset_reason() } {
        sys::esp_reset_reason_t_ESP_RST_POWERON => "power-on",
        sys::esp_reset_reason_t_ESP_RST_EXT => "external pin",
        sys::esp_reset_reason_t_ESP_RST_SW => "software (watchdog or button)",
        sys::esp_reset_reason_t_ESP_RST_PANIC => "panic",
        sys::esp_reset_reason_t_ESP_RST_INT_WDT => "interrupt WDT",
        sys::esp_reset_reason_t_ESP_RST_TASK_WDT => "task WDT",
        sys::esp_reset_reason_t_ESP_RST_WDT => "other WDT",
        sys::esp_reset_reason_t_ESP_RST_BROWNOUT => "brownout",
        _ => "unknown",
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn reset_reason() -> &'static str {
    "host start"
}
