//! ESP32 system adapter.
//!
//! Provides the monotonic clock and the free-heap metric behind
//! [`SystemPort`].
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` (microsecond
//!   precision, monotonic) and `esp_get_free_heap_size()`.
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` and a
//!   fixed heap figure for host-side testing and simulation.

use crate::app::ports::SystemPort;

/// Heap reported by the host simulation.
#[cfg(not(target_os = "espidf"))]
pub const SIM_FREE_HEAP_BYTES: u32 = 200 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct SystemAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl SystemPort for SystemAdapter {
    #[cfg(target_os = "espidf")]
    fn uptime_ms(&self) -> u64 {
        // SAFETY: RTC counter read, no side effects.
        (unsafe { esp_idf_sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[cfg(target_os = "espidf")]
    fn free_heap_bytes(&self) -> u32 {
        // SAFETY: heap statistics query, callable from any task.
        unsafe { esp_idf_sys::esp_get_free_heap_size() }
    }

    #[cfg(not(target_os = "espidf"))]
    fn free_heap_bytes(&self) -> u32 {
        SIM_FREE_HEAP_BYTES
    }
}
