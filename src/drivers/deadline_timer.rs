//! One-shot deadline timer for the periodic restart.
//!
//! On the device an `esp_timer` one-shot runs `on_fire` from the ESP timer
//! task when the reset period elapses, so the periodic restart does not
//! depend on the watchdog poll loop being scheduled.  On simulation targets
//! a sleeping thread stands in for the timer.

use log::info;

use crate::error::Result;

/// Invoked exactly once when the deadline passes.
pub type OnFire = fn();

/// An armed timer.  It is never cancelled; keep it for the program's life.
pub struct DeadlineTimer {
    #[cfg(target_os = "espidf")]
    _handle: esp_idf_sys::esp_timer_handle_t,
    #[cfg(not(target_os = "espidf"))]
    _thread: std::thread::JoinHandle<()>,
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn fire_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `OnFire` pointer stored by `arm`; fn pointers
    // and data pointers have the same size on Xtensa and RISC-V.
    let on_fire = unsafe { core::mem::transmute::<*mut core::ffi::c_void, OnFire>(arg) };
    on_fire();
}

/// Arm a one-shot that calls `on_fire` after `delay_ms`.
#[cfg(target_os = "espidf")]
pub fn arm(delay_ms: u64, on_fire: OnFire) -> Result<DeadlineTimer> {
    use esp_idf_sys::{
        esp, esp_timer_create, esp_timer_create_args_t, esp_timer_dispatch_t_ESP_TIMER_TASK,
        esp_timer_handle_t, esp_timer_start_once,
    };

    let args = esp_timer_create_args_t {
        callback: Some(fire_cb),
        arg: on_fire as *mut core::ffi::c_void,
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: b"deadline\0".as_ptr() as *const _,
        skip_unhandled_events: false,
    };
    let mut handle: esp_timer_handle_t = core::ptr::null_mut();

    // SAFETY: `args` outlives the create call, which copies it; `handle` is
    // written once here and only started afterwards.
    unsafe {
        esp!(esp_timer_create(&args, &mut handle))?;
        esp!(esp_timer_start_once(handle, delay_ms.saturating_mul(1_000)))?;
    }

    info!("Deadline timer: one-shot armed, fires in {} ms", delay_ms);
    Ok(DeadlineTimer { _handle: handle })
}

#[cfg(not(target_os = "espidf"))]
pub fn arm(delay_ms: u64, on_fire: OnFire) -> Result<DeadlineTimer> {
    let thread = super::task::spawn_task("deadline\0", 10, 2, move || {
        std::thread::sleep(std::time::Duration::from_millis(delay_ms));
        on_fire();
    })?;

    info!("Deadline timer(sim): fires in {} ms", delay_ms);
    Ok(DeadlineTimer { _thread: thread })
}
