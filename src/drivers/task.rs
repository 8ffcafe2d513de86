//! Named task spawning with explicit priority and stack.
//!
//! ESP-IDF implements `std::thread` on top of pthreads, which are thin
//! wrappers around FreeRTOS tasks.  `esp_pthread_set_cfg()` configures the
//! *next* `pthread_create()` from the calling thread, so the config→spawn
//! pair below must not be interleaved with other thread creation.

use std::thread::JoinHandle;

use crate::error::Result;

/// Spawn `f` as a FreeRTOS task named `name` (null-terminated, e.g.
/// `"watchdog\0"`) with the given priority and stack size.
#[cfg(target_os = "espidf")]
pub fn spawn_task(
    name: &'static str,
    priority: u8,
    stack_kb: usize,
    f: impl FnOnce() + Send + 'static,
) -> Result<JoinHandle<()>> {
    // SAFETY: the config struct is fully initialised by the default
    // constructor and only read by the next pthread_create on this thread.
    unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.prio = priority as _;
        cfg.stack_size = (stack_kb * 1024) as _;
        cfg.thread_name = name.as_ptr().cast();
        esp_idf_sys::esp!(esp_idf_sys::esp_pthread_set_cfg(&cfg))?;
    }

    let display_name = name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' (pri={}, stack={}KB)",
        display_name,
        priority,
        stack_kb
    );

    Ok(std::thread::Builder::new()
        .name(display_name.into())
        .spawn(f)?)
}

/// Host fallback: priority is ignored and the stack gets headroom for
/// unwinding, which the device never does.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_task(
    name: &'static str,
    _priority: u8,
    stack_kb: usize,
    f: impl FnOnce() + Send + 'static,
) -> Result<JoinHandle<()>> {
    let display_name = name.trim_end_matches('\0');
    log::info!("Spawning '{}' (sim, stack={}KB)", display_name, stack_kb);

    Ok(std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(stack_kb.max(64) * 1024)
        .spawn(f)?)
}
