//! Hard restart.
//!
//! On the device this is `esp_restart()`: the chip resets, the relay is
//! driven On again by the boot sequence.  On the host the process exits
//! with a cause-specific status so a supervising script can tell them apart.

use log::warn;

use crate::app::ports::RestartPort;
use crate::app::watchdog::ResetCause;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRestart;

impl SystemRestart {
    pub fn new() -> Self {
        Self
    }
}

impl RestartPort for SystemRestart {
    fn restart(&self, cause: ResetCause) -> ! {
        warn!("Restarting: {}", cause);

        #[cfg(target_os = "espidf")]
        {
            // SAFETY: esp_restart takes no arguments and never returns.
            unsafe { esp_idf_sys::esp_restart() };
            #[allow(unreachable_code)]
            loop {
                std::thread::park();
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            let code = match cause {
                ResetCause::ButtonPressed => 10,
                ResetCause::PeriodicTimeout => 11,
                ResetCause::Fault => 12,
            };
            std::process::exit(code)
        }
    }
}
