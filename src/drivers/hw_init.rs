//! One-shot pin initialization.
//!
//! Claims the three GPIOs, configures the button pull-up and falling-edge
//! interrupt, and hands back a [`Board`] that speaks logical levels.  Called
//! once from `main()` before the outlet boots.

use esp_idf_hal::gpio::{Gpio0, Gpio12, Gpio13, Input, InputOutput, InterruptType, PinDriver, Pull};
use log::info;

use crate::adapters::hardware::HardwareAdapter;
use crate::error::Result;
use crate::pins;

use super::button::on_falling_edge;

/// Relay and LED are input-output so their latched level can be read back
/// for `/status`.
pub type Board = HardwareAdapter<
    PinDriver<'static, Gpio12, InputOutput>,
    PinDriver<'static, Gpio13, InputOutput>,
    PinDriver<'static, Gpio0, Input>,
>;

pub fn init_board(button: Gpio0, relay: Gpio12, led: Gpio13) -> Result<Board> {
    let relay = PinDriver::input_output(relay)?;
    let led = PinDriver::input_output(led)?;

    let mut button = PinDriver::input(button)?;
    button.set_pull(Pull::Up)?;
    button.set_interrupt_type(InterruptType::NegEdge)?;
    // SAFETY: the callback only stores to an atomic, which is ISR-safe.
    unsafe {
        button.subscribe(on_falling_edge)?;
    }
    button.enable_interrupt()?;

    info!(
        "hw_init: relay=GPIO{} led=GPIO{} (active-low) button=GPIO{} (active-low, negedge IRQ)",
        pins::RELAY_GPIO,
        pins::LED_GPIO,
        pins::BUTTON_GPIO
    );
    Ok(HardwareAdapter::new(relay, led, button))
}
