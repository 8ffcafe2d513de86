//! Hardware adapter: bridges the three GPIOs to domain port traits.
//!
//! Owns the relay, LED and button pins, exposing them through
//! [`SwitchPort`] and [`ButtonPort`].  The LED and the button are wired
//! active-low; they are wrapped in [`ActiveLow`] here so the domain only
//! ever sees logical levels.  Generic over `embedded-hal` pins: the device
//! plugs in `PinDriver`s, tests plug in mocks.

use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};

use crate::app::ports::{ButtonPort, ButtonState, SwitchPort};
use crate::app::relay::RelayState;
use crate::drivers::polarity::ActiveLow;
use crate::error::{Result, pin_error};

/// Concrete adapter that combines the outlet's pins behind port traits.
pub struct HardwareAdapter<R, L, B> {
    relay: R,
    led: ActiveLow<L>,
    button: ActiveLow<B>,
}

impl<R, L, B> HardwareAdapter<R, L, B> {
    /// `led` and `button` are the raw active-low pins.
    pub fn new(relay: R, led: L, button: B) -> Self {
        Self {
            relay,
            led: ActiveLow::new(led),
            button: ActiveLow::new(button),
        }
    }
}

fn drive(pin: &mut impl OutputPin, state: RelayState) -> Result<()> {
    match state {
        RelayState::On => pin.set_high(),
        RelayState::Off => pin.set_low(),
    }
    .map_err(pin_error)
}

fn level(pin: &mut impl StatefulOutputPin) -> Result<RelayState> {
    let on = pin.is_set_high().map_err(pin_error)?;
    Ok(if on { RelayState::On } else { RelayState::Off })
}

// ── SwitchPort implementation ─────────────────────────────────

impl<R, L, B> SwitchPort for HardwareAdapter<R, L, B>
where
    R: StatefulOutputPin,
    L: StatefulOutputPin,
{
    fn drive_relay(&mut self, state: RelayState) -> Result<()> {
        drive(&mut self.relay, state)
    }

    fn drive_led(&mut self, state: RelayState) -> Result<()> {
        drive(&mut self.led, state)
    }

    fn relay_level(&mut self) -> Result<RelayState> {
        level(&mut self.relay)
    }

    fn led_level(&mut self) -> Result<RelayState> {
        level(&mut self.led)
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<R, L, B: InputPin> ButtonPort for HardwareAdapter<R, L, B> {
    fn button(&mut self) -> Result<ButtonState> {
        let pressed = self.button.is_high().map_err(pin_error)?;
        Ok(if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        })
    }
}
