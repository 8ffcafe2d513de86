//! Pin polarity.
//!
//! The LED (GPIO13) and the button (GPIO0) are wired active-low.  Wrapping
//! them in [`ActiveLow`] lets every layer above the driver speak in logical
//! levels only: `set_high()` lights the LED, `is_high()` means pressed.

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

/// Inverts every level passing through the wrapped pin.
#[derive(Debug)]
pub struct ActiveLow<P>(P);

impl<P> ActiveLow<P> {
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &P {
        &self.0
    }
}

impl<P: ErrorType> ErrorType for ActiveLow<P> {
    type Error = P::Error;
}

impl<P: OutputPin> OutputPin for ActiveLow<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }
}

impl<P: StatefulOutputPin> StatefulOutputPin for ActiveLow<P> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.0.is_set_low()
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.0.is_set_high()
    }
}

impl<P: InputPin> InputPin for ActiveLow<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.is_low()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.0.is_high()
    }
}
