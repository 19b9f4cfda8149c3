//! Helm buttons on GPIO inputs
//!
//! Buttons are wired active-low to inputs with pull-ups: a pressed button
//! reads low. Edge detection belongs to the helm, so this adapter only
//! reports levels.

use tiller_core::traits::{Button, ButtonInput};

use crate::platform::traits::{GpioInterface, GpioMode};
use crate::platform::Result;

/// [`ButtonInput`] over six GPIO pins, ordered as [`Button::ALL`]
pub struct GpioButtons<P: GpioInterface> {
    pins: [P; 6],
}

impl<P: GpioInterface> GpioButtons<P> {
    /// Take the pins and switch each to pulled-up input
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio` if a pin mode cannot be set.
    pub fn new(mut pins: [P; 6]) -> Result<Self> {
        for pin in pins.iter_mut() {
            pin.set_mode(GpioMode::InputPullUp)?;
        }
        Ok(Self { pins })
    }

    pub fn pin_mut(&mut self, button: Button) -> &mut P {
        &mut self.pins[button.index()]
    }
}

impl<P: GpioInterface> ButtonInput for GpioButtons<P> {
    fn is_pressed(&self, button: Button) -> bool {
        !self.pins[button.index()].read()
    }
}
