//! GPIO input interface trait
//!
//! The autopilot only reads pins (helm buttons), so the interface is the
//! input half of a GPIO.

use crate::platform::Result;

/// Input bias
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioMode {
    /// Floating
    Input,
    InputPullUp,
    InputPullDown,
}

/// One input pin, owned by exactly one adapter
pub trait GpioInterface {
    /// `true` when the pin reads high
    fn read(&self) -> bool;

    /// Change the input bias
    ///
    /// # Errors
    ///
    /// `PlatformError::Gpio(GpioError::InvalidMode)` if the pin has no such
    /// bias.
    fn set_mode(&mut self, mode: GpioMode) -> Result<()>;

    fn mode(&self) -> GpioMode;
}
