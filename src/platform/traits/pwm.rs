//! PWM output interface trait
//!
//! One channel of a PWM slice driving one H-bridge input. The carrier
//! frequency is fixed when the platform builds the channel.

use crate::platform::Result;

/// Single PWM output
pub trait PwmInterface {
    /// Set duty as a fraction in [0.0, 1.0]
    ///
    /// # Errors
    ///
    /// `PlatformError::Pwm(PwmError::InvalidDutyCycle)` outside the range,
    /// `PlatformError::Pwm(PwmError::ChannelUnavailable)` if the slice is
    /// gone.
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()>;

    fn duty_cycle(&self) -> f32;

    /// Start driving the pin
    fn enable(&mut self);

    /// Release the pin (output low)
    fn disable(&mut self);

    fn is_enabled(&self) -> bool;
}
