//! H-bridge input pin backed by a platform PWM channel

use tiller_core::motor::{MotorError, PwmPin};

use crate::platform::traits::PwmInterface;

/// [`PwmPin`] over a [`PwmInterface`]
///
/// The channel is enabled on construction with 0 % duty.
pub struct PwmChannel<P: PwmInterface> {
    pwm: P,
}

impl<P: PwmInterface> PwmChannel<P> {
    pub fn new(mut pwm: P) -> Self {
        // A failing zero write shows up on the first set_duty
        let _ = pwm.set_duty_cycle(0.0);
        pwm.enable();
        Self { pwm }
    }

    pub fn inner(&self) -> &P {
        &self.pwm
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.pwm
    }
}

impl<P: PwmInterface> PwmPin for PwmChannel<P> {
    #[inline]
    fn set_duty(&mut self, duty: f32) -> Result<(), MotorError> {
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| MotorError::HardwareFault)
    }
}
