//! Mock PWM channel

use crate::platform::{
    error::{PlatformError, PwmError},
    traits::PwmInterface,
    Result,
};

/// Records duty writes; `fail` makes every write return `ChannelUnavailable`
#[derive(Debug, Default)]
pub struct MockPwm {
    duty_cycle: f32,
    enabled: bool,
    writes: u32,
    pub fail: bool,
}

impl MockPwm {
    /// Disabled channel at 0 % duty
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted duty writes
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl PwmInterface for MockPwm {
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()> {
        if self.fail {
            return Err(PlatformError::Pwm(PwmError::ChannelUnavailable));
        }
        if !(0.0..=1.0).contains(&duty_cycle) {
            return Err(PlatformError::Pwm(PwmError::InvalidDutyCycle));
        }
        self.duty_cycle = duty_cycle;
        self.writes += 1;
        Ok(())
    }

    fn duty_cycle(&self) -> f32 {
        self.duty_cycle
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.duty_cycle = 0.0;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
