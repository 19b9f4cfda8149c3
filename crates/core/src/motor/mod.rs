//! Rudder drive motor abstraction
//!
//! The rudder is moved by a reversible DC motor (or linear actuator) behind
//! a two-input H-bridge. This module provides the platform-independent
//! `Motor` trait and the H-bridge truth table; PWM hardware is injected
//! through [`PwmPin`].
//!
//! # Design
//!
//! This module is pure `no_std` with no feature gates. Platform-specific
//! PWM implementations belong in the root crate.

use libm::fabsf;

/// Motor control error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Speed value outside [-1.0, +1.0] range (or not finite)
    InvalidSpeed,
    /// Hardware PWM channel unavailable or initialization failed
    HardwareFault,
}

impl MotorError {
    /// Static description, usable by loggers without `core::fmt`
    pub const fn as_str(&self) -> &'static str {
        match self {
            MotorError::InvalidSpeed => "motor speed out of range",
            MotorError::HardwareFault => "motor PWM hardware fault",
        }
    }
}

impl core::fmt::Display for MotorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PWM pin abstraction for motor control
pub trait PwmPin {
    /// Set PWM duty cycle as a fraction [0.0, 1.0]
    ///
    /// # Errors
    ///
    /// Returns `MotorError::HardwareFault` if PWM hardware fails.
    fn set_duty(&mut self, duty: f32) -> Result<(), MotorError>;
}

/// Motor control trait (platform-independent)
///
/// Speed values are normalized to [-1.0, +1.0]:
/// - `+1.0` = full speed toward starboard rudder
/// - `0.0` = stopped
/// - `-1.0` = full speed toward port rudder
pub trait Motor {
    /// Set motor speed and direction
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidSpeed` if speed is outside [-1.0, +1.0] range.
    /// Returns `MotorError::HardwareFault` if PWM hardware fails.
    fn set_speed(&mut self, speed: f32) -> Result<(), MotorError>;

    /// Stop motor (coast mode - high-Z state)
    fn stop(&mut self) -> Result<(), MotorError>;

    /// Brake motor (short brake - active braking)
    ///
    /// Holds the rudder against the load better than coasting.
    fn brake(&mut self) -> Result<(), MotorError>;
}

/// Two-input H-bridge motor driver (DRV8837 style)
///
/// | IN1 | IN2 | Motor State                                |
/// |-----|-----|--------------------------------------------|
/// | 0   | 0   | Coast (High-Z, motor freewheels)           |
/// | PWM | 0   | Forward (speed = PWM duty cycle)           |
/// | 0   | PWM | Reverse (speed = PWM duty cycle)           |
/// | 1   | 1   | Brake (short brake, both terminals to GND) |
///
/// Two rudder-specific adjustments sit on top of the truth table:
///
/// - `min_duty`: a geared rudder motor does not turn below some duty, so
///   non-zero speeds are mapped onto `[min_duty, 1.0]`
/// - `reversed`: swaps IN1/IN2 when the motor is wired the other way round
pub struct HBridgeMotor<IN1, IN2>
where
    IN1: PwmPin,
    IN2: PwmPin,
{
    in1: IN1,
    in2: IN2,
    min_duty: f32,
    reversed: bool,
}

impl<IN1, IN2> HBridgeMotor<IN1, IN2>
where
    IN1: PwmPin,
    IN2: PwmPin,
{
    /// Create an H-bridge motor with no duty offset and normal polarity
    ///
    /// The PWM pins must be initialized and low; the motor starts coasting.
    pub fn new(in1: IN1, in2: IN2) -> Self {
        Self {
            in1,
            in2,
            min_duty: 0.0,
            reversed: false,
        }
    }

    /// Set the minimum duty applied to any non-zero speed (clamped to [0, 0.9])
    pub fn with_min_duty(mut self, min_duty: f32) -> Self {
        self.min_duty = if min_duty.is_finite() {
            min_duty.clamp(0.0, 0.9)
        } else {
            0.0
        };
        self
    }

    /// Swap drive direction
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    fn duty_for(&self, magnitude: f32) -> f32 {
        self.min_duty + (1.0 - self.min_duty) * magnitude
    }

    /// Get reference to IN1 pin
    pub fn in1(&self) -> &IN1 {
        &self.in1
    }

    /// Get reference to IN2 pin
    pub fn in2(&self) -> &IN2 {
        &self.in2
    }
}

impl<IN1, IN2> Motor for HBridgeMotor<IN1, IN2>
where
    IN1: PwmPin,
    IN2: PwmPin,
{
    /// - Forward (speed > 0): IN1=PWM, IN2=LOW
    /// - Reverse (speed < 0): IN1=LOW, IN2=PWM
    /// - Coast (speed = 0): IN1=LOW, IN2=LOW
    #[inline]
    fn set_speed(&mut self, speed: f32) -> Result<(), MotorError> {
        if !(-1.0..=1.0).contains(&speed) {
            return Err(MotorError::InvalidSpeed);
        }

        let speed = if self.reversed { -speed } else { speed };
        if speed > 0.0 {
            let duty = self.duty_for(speed);
            self.in2.set_duty(0.0)?;
            self.in1.set_duty(duty)?;
        } else if speed < 0.0 {
            let duty = self.duty_for(fabsf(speed));
            self.in1.set_duty(0.0)?;
            self.in2.set_duty(duty)?;
        } else {
            self.in1.set_duty(0.0)?;
            self.in2.set_duty(0.0)?;
        }
        Ok(())
    }

    #[inline]
    fn stop(&mut self) -> Result<(), MotorError> {
        self.in1.set_duty(0.0)?;
        self.in2.set_duty(0.0)?;
        Ok(())
    }

    #[inline]
    fn brake(&mut self) -> Result<(), MotorError> {
        self.in1.set_duty(1.0)?;
        self.in2.set_duty(1.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock PWM pin for testing (no hardware dependencies)
    #[derive(Debug)]
    struct MockPwmPin {
        duty: f32,
        fail: bool,
    }

    impl MockPwmPin {
        fn new() -> Self {
            Self {
                duty: 0.0,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                duty: 0.0,
                fail: true,
            }
        }
    }

    impl PwmPin for MockPwmPin {
        fn set_duty(&mut self, duty: f32) -> Result<(), MotorError> {
            if self.fail {
                return Err(MotorError::HardwareFault);
            }
            self.duty = duty;
            Ok(())
        }
    }

    fn motor() -> HBridgeMotor<MockPwmPin, MockPwmPin> {
        HBridgeMotor::new(MockPwmPin::new(), MockPwmPin::new())
    }

    #[test]
    fn test_forward_and_reverse() {
        let mut motor = motor();

        motor.set_speed(0.75).unwrap();
        assert_eq!(motor.in1().duty, 0.75);
        assert_eq!(motor.in2().duty, 0.0);

        motor.set_speed(-0.5).unwrap();
        assert_eq!(motor.in1().duty, 0.0);
        assert_eq!(motor.in2().duty, 0.5);
    }

    #[test]
    fn test_coast_stop_and_brake() {
        let mut motor = motor();
        motor.set_speed(0.3).unwrap();
        motor.set_speed(0.0).unwrap();
        assert_eq!((motor.in1().duty, motor.in2().duty), (0.0, 0.0));

        motor.brake().unwrap();
        assert_eq!((motor.in1().duty, motor.in2().duty), (1.0, 1.0));

        motor.stop().unwrap();
        assert_eq!((motor.in1().duty, motor.in2().duty), (0.0, 0.0));
    }

    #[test]
    fn test_invalid_speed() {
        let mut motor = motor();
        assert_eq!(motor.set_speed(1.5), Err(MotorError::InvalidSpeed));
        assert_eq!(motor.set_speed(-1.01), Err(MotorError::InvalidSpeed));
        assert_eq!(motor.set_speed(f32::NAN), Err(MotorError::InvalidSpeed));
    }

    #[test]
    fn test_min_duty_offsets_non_zero_speeds() {
        let mut motor = motor().with_min_duty(0.2);

        motor.set_speed(0.5).unwrap();
        assert!((motor.in1().duty - 0.6).abs() < 1e-6);

        motor.set_speed(-1.0).unwrap();
        assert!((motor.in2().duty - 1.0).abs() < 1e-6);

        // Zero stays a true coast
        motor.set_speed(0.0).unwrap();
        assert_eq!(motor.in1().duty, 0.0);
        assert_eq!(motor.in2().duty, 0.0);
    }

    #[test]
    fn test_reversed_polarity() {
        let mut motor = motor().with_reversed(true);
        motor.set_speed(0.4).unwrap();
        assert_eq!(motor.in1().duty, 0.0);
        assert_eq!(motor.in2().duty, 0.4);
    }

    #[test]
    fn test_hardware_fault_propagates() {
        let mut motor = HBridgeMotor::new(MockPwmPin::failing(), MockPwmPin::new());
        assert_eq!(motor.set_speed(0.5), Err(MotorError::HardwareFault));
        assert_eq!(motor.stop(), Err(MotorError::HardwareFault));
    }

    #[test]
    fn test_error_display() {
        extern crate std;
        use std::string::ToString;
        assert_eq!(
            MotorError::HardwareFault.to_string(),
            "motor PWM hardware fault"
        );
    }
}
