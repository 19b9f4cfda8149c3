//! Rudder actuator over an H-bridge motor
//!
//! The servo loop expects `drive` to be total, so motor faults are logged
//! and counted here instead of being propagated.

use core::sync::atomic::{AtomicU32, Ordering};

use tiller_core::motor::{Motor, MotorError};
use tiller_core::traits::RudderActuator;

/// Counter for sampling drive fault logs (every 100th fault)
static DRIVE_FAULT_LOG_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Counter for sampling drive command logs
static DRIVE_LOG_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Rudder actuator driving a reversible motor
///
/// A zero intensity short-brakes the motor so the rudder holds against
/// water load; `with_coast_on_zero` switches to coasting instead.
pub struct RudderDrive<M: Motor> {
    motor: M,
    brake_on_zero: bool,
    faults: u32,
    last_intensity: f32,
}

impl<M: Motor> RudderDrive<M> {
    pub fn new(motor: M) -> Self {
        Self {
            motor,
            brake_on_zero: true,
            faults: 0,
            last_intensity: 0.0,
        }
    }

    /// Coast instead of braking when the servo asks for zero drive
    pub fn with_coast_on_zero(mut self) -> Self {
        self.brake_on_zero = false;
        self
    }

    /// Release the motor (coast) regardless of the last command
    ///
    /// Used on shutdown and when the servo stops.
    pub fn safe_stop(&mut self) {
        self.last_intensity = 0.0;
        if let Err(e) = self.motor.stop() {
            self.record_fault(e);
        }
    }

    /// Motor faults absorbed since creation
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Intensity applied by the last successful command
    pub fn last_intensity(&self) -> f32 {
        self.last_intensity
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    fn record_fault(&mut self, error: MotorError) {
        self.faults = self.faults.saturating_add(1);
        let count = DRIVE_FAULT_LOG_COUNTER.fetch_add(1, Ordering::Relaxed);
        if count % 100 == 0 {
            crate::log_error!(
                "Rudder drive fault: {} (total {})",
                error.as_str(),
                self.faults
            );
        }
    }
}

impl<M: Motor> RudderActuator for RudderDrive<M> {
    fn drive(&mut self, intensity: f32) {
        let intensity = if intensity.is_finite() {
            intensity.clamp(-1.0, 1.0)
        } else {
            0.0
        };

        let count = DRIVE_LOG_COUNTER.fetch_add(1, Ordering::Relaxed);
        if count % 100 == 0 {
            crate::log_trace!("Rudder drive: {}", intensity);
        }

        let result = if intensity == 0.0 && self.brake_on_zero {
            self.motor.brake()
        } else {
            self.motor.set_speed(intensity)
        };

        match result {
            Ok(()) => self.last_intensity = intensity,
            Err(e) => self.record_fault(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::PwmChannel;
    use crate::platform::mock::MockPwm;
    use crate::platform::traits::PwmInterface;
    use tiller_core::motor::HBridgeMotor;

    type TestMotor = HBridgeMotor<PwmChannel<MockPwm>, PwmChannel<MockPwm>>;

    fn drive() -> RudderDrive<TestMotor> {
        let motor = HBridgeMotor::new(
            PwmChannel::new(MockPwm::new()),
            PwmChannel::new(MockPwm::new()),
        );
        RudderDrive::new(motor)
    }

    fn duties(drive: &RudderDrive<TestMotor>) -> (f32, f32) {
        (
            drive.motor().in1().inner().duty_cycle(),
            drive.motor().in2().inner().duty_cycle(),
        )
    }

    #[test]
    fn test_positive_and_negative_drive() {
        let mut drive = drive();
        drive.drive(0.5);
        assert_eq!(duties(&drive), (0.5, 0.0));

        drive.drive(-0.25);
        assert_eq!(duties(&drive), (0.0, 0.25));
        assert_eq!(drive.last_intensity(), -0.25);
    }

    #[test]
    fn test_zero_brakes_by_default() {
        let mut drive = drive();
        drive.drive(0.0);
        assert_eq!(duties(&drive), (1.0, 1.0));
    }

    #[test]
    fn test_zero_coasts_when_configured() {
        let mut drive = drive().with_coast_on_zero();
        drive.drive(0.7);
        drive.drive(0.0);
        assert_eq!(duties(&drive), (0.0, 0.0));
    }

    #[test]
    fn test_out_of_range_and_nan_are_sanitized() {
        let mut drive = drive();
        drive.drive(3.0);
        assert_eq!(duties(&drive), (1.0, 0.0));

        drive.drive(f32::NAN);
        assert_eq!(drive.last_intensity(), 0.0);
        assert_eq!(drive.faults(), 0);
    }

    #[test]
    fn test_safe_stop_coasts() {
        let mut drive = drive();
        drive.drive(-0.8);
        drive.safe_stop();
        assert_eq!(duties(&drive), (0.0, 0.0));
        assert_eq!(drive.last_intensity(), 0.0);
    }

    #[test]
    fn test_faults_are_absorbed() {
        let mut pwm = MockPwm::new();
        pwm.fail = true;
        let motor = HBridgeMotor::new(
            PwmChannel::new(pwm),
            PwmChannel::new(MockPwm::new()),
        );
        let mut drive = RudderDrive::new(motor);

        drive.drive(0.5);
        drive.drive(-0.5);
        drive.safe_stop();
        assert_eq!(drive.faults(), 3);
        assert_eq!(drive.last_intensity(), 0.0);
    }
}
