//! Motor driver adapters
//!
//! The H-bridge truth table lives in `tiller_core::motor`. This module wires
//! it to platform PWM outputs and exposes the result as the rudder actuator.
//!
//! ## Example
//!
//! ```ignore
//! use tiller::libraries::{PwmChannel, RudderDrive};
//! use tiller_core::motor::HBridgeMotor;
//!
//! let motor = HBridgeMotor::new(PwmChannel::new(pwm_a), PwmChannel::new(pwm_b))
//!     .with_min_duty(0.15);
//! let mut drive = RudderDrive::new(motor);
//!
//! drive.drive(0.5);   // toward starboard
//! drive.safe_stop();
//! ```

pub mod pwm_channel;
pub mod rudder_drive;

pub use pwm_channel::PwmChannel;
pub use rudder_drive::RudderDrive;
