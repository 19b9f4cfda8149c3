//! Rudder servo: closed loop from desired rudder angle to actuator drive
//!
//! - [`rudder`]: `RudderServo` PID loop and raw sensor mapping
//!
//! # Design
//!
//! This module is pure `no_std` with no feature gates. The position sensor
//! and the H-bridge drive are injected through
//! [`RudderSensor`](crate::traits::RudderSensor) and
//! [`RudderActuator`](crate::traits::RudderActuator).

pub mod rudder;

pub use rudder::{angle_to_raw, raw_to_angle, RudderServo};
