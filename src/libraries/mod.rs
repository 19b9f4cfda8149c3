//! Hardware adapters
//!
//! Thin adapters from platform peripherals to the control core's external
//! interfaces.
//!
//! ## Libraries
//!
//! - `motor_driver`: PWM-backed H-bridge pins and the rudder drive actuator
//! - `rudder_sensor`: ADC-backed rudder position sensor
//! - `buttons`: GPIO-backed helm buttons

pub mod buttons;
pub mod motor_driver;
pub mod rudder_sensor;

// Re-export commonly used types
pub use buttons::GpioButtons;
pub use motor_driver::{PwmChannel, RudderDrive};
pub use rudder_sensor::AdcRudderSensor;
