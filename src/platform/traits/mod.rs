//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod adc;
pub mod gpio;
pub mod pwm;

// Re-export trait interfaces
pub use adc::AdcInterface;
pub use gpio::{GpioInterface, GpioMode};
pub use pwm::PwmInterface;
