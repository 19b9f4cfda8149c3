//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use tiller::platform::mock::MockAdc;
//! use tiller::platform::traits::AdcInterface;
//!
//! let mut adc = MockAdc::new(12);
//! adc.set_value(2048);
//! assert_eq!(adc.read().unwrap(), 2048);
//! ```

#![cfg(any(test, feature = "mock"))]

mod adc;
mod gpio;
mod pwm;

pub use adc::MockAdc;
pub use gpio::MockGpio;
pub use pwm::MockPwm;
