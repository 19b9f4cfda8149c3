//! Platform abstraction layer
//!
//! Narrow peripheral traits the hardware adapters are written against. A
//! board support crate implements them for a concrete HAL; the mocks stand
//! in for host tests and simulations.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{AdcInterface, GpioInterface, PwmInterface};
