//! Device drivers
//!
//! This module contains device adapters that use platform abstraction traits.
//!
//! ## Modules
//!
//! - `imu`: Interrupt-driven inertial sample producer and the interrupt
//!   registration table
//! - `traits`: Device trait definitions (RawImu)

pub mod imu;
pub mod traits;
