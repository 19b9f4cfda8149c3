//! Device traits
//!
//! Hardware-independent trait definitions for device drivers. Register-level
//! protocol code for a specific sensor chip implements these and stays out
//! of this crate.

pub mod imu;

pub use imu::{ImuError, RawImu};
