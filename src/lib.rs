#![cfg_attr(not(test), no_std)]

//! tiller - Small-vessel autopilot firmware library
//!
//! This library provides the platform abstraction, device adapters and
//! orchestration around the pure control core in `tiller_core`.

// Platform abstraction layer
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Logging and firmware-side infrastructure
pub mod core;

// Hardware adapters for the control core's interfaces
pub mod libraries;

// Helm, soft rudder lock and the pipeline composition root
pub mod autopilot;

pub use tiller_core;
