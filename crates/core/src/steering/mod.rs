//! Steering mode controller
//!
//! - [`mode`]: `SteeringMode` sum type and `EnvironmentData`
//! - [`controller`]: Mode state machine producing the desired rudder angle

pub mod controller;
pub mod mode;

pub use controller::SteeringController;
pub use mode::{EnvironmentData, SteeringMode, SteeringModeKind};
