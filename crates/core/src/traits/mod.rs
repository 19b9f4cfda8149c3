//! External interfaces of the control core
//!
//! This module provides trait abstractions that decouple the control loops
//! from hardware adapters and platform services (Embassy, etc.).
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Hardware implementations live in the root crate

pub mod calibration;
pub mod input;
pub mod rudder;
pub mod sample;
pub mod time;

pub use calibration::{CalibrationStore, MockCalibrationStore};
pub use input::{Button, ButtonInput, MockButtons};
pub use rudder::{MockActuator, MockRudderSensor, RudderActuator, RudderSensor};
pub use sample::{MockSampleSource, SampleSource};
pub use time::{MockTime, TimeSource};
