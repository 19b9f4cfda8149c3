//! tiller_core - Pure no_std control core for the tiller autopilot
//!
//! This crate contains the platform-agnostic control algorithms of a
//! small-vessel autopilot. Everything here is testable on host without any
//! feature flags or embassy dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Sensors, actuators and clocks injected via traits
//! - **Total per-tick functions**: control updates never fail
//!
//! # Modules
//!
//! - [`queue`]: Lock-free single-producer/single-consumer sample queue
//! - [`ahrs`]: Orientation estimator and IMU calibration
//! - [`control`]: PID loop and angle helpers
//! - [`steering`]: Steering mode state machine
//! - [`servo`]: Rudder servo closed loop
//! - [`motor`]: H-bridge motor abstraction for the rudder drive
//! - [`scheduler`]: Task metadata and fixed-rate cadences
//! - [`parameters`]: Parameter store and tuning blocks
//! - [`traits`]: External interfaces (clock, sample source, calibration
//!   store, rudder sensor, actuator, buttons) with mocks

#![no_std]

pub mod ahrs;
pub mod control;
pub mod motor;
pub mod parameters;
pub mod queue;
pub mod scheduler;
pub mod servo;
pub mod steering;
pub mod traits;
