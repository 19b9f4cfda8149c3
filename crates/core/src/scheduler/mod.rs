//! Cooperative scheduling types for the control cadences
//!
//! This module provides the task metadata and fixed-rate cadence tracking
//! used by the composition root. There is no async runtime dependency: the
//! caller polls each cadence with the current time and runs the task when it
//! is due.
//!
//! # Components
//!
//! - [`types`]: `TaskMetadata` and `Cadence`
//!
//! # Example
//!
//! ```rust
//! use tiller_core::scheduler::{Cadence, TaskMetadata};
//!
//! const STEERING: TaskMetadata = TaskMetadata {
//!     name: "steering",
//!     rate_hz: 10,
//!     priority: 10,
//!     budget_us: 2_000,
//! };
//!
//! let mut cadence = Cadence::new(STEERING);
//! assert!(cadence.poll(0).is_some());
//! assert!(cadence.poll(50_000).is_none());
//! assert!(cadence.poll(100_000).is_some());
//! ```

pub mod types;

pub use types::*;
