//! Control primitives shared by the steering and rudder servo loops
//!
//! - [`pid`]: PID loop with measured `dt` and output clamp
//! - [`angle`]: Compass angle normalization

pub mod angle;
pub mod pid;

pub use angle::{wrap_180, wrap_360};
pub use pid::{floor_dt, Pid, PidGains, PidState, MIN_DT_S};
