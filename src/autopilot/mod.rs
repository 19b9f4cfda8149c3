//! Autopilot orchestration
//!
//! Everything that sits above the control core: the operator's helm, the
//! soft rudder lock and the composition root that owns the pipeline.
//!
//! ## Modules
//!
//! - `helm`: standby/engaged state, tracking kind and setpoint from buttons
//! - `lock_ramp`: linear ramp into a rudder lock
//! - `pipeline`: the [`Autopilot`] composition root
//! - `embassy`: async runner and Embassy clock (`embassy` feature)

pub mod helm;
pub mod lock_ramp;
pub mod pipeline;

#[cfg(feature = "embassy")]
pub mod embassy;

pub use helm::{Helm, HelmModel, HelmState};
pub use lock_ramp::{LockPhase, SoftRudderLock};
pub use pipeline::{Autopilot, AutopilotConfig, NavigationInputs, TickReport};

#[cfg(feature = "embassy")]
pub use embassy::{run_control_loop, EmbassyTime};
