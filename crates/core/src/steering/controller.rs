//! Steering mode controller
//!
//! Turns the active [`SteeringMode`] and an [`EnvironmentData`] snapshot into
//! a desired rudder angle.
//!
//! | Mode | Desired angle | PID state |
//! |------|---------------|-----------|
//! | `Off` | 0 | untouched |
//! | `RudderLock(a)` | `a` (clamped at entry) | untouched |
//! | tracking | PID on wrapped error, clamped | advanced |
//! | calibration | previous value | untouched |
//!
//! Every [`set_mode`](SteeringController::set_mode) clears the PID integral
//! and last error, including re-entering the same mode with a new setpoint.
//! A mode switch therefore never carries accumulated state across, and the
//! first tick after it is a single-step PID response.
//!
//! The tracking error `setpoint - field` is wrapped to (-180, 180], so the
//! vessel always turns the short way. The desired angle grows with the error
//! magnitude only up to 180 degrees: `TrackHeading(270)` at heading 0 is a
//! 90 degree turn to port, not 270 to starboard.

use super::mode::{EnvironmentData, SteeringMode};
use crate::control::{wrap_180, Pid};
use crate::parameters::SteeringParams;

/// Steering mode state machine with one PID loop
#[derive(Debug, Clone)]
pub struct SteeringController {
    mode: SteeringMode,
    pid: Pid,
    params: SteeringParams,
    desired_angle: f32,
}

impl SteeringController {
    /// Create a controller in `Off`
    pub fn new(params: SteeringParams) -> Self {
        Self {
            mode: SteeringMode::Off,
            pid: Pid::new(params.gains),
            params,
            desired_angle: 0.0,
        }
    }

    /// Switch mode and reset the PID
    ///
    /// A `RudderLock` angle is clamped to `±lock_max`; a non-finite lock
    /// angle centers the rudder.
    pub fn set_mode(&mut self, mode: SteeringMode) {
        self.mode = match mode {
            SteeringMode::RudderLock(angle) => SteeringMode::RudderLock(self.clamp_lock(angle)),
            other => other,
        };
        self.pid.reset();
    }

    fn clamp_lock(&self, angle: f32) -> f32 {
        if !angle.is_finite() {
            return 0.0;
        }
        angle.clamp(-self.params.lock_max, self.params.lock_max)
    }

    /// Run one tick with an externally measured `dt` (seconds)
    ///
    /// Returns the new desired rudder angle.
    pub fn update(&mut self, env: EnvironmentData, dt: f32) -> f32 {
        let error = match self.mode {
            SteeringMode::Off => {
                self.desired_angle = 0.0;
                return self.desired_angle;
            }
            SteeringMode::RudderLock(angle) => {
                self.desired_angle = angle;
                return self.desired_angle;
            }
            SteeringMode::TrackHeading(sp) => sp - env.heading,
            SteeringMode::TrackCourse(sp) => sp - env.course,
            SteeringMode::TrackWindAngle(sp) => sp - env.wind_direction,
            SteeringMode::CalibratePid
            | SteeringMode::CalibrateThreshold
            | SteeringMode::CalibrateImu => return self.desired_angle,
        };

        // Turn the short way round
        let error = wrap_180(error);
        self.desired_angle = self
            .pid
            .update_clamped(error, dt, self.params.output_max);
        self.desired_angle
    }

    /// Run one tick, measuring `dt` from the previous call's `now_ms`
    pub fn update_at(&mut self, env: EnvironmentData, now_ms: u64) -> f32 {
        let dt = self.pid.dt_since(now_ms);
        self.update(env, dt)
    }

    /// Latest computed desired rudder angle (degrees)
    pub fn desired_rudder_angle(&self) -> f32 {
        self.desired_angle
    }

    pub fn mode(&self) -> SteeringMode {
        self.mode
    }

    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    pub fn params(&self) -> &SteeringParams {
        &self.params
    }

    /// Apply new tuning; takes effect on the next tick
    pub fn set_params(&mut self, params: SteeringParams) {
        self.params = params;
        self.pid.set_gains(params.gains);
        if let SteeringMode::RudderLock(angle) = self.mode {
            self.mode = SteeringMode::RudderLock(self.clamp_lock(angle));
        }
    }
}

impl Default for SteeringController {
    fn default() -> Self {
        Self::new(SteeringParams::default())
    }
}
