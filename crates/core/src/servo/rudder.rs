//! Rudder servo loop
//!
//! Each [`update`](RudderServo::update):
//!
//! 1. Reads the raw position and maps it linearly onto
//!    `[-angle_max, +angle_max]`, clamping readings outside the raw range
//! 2. Runs the PID on `target - measured` over the measured `dt`
//! 3. Scales the clamped output to an intensity in [-1, 1]
//!    (`output / drive_max`) and sends it to the actuator, or 0 when the
//!    error is inside the deadband
//!
//! The servo PID is never reset on a target change.

use libm::fabsf;

use crate::control::Pid;
use crate::parameters::RudderServoParams;
use crate::traits::{RudderActuator, RudderSensor, TimeSource};

/// Map a raw sensor reading to a rudder angle (degrees)
///
/// Readings outside `[raw_min, raw_max]` are clamped to the nearest end stop.
pub fn raw_to_angle(raw: u16, params: &RudderServoParams) -> f32 {
    if params.raw_max <= params.raw_min {
        return 0.0;
    }
    let raw = raw.clamp(params.raw_min, params.raw_max);
    let span = (params.raw_max - params.raw_min) as f32;
    let fraction = (raw - params.raw_min) as f32 / span;
    (fraction * 2.0 - 1.0) * params.angle_max
}

/// Inverse of [`raw_to_angle`], rounded to the nearest count
pub fn angle_to_raw(angle: f32, params: &RudderServoParams) -> u16 {
    if params.raw_max <= params.raw_min || !angle.is_finite() {
        return params.raw_min + (params.raw_max.saturating_sub(params.raw_min)) / 2;
    }
    let angle = angle.clamp(-params.angle_max, params.angle_max);
    let fraction = (angle / params.angle_max + 1.0) * 0.5;
    let span = (params.raw_max - params.raw_min) as f32;
    params.raw_min + (fraction * span + 0.5) as u16
}

/// Closed-loop rudder position controller
pub struct RudderServo<S: RudderSensor, A: RudderActuator, T: TimeSource> {
    sensor: S,
    actuator: A,
    time: T,
    pid: Pid,
    params: RudderServoParams,
    target_angle: f32,
    current_angle: f32,
    last_command: f32,
}

impl<S: RudderSensor, A: RudderActuator, T: TimeSource> RudderServo<S, A, T> {
    pub fn new(sensor: S, actuator: A, time: T, params: RudderServoParams) -> Self {
        Self {
            sensor,
            actuator,
            time,
            pid: Pid::new(params.gains),
            params,
            target_angle: 0.0,
            current_angle: 0.0,
            last_command: 0.0,
        }
    }

    /// Stop the drive and take a first position reading
    ///
    /// The target is set to the measured angle so the rudder stays put until
    /// a new target arrives.
    pub fn start(&mut self) -> f32 {
        self.actuator.drive(0.0);
        self.last_command = 0.0;
        self.current_angle = raw_to_angle(self.sensor.read_raw(), &self.params);
        self.target_angle = self.current_angle;
        self.current_angle
    }

    /// Store a new target; no computation until the next `update`
    ///
    /// The target is clamped to the sensor's angle range; a non-finite
    /// target is ignored.
    pub fn set_target_angle(&mut self, angle: f32) {
        if !angle.is_finite() {
            return;
        }
        self.target_angle = angle.clamp(-self.params.angle_max, self.params.angle_max);
    }

    /// Run one servo tick and return the intensity sent to the actuator
    pub fn update(&mut self) -> f32 {
        self.current_angle = raw_to_angle(self.sensor.read_raw(), &self.params);
        let dt = self.pid.dt_since(self.time.now_ms());

        let error = self.target_angle - self.current_angle;
        let output = self
            .pid
            .update_clamped(error, dt, self.params.drive_max);

        let intensity = if fabsf(error) <= self.params.deadband {
            0.0
        } else {
            (output / self.params.drive_max).clamp(-1.0, 1.0)
        };

        self.actuator.drive(intensity);
        self.last_command = intensity;
        intensity
    }

    /// Read the rudder position without driving
    pub fn measure(&mut self) -> f32 {
        self.current_angle = raw_to_angle(self.sensor.read_raw(), &self.params);
        self.current_angle
    }

    /// Stop the drive without changing the target
    pub fn stop(&mut self) {
        self.actuator.drive(0.0);
        self.last_command = 0.0;
    }

    /// Last measured rudder angle (degrees)
    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    /// Intensity sent by the last update
    pub fn last_command(&self) -> f32 {
        self.last_command
    }

    pub fn params(&self) -> &RudderServoParams {
        &self.params
    }

    pub fn set_params(&mut self, params: RudderServoParams) {
        self.params = params;
        self.pid.set_gains(params.gains);
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}
