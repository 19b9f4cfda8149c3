//! Inertial sample and orientation types

use nalgebra::Vector3;

use crate::control::wrap_360;

/// One 9-axis reading from the IMU
///
/// Units: accelerometer m/s², gyroscope rad/s, magnetometer µT. Produced at
/// interrupt time and copied by value through the sample queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertialSample {
    pub accel: Vector3<f32>,
    pub gyro: Vector3<f32>,
    pub mag: Vector3<f32>,
}

impl InertialSample {
    pub fn new(accel: Vector3<f32>, gyro: Vector3<f32>, mag: Vector3<f32>) -> Self {
        Self { accel, gyro, mag }
    }

    /// Stationary, level reading: gravity on Z, no rotation
    pub fn at_rest() -> Self {
        Self {
            accel: Vector3::new(0.0, 0.0, super::GRAVITY),
            gyro: Vector3::zeros(),
            mag: Vector3::zeros(),
        }
    }

    /// True when all nine channels are finite
    pub fn is_finite(&self) -> bool {
        self.accel.iter().all(|v| v.is_finite())
            && self.gyro.iter().all(|v| v.is_finite())
            && self.mag.iter().all(|v| v.is_finite())
    }
}

impl Default for InertialSample {
    fn default() -> Self {
        Self {
            accel: Vector3::zeros(),
            gyro: Vector3::zeros(),
            mag: Vector3::zeros(),
        }
    }
}

/// Vessel attitude in degrees
///
/// The fields are wrap-free accumulators: yaw in particular drifts past 360
/// or below 0. Use [`Orientation::heading_deg`] when a compass heading is
/// needed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

impl Orientation {
    pub fn new(pitch: f32, roll: f32, yaw: f32) -> Self {
        Self { pitch, roll, yaw }
    }

    /// Yaw normalized to [0, 360)
    pub fn heading_deg(&self) -> f32 {
        wrap_360(self.yaw)
    }
}
