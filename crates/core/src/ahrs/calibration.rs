//! IMU calibration offsets and the sample accumulator that derives them
//!
//! Offsets are plain per-axis values subtracted from every raw sample before
//! integration. They are derived with the vessel held still:
//!
//! - Gyroscope: mean rate (any non-zero mean at rest is bias)
//! - Accelerometer: mean reading with standard gravity removed from Z
//! - Magnetometer: hard iron offset as the midpoint of per-axis min/max
//!
//! Loading and saving the offsets belongs to a
//! [`CalibrationStore`](crate::traits::CalibrationStore).

use nalgebra::Vector3;

use super::types::InertialSample;
use super::GRAVITY;

/// Parameter names for the persisted calibration record
pub const PARAM_ACCEL_OFFSET_X: &str = "INS_ACC_OFS_X";
pub const PARAM_ACCEL_OFFSET_Y: &str = "INS_ACC_OFS_Y";
pub const PARAM_ACCEL_OFFSET_Z: &str = "INS_ACC_OFS_Z";

pub const PARAM_GYRO_OFFSET_X: &str = "INS_GYR_OFS_X";
pub const PARAM_GYRO_OFFSET_Y: &str = "INS_GYR_OFS_Y";
pub const PARAM_GYRO_OFFSET_Z: &str = "INS_GYR_OFS_Z";

pub const PARAM_MAG_OFFSET_X: &str = "INS_MAG_OFS_X";
pub const PARAM_MAG_OFFSET_Y: &str = "INS_MAG_OFS_Y";
pub const PARAM_MAG_OFFSET_Z: &str = "INS_MAG_OFS_Z";

/// All nine calibration parameter names, accel then gyro then mag
pub const CALIBRATION_PARAMS: [&str; 9] = [
    PARAM_ACCEL_OFFSET_X,
    PARAM_ACCEL_OFFSET_Y,
    PARAM_ACCEL_OFFSET_Z,
    PARAM_GYRO_OFFSET_X,
    PARAM_GYRO_OFFSET_Y,
    PARAM_GYRO_OFFSET_Z,
    PARAM_MAG_OFFSET_X,
    PARAM_MAG_OFFSET_Y,
    PARAM_MAG_OFFSET_Z,
];

/// Per-axis offsets, one per [`InertialSample`] channel
///
/// Default is all-zero, which is also what a missing or malformed persisted
/// record falls back to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationOffsets {
    /// Accelerometer offset (m/s²)
    pub accel: Vector3<f32>,
    /// Gyroscope bias (rad/s)
    pub gyro: Vector3<f32>,
    /// Magnetometer hard iron offset (µT)
    pub mag: Vector3<f32>,
}

impl Default for CalibrationOffsets {
    fn default() -> Self {
        Self {
            accel: Vector3::zeros(),
            gyro: Vector3::zeros(),
            mag: Vector3::zeros(),
        }
    }
}

impl CalibrationOffsets {
    /// Subtract the offsets from a raw sample
    pub fn apply(&self, raw: &InertialSample) -> InertialSample {
        InertialSample {
            accel: raw.accel - self.accel,
            gyro: raw.gyro - self.gyro,
            mag: raw.mag - self.mag,
        }
    }

    /// Flatten to the persisted order of [`CALIBRATION_PARAMS`]
    pub fn to_array(&self) -> [f32; 9] {
        [
            self.accel.x,
            self.accel.y,
            self.accel.z,
            self.gyro.x,
            self.gyro.y,
            self.gyro.z,
            self.mag.x,
            self.mag.y,
            self.mag.z,
        ]
    }

    /// Rebuild from the persisted order; any non-finite value rejects the
    /// whole record
    pub fn from_array(values: [f32; 9]) -> Option<Self> {
        if values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        Some(Self {
            accel: Vector3::new(values[0], values[1], values[2]),
            gyro: Vector3::new(values[3], values[4], values[5]),
            mag: Vector3::new(values[6], values[7], values[8]),
        })
    }

    /// Heuristic check for a non-default record
    pub fn is_calibrated(&self) -> bool {
        self.accel.norm() > 0.01 || self.mag.norm() > 0.01 || self.gyro.norm() > 0.001
    }
}

/// Progress of a running calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationProgress {
    /// Estimator is not calibrating
    Idle,
    /// Still gathering samples
    Collecting { collected: u16, required: u16 },
    /// Offsets derived, applied and handed to the store
    Complete,
}

/// Running statistics over calibration samples
///
/// Keeps sums and extrema only, so memory is constant regardless of the
/// sample count.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationAccumulator {
    count: u16,
    accel_sum: Vector3<f32>,
    gyro_sum: Vector3<f32>,
    mag_min: Vector3<f32>,
    mag_max: Vector3<f32>,
}

impl Default for CalibrationAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationAccumulator {
    pub fn new() -> Self {
        Self {
            count: 0,
            accel_sum: Vector3::zeros(),
            gyro_sum: Vector3::zeros(),
            mag_min: Vector3::repeat(f32::MAX),
            mag_max: Vector3::repeat(f32::MIN),
        }
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    /// Fold one raw sample in; non-finite samples are skipped
    pub fn add(&mut self, sample: &InertialSample) -> bool {
        if !sample.is_finite() {
            return false;
        }
        self.count = self.count.saturating_add(1);
        self.accel_sum += sample.accel;
        self.gyro_sum += sample.gyro;
        self.mag_min = self.mag_min.inf(&sample.mag);
        self.mag_max = self.mag_max.sup(&sample.mag);
        true
    }

    /// Derive offsets from what has been gathered, `None` if empty
    pub fn offsets(&self) -> Option<CalibrationOffsets> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f32;
        let mut accel = self.accel_sum / n;
        accel.z -= GRAVITY;

        Some(CalibrationOffsets {
            accel,
            gyro: self.gyro_sum / n,
            mag: (self.mag_min + self.mag_max) * 0.5,
        })
    }
}
