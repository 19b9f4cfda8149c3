//! Orientation estimation from interrupt-delivered inertial samples
//!
//! - [`types`]: `InertialSample` and `Orientation`
//! - [`calibration`]: Calibration offsets and the accumulator deriving them
//! - [`estimator`]: Gyro-integrating estimator with the calibration protocol

pub mod calibration;
pub mod estimator;
pub mod types;

pub use calibration::{
    CalibrationAccumulator, CalibrationOffsets, CalibrationProgress, CALIBRATION_PARAMS,
    PARAM_ACCEL_OFFSET_X, PARAM_ACCEL_OFFSET_Y, PARAM_ACCEL_OFFSET_Z, PARAM_GYRO_OFFSET_X,
    PARAM_GYRO_OFFSET_Y, PARAM_GYRO_OFFSET_Z, PARAM_MAG_OFFSET_X, PARAM_MAG_OFFSET_Y,
    PARAM_MAG_OFFSET_Z,
};
pub use estimator::{EstimatorState, OrientationEstimator};
pub use types::{InertialSample, Orientation};

/// Standard gravity (m/s²)
pub const GRAVITY: f32 = 9.80665;
