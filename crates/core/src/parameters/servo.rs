//! Rudder Servo Parameter Definitions
//!
//! # Parameters
//!
//! - `RUD_P` / `RUD_I` / `RUD_D` - Servo PID gains
//! - `RUD_DEADBAND` - Error (degrees) below which the drive is stopped
//! - `RUD_DRIVE_MAX` - PID output magnitude mapped to full drive
//! - `RUD_RAW_MIN` / `RUD_RAW_MAX` - Raw sensor reading at full port / starboard
//! - `RUD_ANGLE_MAX` - Rudder angle (degrees) at either raw end stop

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::control::PidGains;

const DEFAULT_P: f32 = 1.0;
const DEFAULT_I: f32 = 0.0;
const DEFAULT_D: f32 = 0.0;
const DEFAULT_DEADBAND: f32 = 0.5;
const DEFAULT_DRIVE_MAX: f32 = 30.0;
const DEFAULT_RAW_MIN: i32 = 0;
const DEFAULT_RAW_MAX: i32 = 4095;
const DEFAULT_ANGLE_MAX: f32 = 25.0;

const MAX_GAIN: f32 = 100.0;

/// Rudder servo tuning and sensor mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RudderServoParams {
    pub gains: PidGains,
    /// Deadband on the angle error (degrees)
    pub deadband: f32,
    /// PID output giving full drive
    pub drive_max: f32,
    pub raw_min: u16,
    pub raw_max: u16,
    /// Angle at the raw end stops (degrees)
    pub angle_max: f32,
}

impl Default for RudderServoParams {
    fn default() -> Self {
        Self {
            gains: PidGains::new(DEFAULT_P, DEFAULT_I, DEFAULT_D),
            deadband: DEFAULT_DEADBAND,
            drive_max: DEFAULT_DRIVE_MAX,
            raw_min: DEFAULT_RAW_MIN as u16,
            raw_max: DEFAULT_RAW_MAX as u16,
            angle_max: DEFAULT_ANGLE_MAX,
        }
    }
}

impl RudderServoParams {
    /// Register servo parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("RUD_P", ParamValue::Float(DEFAULT_P), ParamFlags::empty())?;
        store.register("RUD_I", ParamValue::Float(DEFAULT_I), ParamFlags::empty())?;
        store.register("RUD_D", ParamValue::Float(DEFAULT_D), ParamFlags::empty())?;
        store.register(
            "RUD_DEADBAND",
            ParamValue::Float(DEFAULT_DEADBAND),
            ParamFlags::empty(),
        )?;
        store.register(
            "RUD_DRIVE_MAX",
            ParamValue::Float(DEFAULT_DRIVE_MAX),
            ParamFlags::empty(),
        )?;
        store.register(
            "RUD_RAW_MIN",
            ParamValue::Int(DEFAULT_RAW_MIN),
            ParamFlags::empty(),
        )?;
        store.register(
            "RUD_RAW_MAX",
            ParamValue::Int(DEFAULT_RAW_MAX),
            ParamFlags::empty(),
        )?;
        store.register(
            "RUD_ANGLE_MAX",
            ParamValue::Float(DEFAULT_ANGLE_MAX),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load servo parameters
    ///
    /// An inverted or empty raw range falls back to the default range.
    pub fn from_store(store: &ParameterStore) -> Self {
        let gain = |name, default| store.get_f32_or(name, default).clamp(0.0, MAX_GAIN);
        let raw = |name, default: i32| {
            store
                .get_f32_or(name, default as f32)
                .clamp(0.0, u16::MAX as f32) as u16
        };

        let mut raw_min = raw("RUD_RAW_MIN", DEFAULT_RAW_MIN);
        let mut raw_max = raw("RUD_RAW_MAX", DEFAULT_RAW_MAX);
        if raw_max <= raw_min {
            raw_min = DEFAULT_RAW_MIN as u16;
            raw_max = DEFAULT_RAW_MAX as u16;
        }

        Self {
            gains: PidGains::new(
                gain("RUD_P", DEFAULT_P),
                gain("RUD_I", DEFAULT_I),
                gain("RUD_D", DEFAULT_D),
            ),
            deadband: store
                .get_f32_or("RUD_DEADBAND", DEFAULT_DEADBAND)
                .clamp(0.0, 5.0),
            drive_max: store
                .get_f32_or("RUD_DRIVE_MAX", DEFAULT_DRIVE_MAX)
                .clamp(1.0, 1000.0),
            raw_min,
            raw_max,
            angle_max: store
                .get_f32_or("RUD_ANGLE_MAX", DEFAULT_ANGLE_MAX)
                .clamp(1.0, 45.0),
        }
    }
}
