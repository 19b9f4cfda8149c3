//! Steering Parameter Definitions
//!
//! # Parameters
//!
//! - `STEER_P` / `STEER_I` / `STEER_D` - Steering PID gains
//! - `STEER_OUT_MAX` - Clamp on the tracking-mode rudder output (degrees)
//! - `STEER_LOCK_MAX` - Clamp on the rudder-lock angle (degrees)
//!
//! The two clamps are independent so the lock path and the closed-loop path
//! can be given different mechanical envelopes.

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::control::PidGains;

const DEFAULT_P: f32 = 1.0;
const DEFAULT_I: f32 = 0.0;
const DEFAULT_D: f32 = 0.0;

/// Default tracking output clamp in degrees
const DEFAULT_OUT_MAX: f32 = 25.0;

/// Default rudder-lock clamp in degrees
const DEFAULT_LOCK_MAX: f32 = 25.0;

const MAX_GAIN: f32 = 100.0;
const MIN_ANGLE: f32 = 1.0;
const MAX_ANGLE: f32 = 45.0;

/// Steering controller tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    pub gains: PidGains,
    /// Tracking-mode output clamp (degrees)
    pub output_max: f32,
    /// Rudder-lock clamp (degrees)
    pub lock_max: f32,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            gains: PidGains::new(DEFAULT_P, DEFAULT_I, DEFAULT_D),
            output_max: DEFAULT_OUT_MAX,
            lock_max: DEFAULT_LOCK_MAX,
        }
    }
}

impl SteeringParams {
    /// Register steering parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("STEER_P", ParamValue::Float(DEFAULT_P), ParamFlags::empty())?;
        store.register("STEER_I", ParamValue::Float(DEFAULT_I), ParamFlags::empty())?;
        store.register("STEER_D", ParamValue::Float(DEFAULT_D), ParamFlags::empty())?;
        store.register(
            "STEER_OUT_MAX",
            ParamValue::Float(DEFAULT_OUT_MAX),
            ParamFlags::empty(),
        )?;
        store.register(
            "STEER_LOCK_MAX",
            ParamValue::Float(DEFAULT_LOCK_MAX),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load steering parameters, clamping to valid ranges
    pub fn from_store(store: &ParameterStore) -> Self {
        let gain = |name, default| store.get_f32_or(name, default).clamp(0.0, MAX_GAIN);
        let angle = |name, default| store.get_f32_or(name, default).clamp(MIN_ANGLE, MAX_ANGLE);

        Self {
            gains: PidGains::new(
                gain("STEER_P", DEFAULT_P),
                gain("STEER_I", DEFAULT_I),
                gain("STEER_D", DEFAULT_D),
            ),
            output_max: angle("STEER_OUT_MAX", DEFAULT_OUT_MAX),
            lock_max: angle("STEER_LOCK_MAX", DEFAULT_LOCK_MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steering_params_defaults() {
        let mut store = ParameterStore::new();
        SteeringParams::register_defaults(&mut store).unwrap();

        let params = SteeringParams::from_store(&store);
        assert_eq!(params, SteeringParams::default());
        assert_eq!(params.gains.kp, 1.0);
        assert_eq!(params.output_max, 25.0);
        assert_eq!(params.lock_max, 25.0);
    }

    #[test]
    fn test_steering_params_custom_and_clamped() {
        let mut store = ParameterStore::new();
        SteeringParams::register_defaults(&mut store).unwrap();
        store.set("STEER_P", ParamValue::Float(2.5)).unwrap();
        store.set("STEER_I", ParamValue::Float(-1.0)).unwrap();
        store.set("STEER_LOCK_MAX", ParamValue::Int(30)).unwrap();
        store.set("STEER_OUT_MAX", ParamValue::Float(90.0)).unwrap();

        let params = SteeringParams::from_store(&store);
        assert_eq!(params.gains.kp, 2.5);
        assert_eq!(params.gains.ki, 0.0);
        assert_eq!(params.lock_max, 30.0);
        assert_eq!(params.output_max, MAX_ANGLE);
    }

    #[test]
    fn test_steering_params_empty_store() {
        let store = ParameterStore::new();
        assert_eq!(SteeringParams::from_store(&store), SteeringParams::default());
    }
}
