//! Helm (operator input) parameters
//!
//! - `HELM_STEP_S` - Small setpoint step (degrees)
//! - `HELM_STEP_L` - Large setpoint step (degrees)
//! - `HELM_LOCK_STEPS` - Ticks used to ramp into a rudder lock

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

const DEFAULT_STEP_SMALL: f32 = 1.0;
const DEFAULT_STEP_LARGE: f32 = 10.0;
const DEFAULT_LOCK_STEPS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelmParams {
    pub step_small: f32,
    pub step_large: f32,
    pub lock_ramp_steps: u16,
}

impl Default for HelmParams {
    fn default() -> Self {
        Self {
            step_small: DEFAULT_STEP_SMALL,
            step_large: DEFAULT_STEP_LARGE,
            lock_ramp_steps: DEFAULT_LOCK_STEPS as u16,
        }
    }
}

impl HelmParams {
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "HELM_STEP_S",
            ParamValue::Float(DEFAULT_STEP_SMALL),
            ParamFlags::empty(),
        )?;
        store.register(
            "HELM_STEP_L",
            ParamValue::Float(DEFAULT_STEP_LARGE),
            ParamFlags::empty(),
        )?;
        store.register(
            "HELM_LOCK_STEPS",
            ParamValue::Int(DEFAULT_LOCK_STEPS),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            step_small: store
                .get_f32_or("HELM_STEP_S", DEFAULT_STEP_SMALL)
                .clamp(0.1, 45.0),
            step_large: store
                .get_f32_or("HELM_STEP_L", DEFAULT_STEP_LARGE)
                .clamp(0.1, 90.0),
            lock_ramp_steps: store
                .get_f32_or("HELM_LOCK_STEPS", DEFAULT_LOCK_STEPS as f32)
                .clamp(1.0, 1000.0) as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helm_params() {
        let mut store = ParameterStore::new();
        HelmParams::register_defaults(&mut store).unwrap();
        assert_eq!(HelmParams::from_store(&store), HelmParams::default());

        store.set("HELM_STEP_L", ParamValue::Float(5.0)).unwrap();
        store.set("HELM_LOCK_STEPS", ParamValue::Int(-4)).unwrap();
        let params = HelmParams::from_store(&store);
        assert_eq!(params.step_large, 5.0);
        assert_eq!(params.lock_ramp_steps, 1);
    }
}
