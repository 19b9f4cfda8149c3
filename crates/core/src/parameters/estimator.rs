//! Orientation estimator parameters
//!
//! - `INS_CAL_SAMPLES` - Samples gathered per calibration run

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

const DEFAULT_CAL_SAMPLES: i32 = 100;
const MAX_CAL_SAMPLES: f32 = 10_000.0;

/// Estimator tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorParams {
    pub calibration_samples: u16,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            calibration_samples: DEFAULT_CAL_SAMPLES as u16,
        }
    }
}

impl EstimatorParams {
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "INS_CAL_SAMPLES",
            ParamValue::Int(DEFAULT_CAL_SAMPLES),
            ParamFlags::empty(),
        )
    }

    pub fn from_store(store: &ParameterStore) -> Self {
        let samples = store
            .get_f32_or("INS_CAL_SAMPLES", DEFAULT_CAL_SAMPLES as f32)
            .clamp(1.0, MAX_CAL_SAMPLES);
        Self {
            calibration_samples: samples as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimator_params() {
        let mut store = ParameterStore::new();
        EstimatorParams::register_defaults(&mut store).unwrap();
        assert_eq!(EstimatorParams::from_store(&store).calibration_samples, 100);

        store.set("INS_CAL_SAMPLES", ParamValue::Int(0)).unwrap();
        assert_eq!(EstimatorParams::from_store(&store).calibration_samples, 1);
    }
}
