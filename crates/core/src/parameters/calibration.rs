//! Calibration record in the parameter store
//!
//! The nine offsets are kept as `INS_*_OFS_*` float parameters. They are not
//! registered up front: a store without them has no calibration record.

use super::error::ParameterError;
use super::storage::{ParamValue, ParameterStore};
use crate::ahrs::{CalibrationOffsets, CALIBRATION_PARAMS};
use crate::traits::CalibrationStore;

impl CalibrationStore for ParameterStore {
    /// Missing, non-float or non-finite entries mean no record
    fn load(&self) -> Option<CalibrationOffsets> {
        let mut values = [0.0f32; 9];
        for (value, name) in values.iter_mut().zip(CALIBRATION_PARAMS) {
            *value = match self.get(name)? {
                ParamValue::Float(v) => *v,
                _ => return None,
            };
        }
        CalibrationOffsets::from_array(values)
    }

    fn save(&mut self, offsets: &CalibrationOffsets) -> Result<(), ParameterError> {
        for (value, name) in offsets.to_array().into_iter().zip(CALIBRATION_PARAMS) {
            self.upsert(name, ParamValue::Float(value))?;
        }
        Ok(())
    }
}
