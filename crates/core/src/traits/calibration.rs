//! Calibration record persistence

use crate::ahrs::CalibrationOffsets;
use crate::parameters::ParameterError;

/// Load/save of the nine-field calibration record
///
/// A missing or malformed record loads as `None`; callers fall back to
/// all-zero offsets. Saving may be slow and is only called outside the
/// per-tick update path.
pub trait CalibrationStore {
    fn load(&self) -> Option<CalibrationOffsets>;

    fn save(&mut self, offsets: &CalibrationOffsets) -> Result<(), ParameterError>;
}

impl<C: CalibrationStore + ?Sized> CalibrationStore for &mut C {
    fn load(&self) -> Option<CalibrationOffsets> {
        (**self).load()
    }

    fn save(&mut self, offsets: &CalibrationOffsets) -> Result<(), ParameterError> {
        (**self).save(offsets)
    }
}

/// In-memory calibration store for host tests
#[derive(Debug, Default)]
pub struct MockCalibrationStore {
    pub stored: Option<CalibrationOffsets>,
    pub saves: u32,
    pub fail_save: bool,
}

impl MockCalibrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(offsets: CalibrationOffsets) -> Self {
        Self {
            stored: Some(offsets),
            ..Self::default()
        }
    }
}

impl CalibrationStore for MockCalibrationStore {
    fn load(&self) -> Option<CalibrationOffsets> {
        self.stored
    }

    fn save(&mut self, offsets: &CalibrationOffsets) -> Result<(), ParameterError> {
        if self.fail_save {
            return Err(ParameterError::WriteFailed);
        }
        self.stored = Some(*offsets);
        self.saves += 1;
        Ok(())
    }
}
