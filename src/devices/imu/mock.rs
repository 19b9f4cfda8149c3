//! Mock raw IMU for testing

use heapless::Deque;
use tiller_core::ahrs::InertialSample;

use crate::devices::traits::{ImuError, RawImu};

/// Scripted IMU driver
///
/// Returns queued samples first, then the repeat sample if one is set.
#[derive(Debug, Default)]
pub struct MockRawImu {
    script: Deque<InertialSample, 32>,
    repeat: Option<InertialSample>,
    /// Error returned by `init`, if any
    pub fail_init: Option<ImuError>,
    /// Make every read fail with `BusError`
    pub fail_reads: bool,
    pub reads: u32,
}

impl MockRawImu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver returning `sample` on every read
    pub fn constant(sample: InertialSample) -> Self {
        Self {
            repeat: Some(sample),
            ..Self::default()
        }
    }

    /// Queue one sample ahead of the repeat sample; `false` if the script is full
    pub fn push(&mut self, sample: InertialSample) -> bool {
        self.script.push_back(sample).is_ok()
    }
}

impl RawImu for MockRawImu {
    fn init(&mut self) -> Result<(), ImuError> {
        match self.fail_init {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn read_sample(&mut self) -> Result<InertialSample, ImuError> {
        self.reads += 1;
        if self.fail_reads {
            return Err(ImuError::BusError);
        }
        self.script
            .pop_front()
            .or(self.repeat)
            .ok_or(ImuError::NotInitialized)
    }
}
