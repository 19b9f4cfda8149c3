//! Data-ready interrupt handler feeding the sample queue

use tiller_core::ahrs::InertialSample;
use tiller_core::queue::Producer;

use super::irq::{self, DataReadyHandler};
use crate::devices::traits::RawImu;
use crate::platform::Result;

/// Owns the sensor driver and the producer half of the sample queue
///
/// Each interrupt reads one sample and pushes it. When the queue is full
/// the sample is rejected and counted by the queue; a failed read is
/// counted here. Neither is reported from interrupt context.
pub struct ImuDataReady<'a, I: RawImu> {
    imu: I,
    producer: Producer<'a, InertialSample>,
    initialized: bool,
    read_errors: u32,
}

impl<'a, I: RawImu> ImuDataReady<'a, I> {
    pub fn new(imu: I, producer: Producer<'a, InertialSample>) -> Self {
        Self {
            imu,
            producer,
            initialized: false,
            read_errors: 0,
        }
    }

    /// Bring up the sensor
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Imu` if the driver fails to initialize. The
    /// caller must treat this as fatal.
    pub fn begin(&mut self) -> Result<()> {
        if let Err(e) = self.imu.init() {
            crate::log_error!("IMU init failed: {}", e);
            return Err(e.into());
        }
        self.initialized = true;
        crate::log_info!(
            "IMU initialized, queue capacity {}",
            self.producer.capacity()
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Read one sample and enqueue it; returns `true` if it was queued
    pub fn service(&mut self) -> bool {
        if !self.initialized {
            return false;
        }
        match self.imu.read_sample() {
            Ok(sample) => self.producer.push(sample).is_ok(),
            Err(_) => {
                self.read_errors = self.read_errors.saturating_add(1);
                false
            }
        }
    }

    /// Reads that failed since creation
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    /// Samples rejected by a full queue
    pub fn dropped(&self) -> u32 {
        self.producer.dropped()
    }

    pub fn imu_mut(&mut self) -> &mut I {
        &mut self.imu
    }
}

impl<I: RawImu + Send> DataReadyHandler for ImuDataReady<'_, I> {
    fn on_data_ready(&mut self) {
        self.service();
    }
}

/// Bring up the sensor and route interrupt `line` to it
///
/// # Errors
///
/// Sensor initialization or line registration failure. Both are fatal.
pub fn attach<I: RawImu + Send + 'static>(
    line: u8,
    handler: &'static mut ImuDataReady<'static, I>,
) -> Result<()> {
    handler.begin()?;
    irq::register(line, handler)?;
    crate::log_info!("IMU data-ready on line {}", line);
    Ok(())
}
