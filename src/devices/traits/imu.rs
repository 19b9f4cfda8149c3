//! Raw IMU sensor trait
//!
//! Minimal interface the data-ready interrupt handler needs from an inertial
//! sensor driver: bring the chip up once, then read one sample per
//! interrupt.
//!
//! ## Usage
//!
//! ```ignore
//! use tiller::devices::traits::RawImu;
//!
//! fn bring_up<I: RawImu>(imu: &mut I) -> Result<(), ImuError> {
//!     imu.init()?;
//!     let sample = imu.read_sample()?;
//!     // sample.accel, sample.gyro, sample.mag
//!     Ok(())
//! }
//! ```

use core::fmt;

use tiller_core::ahrs::InertialSample;

/// IMU error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "embassy", derive(defmt::Format))]
pub enum ImuError {
    /// I2C/SPI communication failed
    BusError,

    /// Wrong chip ID or unsupported device
    UnknownDevice,

    /// Driver not initialized
    NotInitialized,

    /// Sensor self-test failed
    SelfTestFailed,
}

impl fmt::Display for ImuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImuError::BusError => write!(f, "IMU bus transfer failed"),
            ImuError::UnknownDevice => write!(f, "IMU device not recognized"),
            ImuError::NotInitialized => write!(f, "IMU not initialized"),
            ImuError::SelfTestFailed => write!(f, "IMU self-test failed"),
        }
    }
}

/// Raw IMU sensor interface
///
/// Both calls are blocking and short: `read_sample` runs in interrupt
/// context.
///
/// # Units
///
/// - accel: m/s², includes gravity
/// - gyro: rad/s
/// - mag: µT
pub trait RawImu {
    /// Configure the chip and enable its data-ready interrupt
    ///
    /// # Errors
    ///
    /// Any error here is fatal to startup.
    fn init(&mut self) -> Result<(), ImuError>;

    /// Read the sample that triggered the data-ready interrupt
    fn read_sample(&mut self) -> Result<InertialSample, ImuError>;
}
