//! Platform error types
//!
//! All adapter failures map onto [`PlatformError`]. Only initialization
//! failures are ever surfaced to the composition root; per-tick faults are
//! logged and absorbed by the adapters.

use core::fmt;

use crate::devices::traits::ImuError;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "embassy", derive(defmt::Format))]
pub enum PlatformError {
    /// PWM operation failed
    Pwm(PwmError),
    /// GPIO operation failed
    Gpio(GpioError),
    /// ADC conversion failed
    Adc(AdcError),
    /// Inertial sensor failed
    Imu(ImuError),
    /// Interrupt line could not be claimed
    Irq(IrqError),
    /// Platform initialization failed
    InitializationFailed,
    /// Invalid configuration provided
    InvalidConfig,
}

/// PWM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "embassy", derive(defmt::Format))]
pub enum PwmError {
    /// Invalid duty cycle value
    InvalidDutyCycle,
    /// Channel not available
    ChannelUnavailable,
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "embassy", derive(defmt::Format))]
pub enum GpioError {
    /// Invalid pin number
    InvalidPin,
    /// Invalid mode for operation
    InvalidMode,
}

/// ADC-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "embassy", derive(defmt::Format))]
pub enum AdcError {
    /// Conversion did not complete
    Timeout,
    /// Channel not routed to the converter
    InvalidChannel,
}

/// Interrupt registration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "embassy", derive(defmt::Format))]
pub enum IrqError {
    /// Line number beyond the registration table
    InvalidLine,
    /// Another handler already owns the line
    LineInUse,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Pwm(e) => write!(f, "PWM error: {:?}", e),
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::Adc(e) => write!(f, "ADC error: {:?}", e),
            PlatformError::Imu(e) => write!(f, "IMU error: {:?}", e),
            PlatformError::Irq(e) => write!(f, "IRQ error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "Platform initialization failed"),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

impl From<ImuError> for PlatformError {
    fn from(e: ImuError) -> Self {
        PlatformError::Imu(e)
    }
}

impl From<IrqError> for PlatformError {
    fn from(e: IrqError) -> Self {
        PlatformError::Irq(e)
    }
}
