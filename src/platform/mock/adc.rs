//! Mock ADC implementation for testing

use crate::platform::{
    error::{AdcError, PlatformError},
    traits::AdcInterface,
    Result,
};

/// Mock ADC channel returning a settable count
#[derive(Debug)]
pub struct MockAdc {
    value: u16,
    resolution_bits: u8,
    conversions: u32,
    pub fail: bool,
}

impl MockAdc {
    pub fn new(resolution_bits: u8) -> Self {
        Self {
            value: 0,
            resolution_bits,
            conversions: 0,
            fail: false,
        }
    }

    /// Set the next conversion result (clamped to the resolution)
    pub fn set_value(&mut self, value: u16) {
        self.value = value.min(self.max_count());
    }

    pub fn conversions(&self) -> u32 {
        self.conversions
    }
}

impl AdcInterface for MockAdc {
    fn read(&mut self) -> Result<u16> {
        self.conversions += 1;
        if self.fail {
            return Err(PlatformError::Adc(AdcError::Timeout));
        }
        Ok(self.value)
    }

    fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }
}
