//! ADC input interface trait

use crate::platform::Result;

/// Single ADC channel
pub trait AdcInterface {
    /// Run one conversion and return the raw count
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Adc` if the conversion fails.
    fn read(&mut self) -> Result<u16>;

    /// Converter resolution (e.g. 12 for counts 0..=4095)
    fn resolution_bits(&self) -> u8;

    /// Largest count the converter can return
    fn max_count(&self) -> u16 {
        let bits = self.resolution_bits().min(16) as u32;
        ((1u32 << bits) - 1) as u16
    }
}
