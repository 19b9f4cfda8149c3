//! Rudder position sensor over an ADC channel
//!
//! A potentiometer or hall sensor on the rudder stock feeds one ADC input.
//! `read_raw` must always return a value, so a failed conversion repeats the
//! last good reading.

use core::sync::atomic::{AtomicU32, Ordering};

use tiller_core::traits::RudderSensor;

use crate::platform::traits::AdcInterface;

/// Counter for sampling conversion failure logs
static ADC_FAULT_LOG_COUNTER: AtomicU32 = AtomicU32::new(0);

/// [`RudderSensor`] over an [`AdcInterface`]
pub struct AdcRudderSensor<A: AdcInterface> {
    adc: A,
    last_good: u16,
    inverted: bool,
    failures: u32,
}

impl<A: AdcInterface> AdcRudderSensor<A> {
    /// Wrap `adc`; until the first good conversion the reading is mid-scale
    pub fn new(adc: A) -> Self {
        let last_good = adc.max_count() / 2;
        Self {
            adc,
            last_good,
            inverted: false,
            failures: 0,
        }
    }

    /// Mirror the reading, for a sensor mounted the other way round
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Conversions that failed since creation
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}

impl<A: AdcInterface> RudderSensor for AdcRudderSensor<A> {
    fn read_raw(&mut self) -> u16 {
        match self.adc.read() {
            Ok(raw) => {
                let raw = raw.min(self.adc.max_count());
                self.last_good = if self.inverted {
                    self.adc.max_count() - raw
                } else {
                    raw
                };
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                let count = ADC_FAULT_LOG_COUNTER.fetch_add(1, Ordering::Relaxed);
                if count % 100 == 0 {
                    crate::log_warn!("Rudder sensor read failed: {}", e);
                }
            }
        }
        self.last_good
    }
}
