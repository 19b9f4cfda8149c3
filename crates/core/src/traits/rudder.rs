//! Rudder position sensor and actuator sink

/// Raw rudder position reading (e.g. a potentiometer on an ADC)
pub trait RudderSensor {
    /// Latest raw reading. Out-of-range values are the caller's to clamp.
    fn read_raw(&mut self) -> u16;
}

/// Bidirectional rudder actuator
pub trait RudderActuator {
    /// Drive with a signed intensity in [-1.0, 1.0]
    ///
    /// Positive moves the rudder toward positive angles. 0.0 stops.
    fn drive(&mut self, intensity: f32);
}

/// Rudder sensor returning a settable raw value
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRudderSensor {
    pub raw: u16,
    pub reads: u32,
}

impl MockRudderSensor {
    pub fn new(raw: u16) -> Self {
        Self { raw, reads: 0 }
    }
}

impl RudderSensor for MockRudderSensor {
    fn read_raw(&mut self) -> u16 {
        self.reads += 1;
        self.raw
    }
}

/// Actuator that records the commands it receives
#[derive(Debug, Clone, Copy, Default)]
pub struct MockActuator {
    pub last: Option<f32>,
    pub commands: u32,
}

impl MockActuator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RudderActuator for MockActuator {
    fn drive(&mut self, intensity: f32) {
        self.last = Some(intensity);
        self.commands += 1;
    }
}
