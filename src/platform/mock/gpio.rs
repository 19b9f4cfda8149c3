//! Mock GPIO implementation for testing

use crate::platform::{
    traits::{GpioInterface, GpioMode},
    Result,
};

/// Mock GPIO input
///
/// The level is set by the test to simulate an external signal.
#[derive(Debug)]
pub struct MockGpio {
    state: bool,
    mode: GpioMode,
}

impl MockGpio {
    /// Floating input reading low
    pub fn new_input() -> Self {
        Self {
            state: false,
            mode: GpioMode::Input,
        }
    }

    /// Pulled-up input reading high (an idle active-low button)
    pub fn pulled_up() -> Self {
        Self {
            state: true,
            mode: GpioMode::InputPullUp,
        }
    }

    /// Set the input state (for simulating input pin reads)
    pub fn set_input_state(&mut self, high: bool) {
        self.state = high;
    }
}

impl GpioInterface for MockGpio {
    fn read(&self) -> bool {
        self.state
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_gpio_input() {
        let mut gpio = MockGpio::new_input();
        assert!(!gpio.read());

        gpio.set_input_state(true);
        assert!(gpio.read());
    }

    #[test]
    fn test_mock_gpio_pulled_up() {
        let mut gpio = MockGpio::pulled_up();
        assert!(gpio.read());
        assert_eq!(gpio.mode(), GpioMode::InputPullUp);

        gpio.set_mode(GpioMode::Input).unwrap();
        assert_eq!(gpio.mode(), GpioMode::Input);
    }
}
