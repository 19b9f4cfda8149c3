//! Logical button input

/// Closed set of helm buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Toggle between standby and engaged
    AutoStandby,
    /// Cycle heading / course / wind tracking
    ModeCycle,
    IncrementSmall,
    DecrementSmall,
    IncrementLarge,
    DecrementLarge,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::AutoStandby,
        Button::ModeCycle,
        Button::IncrementSmall,
        Button::DecrementSmall,
        Button::IncrementLarge,
        Button::DecrementLarge,
    ];

    /// Stable index in [`Button::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Button::AutoStandby => 0,
            Button::ModeCycle => 1,
            Button::IncrementSmall => 2,
            Button::DecrementSmall => 3,
            Button::IncrementLarge => 4,
            Button::DecrementLarge => 5,
        }
    }
}

/// "Is this logical button currently pressed"
pub trait ButtonInput {
    fn is_pressed(&self, button: Button) -> bool;
}

/// Button input backed by a bitmask, for host tests
#[derive(Debug, Clone, Copy, Default)]
pub struct MockButtons {
    pressed: u8,
}

impl MockButtons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.pressed |= 1 << button.index();
    }

    pub fn release(&mut self, button: Button) {
        self.pressed &= !(1 << button.index());
    }

    pub fn release_all(&mut self) {
        self.pressed = 0;
    }
}

impl ButtonInput for MockButtons {
    fn is_pressed(&self, button: Button) -> bool {
        self.pressed & (1 << button.index()) != 0
    }
}
