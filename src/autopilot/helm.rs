//! Helm: operator-facing autopilot state and button handling
//!
//! The helm holds what the operator sees and changes: standby/engaged, the
//! selected tracking kind and its setpoint. It scans buttons on its own
//! cadence and returns the steering mode to apply when something changed;
//! the composition root forwards that to the steering controller.
//!
//! ## Buttons (rising edge only)
//!
//! - Auto/Standby: engage the selected tracking kind with the setpoint
//!   seeded from the current environment value, or drop to `Off`
//! - Mode: rotate heading -> course -> wind angle, re-seeding the setpoint
//! - +/- small, +/- large: adjust the setpoint by the configured step
//!
//! Setpoints stay in [0, 360) for heading and course and in (-180, 180] for
//! wind angle.

use tiller_core::control::{wrap_180, wrap_360};
use tiller_core::parameters::HelmParams;
use tiller_core::steering::{EnvironmentData, SteeringMode, SteeringModeKind};
use tiller_core::traits::{Button, ButtonInput};

/// Autopilot engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelmState {
    /// Steering is off, the rudder is the helmsman's
    Standby,
    /// The selected tracking kind is steering
    Engaged,
}

/// Operator-visible helm state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelmModel {
    pub state: HelmState,
    /// Tracking kind used on engage (never `Off`)
    pub kind: SteeringModeKind,
    /// Setpoint in degrees
    pub setpoint: f32,
}

impl Default for HelmModel {
    fn default() -> Self {
        Self {
            state: HelmState::Standby,
            kind: SteeringModeKind::TrackHeading,
            setpoint: 0.0,
        }
    }
}

impl HelmModel {
    /// Steering mode this model asks for
    pub fn steering_mode(&self) -> SteeringMode {
        match self.state {
            HelmState::Standby => SteeringMode::Off,
            HelmState::Engaged => SteeringMode::from_kind(self.kind, self.setpoint),
        }
    }
}

/// Next tracking kind in the mode-cycle order
fn next_kind(kind: SteeringModeKind) -> SteeringModeKind {
    match kind {
        SteeringModeKind::TrackHeading => SteeringModeKind::TrackCourse,
        SteeringModeKind::TrackCourse => SteeringModeKind::TrackWindAngle,
        _ => SteeringModeKind::TrackHeading,
    }
}

/// Keep a setpoint in the range its kind uses
fn normalize(kind: SteeringModeKind, setpoint: f32) -> f32 {
    match kind {
        SteeringModeKind::TrackWindAngle => wrap_180(setpoint),
        _ => wrap_360(setpoint),
    }
}

/// Environment value a tracking kind steers against
fn observed(kind: SteeringModeKind, env: &EnvironmentData) -> f32 {
    match kind {
        SteeringModeKind::TrackCourse => env.course,
        SteeringModeKind::TrackWindAngle => env.wind_direction,
        _ => env.heading,
    }
}

/// Helm controller with button edge detection
#[derive(Debug, Clone)]
pub struct Helm {
    model: HelmModel,
    params: HelmParams,
    last_pressed: [bool; 6],
}

impl Helm {
    pub fn new(params: HelmParams) -> Self {
        Self {
            model: HelmModel::default(),
            params,
            last_pressed: [false; 6],
        }
    }

    pub fn model(&self) -> &HelmModel {
        &self.model
    }

    pub fn is_engaged(&self) -> bool {
        self.model.state == HelmState::Engaged
    }

    pub fn params(&self) -> &HelmParams {
        &self.params
    }

    pub fn set_params(&mut self, params: HelmParams) {
        self.params = params;
    }

    /// Scan `input` and apply rising edges
    ///
    /// Returns the steering mode to apply if the requested mode changed.
    pub fn update<B: ButtonInput + ?Sized>(
        &mut self,
        input: &B,
        env: &EnvironmentData,
    ) -> Option<SteeringMode> {
        let mut pressed = [false; 6];
        for button in Button::ALL {
            pressed[button.index()] = input.is_pressed(button);
        }

        let before = self.model.steering_mode();
        for button in Button::ALL {
            let i = button.index();
            if pressed[i] && !self.last_pressed[i] {
                self.on_press(button, env);
            }
        }
        self.last_pressed = pressed;

        let after = self.model.steering_mode();
        (after != before).then_some(after)
    }

    fn on_press(&mut self, button: Button, env: &EnvironmentData) {
        match button {
            Button::AutoStandby => {
                if self.is_engaged() {
                    self.standby();
                } else {
                    self.engage(env);
                }
            }
            Button::ModeCycle => {
                self.cycle_kind(env);
            }
            Button::IncrementSmall => {
                self.adjust(self.params.step_small);
            }
            Button::DecrementSmall => {
                self.adjust(-self.params.step_small);
            }
            Button::IncrementLarge => {
                self.adjust(self.params.step_large);
            }
            Button::DecrementLarge => {
                self.adjust(-self.params.step_large);
            }
        }
    }

    /// Engage the selected kind, holding the current heading/course/wind
    pub fn engage(&mut self, env: &EnvironmentData) -> SteeringMode {
        self.model.setpoint = normalize(self.model.kind, observed(self.model.kind, env));
        self.model.state = HelmState::Engaged;
        crate::log_info!(
            "Helm engaged: {} at {}",
            self.model.kind.name(),
            self.model.setpoint
        );
        self.model.steering_mode()
    }

    /// Drop to standby
    pub fn standby(&mut self) -> SteeringMode {
        if self.is_engaged() {
            crate::log_info!("Helm standby");
        }
        self.model.state = HelmState::Standby;
        SteeringMode::Off
    }

    /// Rotate to the next tracking kind and seed its setpoint
    pub fn cycle_kind(&mut self, env: &EnvironmentData) -> SteeringMode {
        let kind = next_kind(self.model.kind);
        self.model.kind = kind;
        self.model.setpoint = normalize(kind, observed(kind, env));
        crate::log_info!("Helm mode: {}", kind.name());
        self.model.steering_mode()
    }

    /// Move the setpoint by `delta` degrees
    pub fn adjust(&mut self, delta: f32) -> SteeringMode {
        if delta.is_finite() {
            self.model.setpoint = normalize(self.model.kind, self.model.setpoint + delta);
            crate::log_debug!("Helm setpoint: {}", self.model.setpoint);
        }
        self.model.steering_mode()
    }
}

impl Default for Helm {
    fn default() -> Self {
        Self::new(HelmParams::default())
    }
}
