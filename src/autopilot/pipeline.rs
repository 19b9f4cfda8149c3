//! Composition root: one control pipeline per device
//!
//! [`Autopilot`] owns every stage of the pipeline and runs them from a
//! single cooperative [`tick`](Autopilot::tick):
//!
//! ```text
//! sample queue -> estimator (100 Hz) -> heading ┐
//! buttons      -> helm (20 Hz) ───────── mode ──┼-> steering (10 Hz) -> servo (20 Hz) -> rudder
//! course/wind (caller) ─────────────────────────┘
//! ```
//!
//! Stages run in data-flow order within a tick. Nothing here is touched
//! from interrupt context; the only cross-context resource is the sample
//! queue behind the estimator's [`SampleSource`].

use tiller_core::ahrs::{CalibrationProgress, OrientationEstimator};
use tiller_core::parameters::{
    EstimatorParams, HelmParams, ParameterStore, RudderServoParams, SteeringParams,
};
use tiller_core::scheduler::{
    Cadence, HELM_TASK, ORIENTATION_TASK, SERVO_TASK, STEERING_TASK,
};
use tiller_core::servo::RudderServo;
use tiller_core::steering::{EnvironmentData, SteeringController, SteeringMode};
use tiller_core::traits::{
    ButtonInput, CalibrationStore, RudderActuator, RudderSensor, SampleSource, TimeSource,
};

use super::helm::Helm;
use super::lock_ramp::SoftRudderLock;
use crate::platform::{PlatformError, Result};

/// Course and wind supplied by external sensors each tick
///
/// `None` means no new reading; the previous value is held.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NavigationInputs {
    /// Course over ground (degrees)
    pub course: Option<f32>,
    /// Apparent wind direction (degrees)
    pub wind_direction: Option<f32>,
}

impl NavigationInputs {
    pub fn new(course: f32, wind_direction: f32) -> Self {
        Self {
            course: Some(course),
            wind_direction: Some(wind_direction),
        }
    }
}

/// Which stages ran during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub orientation: bool,
    pub helm: bool,
    pub steering: bool,
    pub servo: bool,
}

/// Tuning for every stage of the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutopilotConfig {
    pub steering: SteeringParams,
    pub servo: RudderServoParams,
    pub estimator: EstimatorParams,
    pub helm: HelmParams,
}

impl AutopilotConfig {
    /// Load every block from the parameter store (clamped, with defaults)
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            steering: SteeringParams::from_store(store),
            servo: RudderServoParams::from_store(store),
            estimator: EstimatorParams::from_store(store),
            helm: HelmParams::from_store(store),
        }
    }

    /// Reject configurations the control loops cannot run with
    ///
    /// Blocks loaded through `from_store` always pass; hand-built ones may not.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let valid = positive(self.steering.output_max)
            && positive(self.steering.lock_max)
            && positive(self.servo.drive_max)
            && positive(self.servo.angle_max)
            && self.servo.deadband.is_finite()
            && self.servo.deadband >= 0.0
            && self.servo.raw_max > self.servo.raw_min
            && self.estimator.calibration_samples > 0;
        if valid {
            Ok(())
        } else {
            Err(PlatformError::InvalidConfig)
        }
    }
}

fn record_execution(cadence: &mut Cadence, elapsed_us: u64) {
    let elapsed_us = elapsed_us.min(u32::MAX as u64) as u32;
    if !cadence.record_execution(elapsed_us) {
        crate::log_warn!(
            "Task {} overran: {} us (budget {} us)",
            cadence.metadata().name,
            elapsed_us,
            cadence.metadata().budget_us
        );
    }
}

/// The control pipeline
pub struct Autopilot<S, RS, A, B, C, T>
where
    S: SampleSource,
    RS: RudderSensor,
    A: RudderActuator,
    B: ButtonInput,
    C: CalibrationStore,
    T: TimeSource,
{
    estimator: OrientationEstimator<S, T>,
    steering: SteeringController,
    servo: RudderServo<RS, A, T>,
    helm: Helm,
    lock: SoftRudderLock,
    buttons: B,
    store: C,
    time: T,
    config: AutopilotConfig,
    env: EnvironmentData,
    orientation_task: Cadence,
    helm_task: Cadence,
    steering_task: Cadence,
    servo_task: Cadence,
    started: bool,
}

impl<S, RS, A, B, C, T> Autopilot<S, RS, A, B, C, T>
where
    S: SampleSource,
    RS: RudderSensor,
    A: RudderActuator,
    B: ButtonInput,
    C: CalibrationStore,
    T: TimeSource,
{
    pub fn new(
        source: S,
        sensor: RS,
        actuator: A,
        buttons: B,
        store: C,
        time: T,
        config: AutopilotConfig,
    ) -> Self {
        Self {
            estimator: OrientationEstimator::new(source, time.clone(), &config.estimator),
            steering: SteeringController::new(config.steering),
            servo: RudderServo::new(sensor, actuator, time.clone(), config.servo),
            helm: Helm::new(config.helm),
            lock: SoftRudderLock::new(),
            buttons,
            store,
            time,
            config,
            env: EnvironmentData::default(),
            orientation_task: Cadence::new(ORIENTATION_TASK),
            helm_task: Cadence::new(HELM_TASK),
            steering_task: Cadence::new(STEERING_TASK),
            servo_task: Cadence::new(SERVO_TASK),
            started: false,
        }
    }

    /// Bring the pipeline up
    ///
    /// Validates the configuration, restores IMU calibration (missing or
    /// malformed records fall back to zero offsets) and starts the servo with
    /// the drive stopped.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` for an unusable configuration.
    /// The caller must not run the pipeline after an error.
    pub fn start(&mut self) -> Result<()> {
        if let Err(e) = self.config.validate() {
            crate::log_error!("Autopilot config rejected");
            return Err(e);
        }

        if self.estimator.load_calibration(&self.store) {
            crate::log_info!("IMU calibration restored");
        } else {
            crate::log_warn!("No IMU calibration stored, using zero offsets");
        }

        let angle = self.servo.start();
        self.steering.set_mode(SteeringMode::Off);
        self.started = true;
        crate::log_info!("Autopilot started, rudder at {}", angle);
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Run every stage that is due
    ///
    /// Does nothing before a successful [`start`](Self::start).
    pub fn tick(&mut self, nav: &NavigationInputs) -> TickReport {
        let mut report = TickReport::default();
        if !self.started {
            return report;
        }

        if let Some(course) = nav.course.filter(|v| v.is_finite()) {
            self.env.course = course;
        }
        if let Some(wind) = nav.wind_direction.filter(|v| v.is_finite()) {
            self.env.wind_direction = wind;
        }

        let now = self.time.now_us();

        if self.orientation_task.poll(now).is_some() {
            self.run_orientation();
            record_execution(&mut self.orientation_task, self.time.elapsed_since(now));
            report.orientation = true;
        }

        if self.helm_task.poll(now).is_some() {
            self.run_helm();
            record_execution(&mut self.helm_task, self.time.elapsed_since(now));
            report.helm = true;
        }

        if let Some(dt) = self.steering_task.poll(now) {
            self.run_steering(dt);
            record_execution(&mut self.steering_task, self.time.elapsed_since(now));
            report.steering = true;
        }

        if self.servo_task.poll(now).is_some() {
            self.run_servo();
            record_execution(&mut self.servo_task, self.time.elapsed_since(now));
            report.servo = true;
        }

        report
    }

    fn run_orientation(&mut self) {
        if self.estimator.is_calibrating() {
            match self.estimator.do_calibration_step(&mut self.store) {
                Ok(CalibrationProgress::Complete) => {
                    crate::log_info!("IMU calibration complete and saved");
                    self.steering.set_mode(SteeringMode::Off);
                }
                Ok(_) => {}
                Err(e) => {
                    crate::log_error!("IMU calibration save failed: {}", e.as_str());
                    self.steering.set_mode(SteeringMode::Off);
                }
            }
        } else {
            self.estimator.update();
        }
        self.env.heading = self.estimator.orientation().heading_deg();
    }

    fn run_helm(&mut self) {
        let Some(mode) = self.helm.update(&self.buttons, &self.env) else {
            return;
        };
        if self.estimator.is_calibrating() {
            crate::log_warn!("IMU calibration cancelled by helm");
            self.estimator.cancel_calibration();
        }
        self.lock.cancel();
        self.apply_mode(mode);
    }

    fn run_steering(&mut self, dt: f32) {
        if let Some(angle) = self.lock.next_angle() {
            self.steering.set_mode(SteeringMode::RudderLock(angle));
        }
        self.steering.update(self.env, dt);
    }

    fn run_servo(&mut self) {
        if self.steering.mode() == SteeringMode::Off {
            // Standby: the rudder belongs to the helmsman, track it by hand
            self.servo.stop();
            self.servo.measure();
            return;
        }
        self.servo
            .set_target_angle(self.steering.desired_rudder_angle());
        self.servo.update();
    }

    fn apply_mode(&mut self, mode: SteeringMode) {
        crate::log_info!("Steering mode: {}", mode.name());
        self.steering.set_mode(mode);
    }

    /// Switch steering mode directly, bypassing the helm buttons
    pub fn set_mode(&mut self, mode: SteeringMode) {
        self.lock.cancel();
        if !mode.is_tracking() {
            self.helm.standby();
        }
        self.apply_mode(mode);
    }

    /// Ramp into a rudder lock at `target` degrees
    ///
    /// The helm drops to standby and a running IMU calibration is
    /// cancelled; the lock angle walks from a fresh rudder reading to
    /// `target` over `HELM_LOCK_STEPS` steering ticks.
    pub fn engage_rudder_lock(&mut self, target: f32) {
        if self.estimator.is_calibrating() {
            crate::log_warn!("IMU calibration cancelled by rudder lock");
            self.estimator.cancel_calibration();
        }
        self.helm.standby();
        let steps = self.helm.params().lock_ramp_steps;
        let measured = self.servo.measure();
        self.lock.engage(measured, target, steps);
    }

    /// Leave the rudder lock and return to `Off`
    pub fn release_rudder_lock(&mut self) {
        if self.lock.is_active() {
            self.lock.cancel();
            self.apply_mode(SteeringMode::Off);
        }
    }

    /// Begin IMU calibration; the vessel must be held still
    ///
    /// Steering switches to the IMU calibration placeholder until the
    /// calibration completes or is cancelled.
    pub fn start_calibration(&mut self) {
        self.lock.cancel();
        self.helm.standby();
        self.estimator.start_calibration();
        self.apply_mode(SteeringMode::CalibrateImu);
        crate::log_info!("IMU calibration started");
    }

    /// Abort IMU calibration, keeping the previous offsets
    pub fn cancel_calibration(&mut self) {
        if self.estimator.is_calibrating() {
            self.estimator.cancel_calibration();
            self.apply_mode(SteeringMode::Off);
            crate::log_info!("IMU calibration cancelled");
        }
    }

    /// Reload tuning from the parameter store; effective next tick
    ///
    /// The calibration sample count is only read at construction.
    pub fn apply_params(&mut self, store: &ParameterStore) {
        let config = AutopilotConfig::from_store(store);
        self.steering.set_params(config.steering);
        self.servo.set_params(config.servo);
        self.helm.set_params(config.helm);
        self.config = AutopilotConfig {
            estimator: self.config.estimator,
            ..config
        };
    }

    /// Stop the rudder drive and drop every mode
    pub fn shutdown(&mut self) {
        self.lock.cancel();
        self.helm.standby();
        self.steering.set_mode(SteeringMode::Off);
        self.servo.stop();
        self.started = false;
        crate::log_info!("Autopilot stopped");
    }

    pub fn estimator(&self) -> &OrientationEstimator<S, T> {
        &self.estimator
    }

    pub fn estimator_mut(&mut self) -> &mut OrientationEstimator<S, T> {
        &mut self.estimator
    }

    pub fn steering(&self) -> &SteeringController {
        &self.steering
    }

    pub fn servo(&self) -> &RudderServo<RS, A, T> {
        &self.servo
    }

    pub fn servo_mut(&mut self) -> &mut RudderServo<RS, A, T> {
        &mut self.servo
    }

    pub fn helm(&self) -> &Helm {
        &self.helm
    }

    pub fn lock(&self) -> &SoftRudderLock {
        &self.lock
    }

    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn config(&self) -> &AutopilotConfig {
        &self.config
    }

    /// Environment snapshot the steering stage last saw
    pub fn environment(&self) -> EnvironmentData {
        self.env
    }

    /// Cadences in run order: orientation, helm, steering, servo
    pub fn cadences(&self) -> [&Cadence; 4] {
        [
            &self.orientation_task,
            &self.helm_task,
            &self.steering_task,
            &self.servo_task,
        ]
    }
}
