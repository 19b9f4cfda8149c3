//! Orientation estimator and calibrator
//!
//! Dead-reckons pitch, roll and yaw from the gyroscope. Each
//! [`update`](OrientationEstimator::update) consumes at most one sample,
//! subtracts the calibration offsets and integrates the angular rate over the
//! measured time since the previously consumed sample:
//!
//! ```text
//! roll  += gyro.x (deg/s) * dt
//! pitch += gyro.y (deg/s) * dt
//! yaw   += gyro.z (deg/s) * dt
//! ```
//!
//! No accelerometer or magnetometer correction is applied, so the estimate
//! drifts with any residual gyro bias. Keeping the bias small is the job of
//! the calibration procedure.
//!
//! # State machine
//!
//! ```text
//! Idle --start_calibration--> Calibrating --(enough samples)--> Idle
//!                             Calibrating --cancel_calibration--> Idle
//! ```
//!
//! While calibrating, `update` leaves the sample stream to
//! `do_calibration_step` and holds the orientation.

use super::calibration::{CalibrationAccumulator, CalibrationOffsets, CalibrationProgress};
use super::types::{InertialSample, Orientation};
use crate::control::floor_dt;
use crate::parameters::{EstimatorParams, ParameterError};
use crate::traits::{CalibrationStore, SampleSource, TimeSource};

/// Estimator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorState {
    Idle,
    Calibrating,
}

/// Gyro-integrating orientation estimator
pub struct OrientationEstimator<S: SampleSource, T: TimeSource> {
    source: S,
    time: T,
    offsets: CalibrationOffsets,
    orientation: Orientation,
    last_update_ms: Option<u64>,
    state: EstimatorState,
    accumulator: CalibrationAccumulator,
    required_samples: u16,
}

impl<S: SampleSource, T: TimeSource> OrientationEstimator<S, T> {
    /// Create an idle estimator with zero offsets and zero orientation
    pub fn new(source: S, time: T, params: &EstimatorParams) -> Self {
        Self {
            source,
            time,
            offsets: CalibrationOffsets::default(),
            orientation: Orientation::default(),
            last_update_ms: None,
            state: EstimatorState::Idle,
            accumulator: CalibrationAccumulator::new(),
            required_samples: params.calibration_samples.max(1),
        }
    }

    /// Restore offsets from `store`
    ///
    /// Returns `true` when a record was found. A missing or malformed record
    /// resets the offsets to zero.
    pub fn load_calibration<C: CalibrationStore + ?Sized>(&mut self, store: &C) -> bool {
        match store.load() {
            Some(offsets) => {
                self.offsets = offsets;
                true
            }
            None => {
                self.offsets = CalibrationOffsets::default();
                false
            }
        }
    }

    /// Consume at most one sample and integrate it
    ///
    /// Returns `true` if a sample was consumed. With no new sample the
    /// orientation is left as is.
    pub fn update(&mut self) -> bool {
        if self.state == EstimatorState::Calibrating {
            return false;
        }
        let Some(raw) = self.source.try_fetch() else {
            return false;
        };

        let now_ms = self.time.now_ms();
        let dt = match self.last_update_ms {
            Some(last) => now_ms.saturating_sub(last) as f32 / 1000.0,
            None => 0.0,
        };
        self.last_update_ms = Some(now_ms);

        self.integrate(&raw, floor_dt(dt));
        true
    }

    fn integrate(&mut self, raw: &InertialSample, dt: f32) {
        if !raw.is_finite() {
            return;
        }
        let sample = self.offsets.apply(raw);
        let rate_deg = sample.gyro.map(|r| r.to_degrees());

        self.orientation.roll += rate_deg.x * dt;
        self.orientation.pitch += rate_deg.y * dt;
        self.orientation.yaw += rate_deg.z * dt;
    }

    /// Current orientation snapshot
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Overwrite the accumulators, e.g. to align yaw with a known heading
    pub fn reset_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn offsets(&self) -> &CalibrationOffsets {
        &self.offsets
    }

    pub fn set_offsets(&mut self, offsets: CalibrationOffsets) {
        self.offsets = offsets;
    }

    pub fn state(&self) -> EstimatorState {
        self.state
    }

    pub fn is_calibrating(&self) -> bool {
        self.state == EstimatorState::Calibrating
    }

    /// Enter `Calibrating`, discarding any partially gathered statistics
    pub fn start_calibration(&mut self) {
        self.accumulator = CalibrationAccumulator::new();
        self.state = EstimatorState::Calibrating;
    }

    /// Abort a running calibration; offsets stay as they were
    pub fn cancel_calibration(&mut self) {
        self.accumulator = CalibrationAccumulator::new();
        self.state = EstimatorState::Idle;
    }

    /// Gather one calibration sample
    ///
    /// Once enough samples are in, the derived offsets are applied, handed to
    /// `store`, and the estimator returns to `Idle`. A failed save still
    /// leaves the new offsets active in memory and is reported as `Err`.
    pub fn do_calibration_step<C: CalibrationStore + ?Sized>(
        &mut self,
        store: &mut C,
    ) -> Result<CalibrationProgress, ParameterError> {
        if self.state != EstimatorState::Calibrating {
            return Ok(CalibrationProgress::Idle);
        }

        if let Some(sample) = self.source.try_fetch() {
            self.accumulator.add(&sample);
        }

        if self.accumulator.count() < self.required_samples {
            return Ok(CalibrationProgress::Collecting {
                collected: self.accumulator.count(),
                required: self.required_samples,
            });
        }

        self.state = EstimatorState::Idle;
        if let Some(offsets) = self.accumulator.offsets() {
            self.offsets = offsets;
        }
        self.accumulator = CalibrationAccumulator::new();
        // Integration restarts from the next sample
        self.last_update_ms = None;

        store.save(&self.offsets)?;
        Ok(CalibrationProgress::Complete)
    }

    /// Calibration progress without advancing it
    pub fn calibration_progress(&self) -> CalibrationProgress {
        match self.state {
            EstimatorState::Idle => CalibrationProgress::Idle,
            EstimatorState::Calibrating => CalibrationProgress::Collecting {
                collected: self.accumulator.count(),
                required: self.required_samples,
            },
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ahrs::GRAVITY;
    use crate::traits::{MockCalibrationStore, MockSampleSource, MockTime};
    use nalgebra::Vector3;

    fn spinning(rate_deg: Vector3<f32>) -> InertialSample {
        let mut sample = InertialSample::at_rest();
        sample.gyro = rate_deg.map(|r| r.to_radians());
        sample
    }

    fn params(samples: u16) -> EstimatorParams {
        EstimatorParams {
            calibration_samples: samples,
        }
    }

    #[test]
    fn test_no_sample_no_change() {
        let time = MockTime::new();
        let mut est = OrientationEstimator::new(MockSampleSource::new(), &time, &params(10));
        time.advance_ms(1000);
        assert!(!est.update());
        assert_eq!(est.orientation(), Orientation::default());
    }

    #[test]
    fn test_first_step_uses_dt_floor() {
        let time = MockTime::with_initial(5_000_000);
        let source = MockSampleSource::constant(spinning(Vector3::new(100.0, 0.0, 0.0)));
        let mut est = OrientationEstimator::new(source, &time, &params(10));

        assert!(est.update());
        // 100 deg/s * 1 ms
        assert!((est.orientation().roll - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_constant_rate_integrates_to_rate_times_duration() {
        let time = MockTime::new();
        let g = Vector3::new(5.0, -2.0, 10.0);
        let source = MockSampleSource::constant(spinning(g));
        let mut est = OrientationEstimator::new(source, &time, &params(10));

        // 100 Hz for 2 seconds
        est.update();
        for _ in 0..200 {
            time.advance_ms(10);
            est.update();
        }

        let o = est.orientation();
        // First step integrates over the 1 ms floor
        let t = 2.0 + 0.001;
        assert!((o.roll - g.x * t).abs() < 0.01);
        assert!((o.pitch - g.y * t).abs() < 0.01);
        assert!((o.yaw - g.z * t).abs() < 0.01);
    }

    #[test]
    fn test_one_sample_per_update() {
        let time = MockTime::new();
        let mut source = MockSampleSource::new();
        for _ in 0..3 {
            source.push(spinning(Vector3::new(0.0, 0.0, 1.0)));
        }
        let mut est = OrientationEstimator::new(source, &time, &params(10));

        assert!(est.update());
        assert_eq!(est.source_mut().pending(), 2);
        assert!(est.update());
        assert!(est.update());
        assert!(!est.update());
    }

    #[test]
    fn test_gap_without_samples_counts_toward_dt() {
        let time = MockTime::new();
        let rate = spinning(Vector3::new(0.0, 0.0, 10.0));
        let mut source = MockSampleSource::new();
        source.push(rate);
        let mut est = OrientationEstimator::new(source, &time, &params(10));

        assert!(est.update());
        time.advance_ms(250);
        assert!(!est.update());

        est.source_mut().push(rate);
        time.advance_ms(250);
        assert!(est.update());

        // 1 ms floor, then the full 500 ms since the last consumed sample
        assert!((est.orientation().yaw - 10.0 * 0.501).abs() < 1e-3);
    }

    #[test]
    fn test_offsets_subtracted_before_integration() {
        let time = MockTime::new();
        let bias = Vector3::new(0.0, 0.0, 3.0_f32.to_radians());
        let mut sample = InertialSample::at_rest();
        sample.gyro = bias;
        let source = MockSampleSource::constant(sample);

        let store = MockCalibrationStore::with_record(CalibrationOffsets {
            gyro: bias,
            ..Default::default()
        });
        let mut est = OrientationEstimator::new(source, &time, &params(10));
        assert!(est.load_calibration(&store));

        for _ in 0..100 {
            time.advance_ms(10);
            est.update();
        }
        assert!(est.orientation().yaw.abs() < 1e-4);
    }

    #[test]
    fn test_missing_record_loads_defaults() {
        let time = MockTime::new();
        let mut est = OrientationEstimator::new(MockSampleSource::new(), &time, &params(10));
        est.set_offsets(CalibrationOffsets {
            gyro: Vector3::new(1.0, 1.0, 1.0),
            ..Default::default()
        });
        assert!(!est.load_calibration(&MockCalibrationStore::new()));
        assert_eq!(*est.offsets(), CalibrationOffsets::default());
    }

    #[test]
    fn test_calibration_cycle() {
        let time = MockTime::new();
        let mut sample = InertialSample::at_rest();
        sample.gyro = Vector3::new(0.01, -0.02, 0.03);
        sample.accel = Vector3::new(0.1, 0.0, GRAVITY + 0.2);
        let source = MockSampleSource::constant(sample);
        let mut store = MockCalibrationStore::new();
        let mut est = OrientationEstimator::new(source, &time, &params(5));

        assert_eq!(
            est.do_calibration_step(&mut store),
            Ok(CalibrationProgress::Idle)
        );

        est.start_calibration();
        assert!(est.is_calibrating());
        for i in 1..5 {
            assert_eq!(
                est.do_calibration_step(&mut store),
                Ok(CalibrationProgress::Collecting {
                    collected: i,
                    required: 5
                })
            );
        }
        assert_eq!(
            est.do_calibration_step(&mut store),
            Ok(CalibrationProgress::Complete)
        );
        assert_eq!(est.state(), EstimatorState::Idle);
        assert_eq!(store.saves, 1);

        let saved = store.stored.unwrap();
        assert!((saved.gyro.z - 0.03).abs() < 1e-6);
        assert!((saved.accel.x - 0.1).abs() < 1e-5);
        assert!((saved.accel.z - 0.2).abs() < 1e-4);
        assert_eq!(*est.offsets(), saved);
    }

    #[test]
    fn test_update_holds_while_calibrating() {
        let time = MockTime::new();
        let source = MockSampleSource::constant(spinning(Vector3::new(0.0, 0.0, 90.0)));
        let mut est = OrientationEstimator::new(source, &time, &params(50));
        est.start_calibration();

        time.advance_ms(100);
        assert!(!est.update());
        assert_eq!(est.orientation().yaw, 0.0);
        assert_eq!(est.source_mut().fetches(), 0);
    }

    #[test]
    fn test_cancel_keeps_offsets() {
        let time = MockTime::new();
        let source = MockSampleSource::constant(spinning(Vector3::new(1.0, 1.0, 1.0)));
        let mut store = MockCalibrationStore::new();
        let mut est = OrientationEstimator::new(source, &time, &params(3));

        est.start_calibration();
        est.do_calibration_step(&mut store).unwrap();
        est.cancel_calibration();

        assert_eq!(est.calibration_progress(), CalibrationProgress::Idle);
        assert_eq!(*est.offsets(), CalibrationOffsets::default());
        assert_eq!(store.saves, 0);
    }

    #[test]
    fn test_failed_save_keeps_new_offsets() {
        let time = MockTime::new();
        let source = MockSampleSource::constant(spinning(Vector3::new(0.0, 0.0, 2.0)));
        let mut store = MockCalibrationStore {
            fail_save: true,
            ..Default::default()
        };
        let mut est = OrientationEstimator::new(source, &time, &params(1));

        est.start_calibration();
        assert_eq!(
            est.do_calibration_step(&mut store),
            Err(ParameterError::WriteFailed)
        );
        assert!(!est.is_calibrating());
        assert!(est.offsets().gyro.z > 0.0);
    }
}
