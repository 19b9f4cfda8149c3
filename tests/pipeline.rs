//! End-to-end pipeline tests on the host
//!
//! A simulated vessel closes the loop: the rudder angle sets the yaw rate
//! the IMU reports, samples travel interrupt -> queue -> estimator, and the
//! servo drives the simulated rudder through its position sensor.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use nalgebra::Vector3;
use tiller::autopilot::{Autopilot, AutopilotConfig, NavigationInputs};
use tiller::devices::imu::{self, irq, ImuDataReady};
use tiller::devices::traits::{ImuError, RawImu};
use tiller::platform::PlatformError;
use tiller_core::ahrs::InertialSample;
use tiller_core::parameters::RudderServoParams;
use tiller_core::queue::{Consumer, SampleQueue};
use tiller_core::servo::angle_to_raw;
use tiller_core::steering::SteeringMode;
use tiller_core::traits::{
    MockButtons, MockCalibrationStore, MockSampleSource, MockTime, RudderActuator, RudderSensor,
    SampleSource,
};

const SLOTS: usize = 17;
const CAPACITY: usize = SLOTS - 1;

/// Degrees the simulated rudder moves per full-intensity servo command
const SLEW_PER_COMMAND: f32 = 5.0;

/// Mechanical rudder stop (degrees)
const RUDDER_STOP: f32 = 30.0;

/// Rudder angle shared by the simulated sensor, actuator and IMU
#[derive(Clone, Default)]
struct Rudder(Arc<AtomicU32>);

impl Rudder {
    fn angle(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn set(&self, angle: f32) {
        self.0.store(angle.to_bits(), Ordering::Relaxed);
    }
}

struct PlantSensor {
    rudder: Rudder,
    params: RudderServoParams,
}

impl RudderSensor for PlantSensor {
    fn read_raw(&mut self) -> u16 {
        angle_to_raw(self.rudder.angle(), &self.params)
    }
}

struct PlantActuator {
    rudder: Rudder,
    last: f32,
}

impl RudderActuator for PlantActuator {
    fn drive(&mut self, intensity: f32) {
        self.last = intensity;
        let angle = self.rudder.angle() + intensity * SLEW_PER_COMMAND;
        self.rudder.set(angle.clamp(-RUDDER_STOP, RUDDER_STOP));
    }
}

/// IMU on a hull that turns at `turn_rate` deg/s per degree of rudder
struct VesselImu {
    rudder: Rudder,
    turn_rate: f32,
    fail_init: bool,
}

impl RawImu for VesselImu {
    fn init(&mut self) -> Result<(), ImuError> {
        if self.fail_init {
            Err(ImuError::UnknownDevice)
        } else {
            Ok(())
        }
    }

    fn read_sample(&mut self) -> Result<InertialSample, ImuError> {
        let yaw_rate = (self.rudder.angle() * self.turn_rate).to_radians();
        let mut sample = InertialSample::at_rest();
        sample.gyro = Vector3::new(0.0, 0.0, yaw_rate);
        Ok(sample)
    }
}

type Pipeline<'t, S> =
    Autopilot<S, PlantSensor, PlantActuator, MockButtons, MockCalibrationStore, &'t MockTime>;

fn pipeline<'t, S: SampleSource>(
    time: &'t MockTime,
    source: S,
    rudder: &Rudder,
) -> Pipeline<'t, S> {
    let config = AutopilotConfig::default();
    Autopilot::new(
        source,
        PlantSensor {
            rudder: rudder.clone(),
            params: config.servo,
        },
        PlantActuator {
            rudder: rudder.clone(),
            last: 0.0,
        },
        MockButtons::new(),
        MockCalibrationStore::new(),
        time,
        config,
    )
}

/// Queue and interrupt handler wired to `line`, returning the consumer
fn wire_imu(line: u8, imu: VesselImu) -> Consumer<'static, InertialSample> {
    let queue: &'static mut SampleQueue<InertialSample, SLOTS> =
        Box::leak(Box::new(SampleQueue::new()));
    let (producer, consumer) = queue.split();
    let handler = Box::leak(Box::new(ImuDataReady::new(imu, producer)));
    imu::attach(line, handler).unwrap();
    consumer
}

/// Fire the data-ready line then tick, every 10 ms
fn run_with_irq<S: SampleSource>(
    ap: &mut Pipeline<'_, S>,
    time: &MockTime,
    line: u8,
    ms: u64,
) {
    for _ in 0..ms / 10 {
        assert!(irq::dispatch(line));
        ap.tick(&NavigationInputs::default());
        time.advance_ms(10);
    }
}

fn run<S: SampleSource>(ap: &mut Pipeline<'_, S>, time: &MockTime, ms: u64) {
    for _ in 0..ms / 10 {
        ap.tick(&NavigationInputs::default());
        time.advance_ms(10);
    }
}

#[test]
fn test_heading_hold_closes_the_loop() {
    let time = MockTime::new();
    let rudder = Rudder::default();
    let consumer = wire_imu(
        20,
        VesselImu {
            rudder: rudder.clone(),
            turn_rate: 1.0,
            fail_init: false,
        },
    );
    let mut ap = pipeline(&time, consumer, &rudder);
    ap.start().unwrap();
    ap.set_mode(SteeringMode::TrackHeading(10.0));

    run_with_irq(&mut ap, &time, 20, 20_000);

    let heading = ap.environment().heading;
    assert!((heading - 10.0).abs() < 2.0, "heading {}", heading);
    // Rudder back near midships once on course
    assert!(rudder.angle().abs() < 3.0, "rudder {}", rudder.angle());
    assert_eq!(ap.estimator_mut().source_mut().dropped(), 0);

    irq::unregister(20);
}

#[test]
fn test_turn_takes_the_short_way() {
    let time = MockTime::new();
    let rudder = Rudder::default();
    let consumer = wire_imu(
        21,
        VesselImu {
            rudder: rudder.clone(),
            turn_rate: 1.0,
            fail_init: false,
        },
    );
    let mut ap = pipeline(&time, consumer, &rudder);
    ap.start().unwrap();
    ap.set_mode(SteeringMode::TrackHeading(350.0));

    run_with_irq(&mut ap, &time, 21, 1_000);

    // 350 is 10 degrees to port of 0
    assert!(rudder.angle() < 0.0);
    assert!(ap.estimator().orientation().yaw < 0.0);

    irq::unregister(21);
}

#[test]
fn test_full_queue_rejects_newest_samples() {
    let time = MockTime::new();
    let rudder = Rudder::default();
    let consumer = wire_imu(
        22,
        VesselImu {
            rudder: rudder.clone(),
            turn_rate: 1.0,
            fail_init: false,
        },
    );
    let mut ap = pipeline(&time, consumer, &rudder);
    ap.start().unwrap();

    // No ticks while the interrupt keeps firing
    for _ in 0..CAPACITY + 4 {
        irq::dispatch(22);
    }
    let source = ap.estimator_mut().source_mut();
    assert_eq!(source.len(), CAPACITY);
    assert_eq!(source.dropped(), 4);

    irq::unregister(22);
}

#[test]
fn test_imu_init_failure_is_fatal() {
    let queue: &'static mut SampleQueue<InertialSample, SLOTS> =
        Box::leak(Box::new(SampleQueue::new()));
    let (producer, _consumer) = queue.split();
    let handler = Box::leak(Box::new(ImuDataReady::new(
        VesselImu {
            rudder: Rudder::default(),
            turn_rate: 0.0,
            fail_init: true,
        },
        producer,
    )));

    assert_eq!(
        imu::attach(23, handler),
        Err(PlatformError::Imu(ImuError::UnknownDevice))
    );
    assert!(!irq::is_registered(23));
}

#[test]
fn test_standby_leaves_rudder_in_place() {
    let time = MockTime::new();
    let rudder = Rudder::default();
    rudder.set(7.0);
    let mut ap = pipeline(&time, MockSampleSource::new(), &rudder);
    ap.start().unwrap();

    run(&mut ap, &time, 500);

    assert_eq!(ap.steering().desired_rudder_angle(), 0.0);
    assert_eq!(ap.servo().actuator().last, 0.0);
    // Standby leaves the rudder to the helmsman
    assert!((rudder.angle() - 7.0).abs() < 0.05);
}

#[test]
fn test_track_heading_commands_positive_rudder() {
    let time = MockTime::new();
    let rudder = Rudder::default();
    let mut ap = pipeline(&time, MockSampleSource::new(), &rudder);
    ap.start().unwrap();
    ap.set_mode(SteeringMode::TrackHeading(90.0));

    run(&mut ap, &time, 100);

    assert!(ap.steering().desired_rudder_angle() > 0.0);
    assert!(ap.servo().actuator().last > 0.0);
}

#[test]
fn test_rudder_lock_is_clamped() {
    let time = MockTime::new();
    let rudder = Rudder::default();
    let mut ap = pipeline(&time, MockSampleSource::new(), &rudder);
    ap.start().unwrap();
    ap.set_mode(SteeringMode::RudderLock(30.0));

    run(&mut ap, &time, 2_000);

    assert_eq!(ap.steering().mode(), SteeringMode::RudderLock(25.0));
    assert_eq!(ap.steering().desired_rudder_angle(), 25.0);
    assert!((rudder.angle() - 25.0).abs() < 1.0);
}

#[test]
fn test_servo_converges_and_reverses() {
    let time = MockTime::new();
    let rudder = Rudder::default();
    let mut ap = pipeline(&time, MockSampleSource::new(), &rudder);
    ap.start().unwrap();

    ap.set_mode(SteeringMode::RudderLock(10.0));
    run(&mut ap, &time, 2_000);
    assert!((rudder.angle() - 10.0).abs() < 1.0, "rudder {}", rudder.angle());
    // Inside the deadband the drive rests
    assert_eq!(ap.servo().actuator().last, 0.0);

    ap.set_mode(SteeringMode::RudderLock(-10.0));
    run(&mut ap, &time, 50);
    assert!(ap.servo().actuator().last < 0.0);

    run(&mut ap, &time, 2_000);
    assert!((rudder.angle() + 10.0).abs() < 1.0, "rudder {}", rudder.angle());
}
