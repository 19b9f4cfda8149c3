//! Embassy runtime glue
//!
//! - [`EmbassyTime`]: `TimeSource` over the Embassy time driver
//! - [`run_control_loop`]: async driver ticking the pipeline at the rate of
//!   its fastest cadence

use core::future::Future;
use core::pin::pin;

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};
use tiller_core::scheduler::ORIENTATION_TASK;
use tiller_core::traits::{
    ButtonInput, CalibrationStore, RudderActuator, RudderSensor, SampleSource, TimeSource,
};

use super::pipeline::{Autopilot, NavigationInputs};

/// Embassy time driver as a [`TimeSource`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTime;

impl TimeSource for EmbassyTime {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}

/// Tick `autopilot` until `stop` resolves, then shut it down
///
/// `nav` is polled once per tick for the latest course and wind readings.
/// The autopilot must already be started.
pub async fn run_control_loop<S, RS, A, B, C, N, F>(
    autopilot: &mut Autopilot<S, RS, A, B, C, EmbassyTime>,
    mut nav: N,
    stop: F,
) where
    S: SampleSource,
    RS: RudderSensor,
    A: RudderActuator,
    B: ButtonInput,
    C: CalibrationStore,
    N: FnMut() -> NavigationInputs,
    F: Future<Output = ()>,
{
    let period_us = ORIENTATION_TASK.period_us() as u64;
    let mut ticker = Ticker::every(Duration::from_micros(period_us));
    let mut stop = pin!(stop);

    crate::log_info!("Control loop running every {} us", period_us);
    loop {
        let inputs = nav();
        autopilot.tick(&inputs);

        match select(ticker.next(), &mut stop).await {
            Either::First(()) => {}
            Either::Second(()) => break,
        }
    }

    autopilot.shutdown();
}
