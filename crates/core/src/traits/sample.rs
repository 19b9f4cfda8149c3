//! Inertial sample source

use heapless::Deque;

use crate::ahrs::InertialSample;
use crate::queue::Consumer;

/// Non-blocking source of inertial samples
///
/// "Try to fetch one new sample; report whether one was available." A
/// missing sample is not an error: the caller keeps its previous estimate.
pub trait SampleSource {
    fn try_fetch(&mut self) -> Option<InertialSample>;
}

impl SampleSource for Consumer<'_, InertialSample> {
    fn try_fetch(&mut self) -> Option<InertialSample> {
        self.pop()
    }
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn try_fetch(&mut self) -> Option<InertialSample> {
        (**self).try_fetch()
    }
}

/// Scripted sample source for host tests
///
/// Holds up to 64 queued samples. With `repeat` set, the last sample handed
/// out is returned again once the script runs dry.
#[derive(Default)]
pub struct MockSampleSource {
    samples: Deque<InertialSample, 64>,
    repeat: Option<InertialSample>,
    fetches: u32,
}

impl MockSampleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source that returns `sample` on every fetch
    pub fn constant(sample: InertialSample) -> Self {
        Self {
            samples: Deque::new(),
            repeat: Some(sample),
            fetches: 0,
        }
    }

    /// Queue a sample; returns false when the script is full
    pub fn push(&mut self, sample: InertialSample) -> bool {
        self.samples.push_back(sample).is_ok()
    }

    /// Stop repeating; the source reports no data once the script is empty
    pub fn stop(&mut self) {
        self.repeat = None;
    }

    /// Number of samples handed out so far
    pub fn fetches(&self) -> u32 {
        self.fetches
    }

    pub fn pending(&self) -> usize {
        self.samples.len()
    }
}

impl SampleSource for MockSampleSource {
    fn try_fetch(&mut self) -> Option<InertialSample> {
        let sample = self.samples.pop_front().or(self.repeat)?;
        self.fetches += 1;
        Some(sample)
    }
}
