//! Clock source abstraction for the control loops.
//!
//! Every loop in the core measures its own `dt` from a [`TimeSource`] rather
//! than assuming a fixed period, so host tests drive time explicitly through
//! [`MockTime`] and firmware plugs in the Embassy time driver.

use core::cell::Cell;

/// Monotonic clock since an arbitrary epoch (normally boot).
///
/// # Example
///
/// ```
/// use tiller_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// time.advance_ms(20);
/// assert_eq!(time.now_ms(), 20);
/// assert_eq!(time.elapsed_since(5_000), 15_000);
/// ```
pub trait TimeSource: Clone + Send + Sync {
    /// Returns current time in milliseconds.
    fn now_ms(&self) -> u64;

    /// Returns current time in microseconds.
    fn now_us(&self) -> u64;

    /// Returns elapsed microseconds since `reference_us`, saturating at zero
    /// when the reference lies in the future.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

/// A shared reference to a clock is itself a clock.
///
/// Lets a test keep the [`MockTime`] it advances while a controller owns a
/// borrowed handle to it.
impl<T: TimeSource> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

/// Controllable clock for host tests.
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

// Safety: MockTime is only used in single-threaded test contexts where Cell
// is sound. TimeSource requires Send + Sync for the embedded implementations.
unsafe impl Send for MockTime {}
unsafe impl Sync for MockTime {}

impl MockTime {
    /// Creates a clock starting at zero.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a clock starting at `us`.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the absolute time in microseconds.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the clock by `us` microseconds.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }

    /// Advances the clock by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(ms * 1000);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_us.get() / 1000
    }

    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}
