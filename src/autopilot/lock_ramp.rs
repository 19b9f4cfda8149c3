//! Soft rudder lock
//!
//! Jumping straight into `RudderLock(target)` slams the rudder from wherever
//! it is to the target at full drive. The soft lock instead walks the lock
//! angle linearly from the measured rudder angle to the target, one step per
//! steering tick, then settles on the target.

/// Ramp progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LockPhase {
    /// No lock requested
    Idle,
    /// Walking toward the target
    Ramping { step: u16, steps: u16 },
    /// Holding the target; the steering controller keeps the lock
    Settled,
}

/// Linear ramp into a rudder lock
#[derive(Debug, Clone, Copy)]
pub struct SoftRudderLock {
    start: f32,
    target: f32,
    phase: LockPhase,
}

impl Default for SoftRudderLock {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftRudderLock {
    pub const fn new() -> Self {
        Self {
            start: 0.0,
            target: 0.0,
            phase: LockPhase::Idle,
        }
    }

    /// Start a ramp from `measured` to `target` over `steps` ticks
    ///
    /// A non-finite `measured` angle ramps from center; `steps` of 0 behaves
    /// as 1 (jump on the next tick). A non-finite `target` locks at center.
    pub fn engage(&mut self, measured: f32, target: f32, steps: u16) {
        self.start = if measured.is_finite() { measured } else { 0.0 };
        self.target = if target.is_finite() { target } else { 0.0 };
        self.phase = LockPhase::Ramping {
            step: 0,
            steps: steps.max(1),
        };
        crate::log_info!(
            "Rudder lock: {} -> {} over {} ticks",
            self.start,
            self.target,
            steps.max(1)
        );
    }

    /// Lock angle for this tick, `None` when there is nothing to re-issue
    pub fn next_angle(&mut self) -> Option<f32> {
        let LockPhase::Ramping { step, steps } = self.phase else {
            return None;
        };
        let step = step + 1;
        let angle = if step >= steps {
            self.phase = LockPhase::Settled;
            crate::log_debug!("Rudder lock settled at {}", self.target);
            self.target
        } else {
            self.phase = LockPhase::Ramping { step, steps };
            let fraction = step as f32 / steps as f32;
            self.start + (self.target - self.start) * fraction
        };
        Some(angle)
    }

    /// Forget the lock (another mode took over)
    pub fn cancel(&mut self) {
        self.phase = LockPhase::Idle;
    }

    pub fn phase(&self) -> LockPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != LockPhase::Idle
    }

    pub fn is_ramping(&self) -> bool {
        matches!(self.phase, LockPhase::Ramping { .. })
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_idle_yields_nothing() {
        let mut lock = SoftRudderLock::new();
        assert_eq!(lock.next_angle(), None);
        assert!(!lock.is_active());
    }

    #[test]
    fn test_linear_ramp_then_settle() {
        let mut lock = SoftRudderLock::new();
        lock.engage(-5.0, 15.0, 4);

        let angles: Vec<f32> = core::iter::from_fn(|| lock.next_angle()).collect();
        let expected = [0.0, 5.0, 10.0, 15.0];
        assert_eq!(angles.len(), expected.len());
        for (a, e) in angles.iter().zip(expected) {
            assert!((a - e).abs() < EPSILON, "{} != {}", a, e);
        }
        assert_eq!(lock.phase(), LockPhase::Settled);
        assert!(lock.is_active());
        assert!(!lock.is_ramping());
    }

    #[test]
    fn test_ramp_is_monotonic_and_bounded() {
        let mut lock = SoftRudderLock::new();
        lock.engage(20.0, -20.0, 10);
        let mut previous = 20.0f32;
        while let Some(angle) = lock.next_angle() {
            assert!(angle <= previous);
            assert!(angle >= -20.0 - EPSILON);
            previous = angle;
        }
        assert!((previous + 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_steps_jumps() {
        let mut lock = SoftRudderLock::new();
        lock.engage(0.0, 12.0, 0);
        assert_eq!(lock.next_angle(), Some(12.0));
        assert_eq!(lock.next_angle(), None);
    }

    #[test]
    fn test_non_finite_inputs() {
        let mut lock = SoftRudderLock::new();
        lock.engage(f32::NAN, 10.0, 2);
        assert!((lock.next_angle().unwrap() - 5.0).abs() < EPSILON);

        lock.engage(0.0, f32::INFINITY, 1);
        assert_eq!(lock.next_angle(), Some(0.0));
    }

    #[test]
    fn test_cancel() {
        let mut lock = SoftRudderLock::new();
        lock.engage(0.0, 10.0, 5);
        lock.next_angle();
        lock.cancel();
        assert_eq!(lock.next_angle(), None);
        assert_eq!(lock.phase(), LockPhase::Idle);
    }
}
