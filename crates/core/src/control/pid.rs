//! PID loop with measured time step
//!
//! Both closed loops of the autopilot (steering and rudder servo) run one
//! [`Pid`] each. The loop is the textbook form with no derivative filtering
//! and no integral clamp; safety comes from the output clamp applied by
//! [`Pid::update_clamped`].
//!
//! ```text
//! integral   += error * dt
//! derivative  = (error - last_error) / dt
//! output      = kp * error + ki * integral + kd * derivative
//! ```

/// Smallest time step a loop will integrate over (seconds)
///
/// Applied on the first step and whenever two updates land closer than this,
/// so the derivative term cannot blow up.
pub const MIN_DT_S: f32 = 0.001;

/// Floor `dt` to [`MIN_DT_S`]; non-finite input also maps to the floor
#[inline]
pub fn floor_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > MIN_DT_S {
        dt
    } else {
        MIN_DT_S
    }
}

/// PID gains
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

impl PidGains {
    pub const fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self { kp, ki, kd }
    }
}

impl Default for PidGains {
    /// Proportional-only unit gain
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

/// Loop-local PID memory
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidState {
    /// Accumulated error * seconds
    pub integral: f32,
    /// Error seen by the previous step
    pub last_error: f32,
    /// Clock reading of the previous step, `None` before the first one
    pub last_timestamp_ms: Option<u64>,
}

/// PID controller
#[derive(Debug, Clone, Copy)]
pub struct Pid {
    gains: PidGains,
    state: PidState,
}

impl Pid {
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            state: PidState::default(),
        }
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    pub fn state(&self) -> &PidState {
        &self.state
    }

    /// Clear integral and last error
    ///
    /// The timestamp survives so the next step still measures a real `dt`.
    pub fn reset(&mut self) {
        self.state.integral = 0.0;
        self.state.last_error = 0.0;
    }

    /// Seconds since the previous call, floored, and record `now_ms`
    pub fn dt_since(&mut self, now_ms: u64) -> f32 {
        let dt = match self.state.last_timestamp_ms {
            Some(last) => now_ms.saturating_sub(last) as f32 / 1000.0,
            None => 0.0,
        };
        self.state.last_timestamp_ms = Some(now_ms);
        floor_dt(dt)
    }

    /// Run one step and return the raw (unclamped) output
    pub fn update(&mut self, error: f32, dt: f32) -> f32 {
        let dt = floor_dt(dt);

        self.state.integral += error * dt;
        let derivative = (error - self.state.last_error) / dt;
        self.state.last_error = error;

        self.gains.kp * error + self.gains.ki * self.state.integral + self.gains.kd * derivative
    }

    /// Run one step and clamp the output to `±limit`
    ///
    /// A non-finite output (NaN error, overflowed integral) yields 0.
    pub fn update_clamped(&mut self, error: f32, dt: f32, limit: f32) -> f32 {
        let output = self.update(error, dt);
        if !output.is_finite() {
            return 0.0;
        }
        output.clamp(-limit, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_floor_dt() {
        assert_eq!(floor_dt(0.0), MIN_DT_S);
        assert_eq!(floor_dt(-1.0), MIN_DT_S);
        assert_eq!(floor_dt(f32::NAN), MIN_DT_S);
        assert_eq!(floor_dt(0.0005), MIN_DT_S);
        assert_eq!(floor_dt(0.1), 0.1);
    }

    #[test]
    fn test_proportional_only() {
        let mut pid = Pid::new(PidGains::new(2.0, 0.0, 0.0));
        assert!((pid.update(5.0, 0.1) - 10.0).abs() < EPSILON);
        assert!((pid.update(-3.0, 0.1) + 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_integral_accumulates() {
        let mut pid = Pid::new(PidGains::new(0.0, 1.0, 0.0));
        pid.update(2.0, 0.5);
        let out = pid.update(2.0, 0.5);
        assert!((out - 2.0).abs() < EPSILON);
        assert!((pid.state().integral - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_derivative_uses_floored_dt() {
        let mut pid = Pid::new(PidGains::new(0.0, 0.0, 1.0));
        pid.update(1.0, 0.1);
        // dt of 0 is floored to 1 ms: (2 - 1) / 0.001
        let out = pid.update(2.0, 0.0);
        assert!((out - 1000.0).abs() < 0.1);
    }

    #[test]
    fn test_reset_clears_integral_and_error() {
        let mut pid = Pid::new(PidGains::new(1.0, 1.0, 1.0));
        pid.dt_since(100);
        pid.update(10.0, 0.1);
        pid.reset();
        assert_eq!(pid.state().integral, 0.0);
        assert_eq!(pid.state().last_error, 0.0);
        assert_eq!(pid.state().last_timestamp_ms, Some(100));
    }

    #[test]
    fn test_dt_since() {
        let mut pid = Pid::new(PidGains::default());
        assert_eq!(pid.dt_since(1_000), MIN_DT_S);
        assert!((pid.dt_since(1_100) - 0.1).abs() < EPSILON);
        // Same timestamp twice floors
        assert_eq!(pid.dt_since(1_100), MIN_DT_S);
        // Clock going backwards floors rather than going negative
        assert_eq!(pid.dt_since(900), MIN_DT_S);
    }

    #[test]
    fn test_update_clamped() {
        let mut pid = Pid::new(PidGains::new(1.0, 0.0, 0.0));
        assert_eq!(pid.update_clamped(90.0, 0.1, 25.0), 25.0);
        assert_eq!(pid.update_clamped(-90.0, 0.1, 25.0), -25.0);
        assert!((pid.update_clamped(10.0, 0.1, 25.0) - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_update_clamped_non_finite() {
        let mut pid = Pid::new(PidGains::new(1.0, 0.0, 0.0));
        assert_eq!(pid.update_clamped(f32::NAN, 0.1, 25.0), 0.0);
    }

    #[test]
    fn test_monotonic_proportional_response() {
        let gains = PidGains::new(1.5, 0.2, 0.1);
        let mut previous = 0.0f32;
        for step in 1..50 {
            let mut pid = Pid::new(gains);
            let error = step as f32;
            let out = pid.update(error, 0.1);
            assert!(out >= previous);
            previous = out;
        }
    }
}
