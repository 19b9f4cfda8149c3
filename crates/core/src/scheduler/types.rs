//! Core types for the cooperative scheduler
//!
//! - Task metadata (compile-time configuration)
//! - Cadence (runtime due-time tracking for one periodic task)

/// Task metadata registered at compile-time
///
/// Each periodic task of the control pipeline has associated metadata that
/// defines its execution characteristics.
#[derive(Debug, Clone, Copy)]
pub struct TaskMetadata {
    /// Human-readable task name for logging and debugging
    pub name: &'static str,

    /// Target execution rate in Hz (1-1000)
    pub rate_hz: u32,

    /// Priority hint (0-255, higher = more important)
    pub priority: u8,

    /// Execution time budget in microseconds
    ///
    /// A run exceeding this budget counts as an overrun.
    pub budget_us: u32,
}

impl TaskMetadata {
    /// Calculate the task period in microseconds from the rate
    #[inline]
    pub const fn period_us(&self) -> u32 {
        if self.rate_hz == 0 {
            1_000_000
        } else {
            1_000_000 / self.rate_hz
        }
    }

    /// Check if execution time is within budget
    #[inline]
    pub const fn is_within_budget(&self, execution_us: u32) -> bool {
        execution_us <= self.budget_us
    }
}

/// Orientation estimation, one sample per run
pub const ORIENTATION_TASK: TaskMetadata = TaskMetadata {
    name: "orientation",
    rate_hz: 100,
    priority: 30,
    budget_us: 500,
};

/// Rudder servo loop
pub const SERVO_TASK: TaskMetadata = TaskMetadata {
    name: "servo",
    rate_hz: 20,
    priority: 20,
    budget_us: 1_000,
};

/// Steering mode controller
pub const STEERING_TASK: TaskMetadata = TaskMetadata {
    name: "steering",
    rate_hz: 10,
    priority: 10,
    budget_us: 1_000,
};

/// Operator input scanning
pub const HELM_TASK: TaskMetadata = TaskMetadata {
    name: "helm",
    rate_hz: 20,
    priority: 5,
    budget_us: 500,
};

/// Due-time tracking for one fixed-rate task
///
/// Jitter is tolerated: the caller gets the measured time since the previous
/// run rather than the nominal period. When the caller falls more than a full
/// period behind, the skipped periods are counted and the schedule resyncs
/// to the current time instead of bursting to catch up.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    meta: TaskMetadata,
    next_due_us: Option<u64>,
    last_run_us: Option<u64>,
    runs: u32,
    missed: u32,
    overruns: u32,
}

impl Cadence {
    pub const fn new(meta: TaskMetadata) -> Self {
        Self {
            meta,
            next_due_us: None,
            last_run_us: None,
            runs: 0,
            missed: 0,
            overruns: 0,
        }
    }

    pub fn metadata(&self) -> &TaskMetadata {
        &self.meta
    }

    /// If the task is due at `now_us`, mark it as run and return the seconds
    /// since the previous run (the nominal period on the first run)
    pub fn poll(&mut self, now_us: u64) -> Option<f32> {
        let period = self.meta.period_us() as u64;

        if let Some(due) = self.next_due_us {
            if now_us < due {
                return None;
            }
        }

        let dt_s = match self.last_run_us {
            Some(last) => now_us.saturating_sub(last) as f32 / 1_000_000.0,
            None => period as f32 / 1_000_000.0,
        };

        let next = match self.next_due_us {
            Some(due) => due + period,
            None => now_us + period,
        };
        if next <= now_us {
            self.missed = self.missed.saturating_add(((now_us - next) / period + 1) as u32);
            self.next_due_us = Some(now_us + period);
        } else {
            self.next_due_us = Some(next);
        }

        self.last_run_us = Some(now_us);
        self.runs = self.runs.saturating_add(1);
        Some(dt_s)
    }

    /// Record how long the run took; returns false on a budget overrun
    pub fn record_execution(&mut self, execution_us: u32) -> bool {
        let ok = self.meta.is_within_budget(execution_us);
        if !ok {
            self.overruns = self.overruns.saturating_add(1);
        }
        ok
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Periods skipped because the caller polled too late
    pub fn missed(&self) -> u32 {
        self.missed
    }

    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Forget the schedule; the next poll runs immediately
    pub fn reset(&mut self) {
        *self = Self::new(self.meta);
    }
}
