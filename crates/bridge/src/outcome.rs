//! # Outcome Evaluator
//!
//! Decides whether a run is won, lost or still going from the car
//! positions and the simulated clock. Pure; the stepper owns the latch that
//! keeps the first terminal result.

use physics::Vec2;
use serde::Serialize;

use crate::config::OutcomeLimits;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailReason {
    /// A car dropped below the crash line.
    Crash,
    /// The rear car never crossed the finish line in time.
    Timeout,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Pending,
    Win,
    Fail(FailReason),
}

impl Outcome {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Pending)
    }

    /// `""` while pending, otherwise `"win"` or `"fail"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Pending => "",
            Outcome::Win => "win",
            Outcome::Fail(_) => "fail",
        }
    }

    #[must_use]
    pub const fn fail_reason(self) -> Option<FailReason> {
        match self {
            Outcome::Fail(reason) => Some(reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Pending => f.write_str("pending"),
            Outcome::Win => f.write_str("win"),
            Outcome::Fail(FailReason::Crash) => f.write_str("fail (crash)"),
            Outcome::Fail(FailReason::Timeout) => f.write_str("fail (timeout)"),
        }
    }
}

/// Judge one instant of a run. `cars` runs front to back, so the last entry
/// is the rear car.
///
/// A crash beats a win reached in the same instant, and either beats the
/// timeout.
#[must_use]
pub fn evaluate_outcome(cars: &[Vec2], t: f64, finish_x: f32, limits: &OutcomeLimits) -> Outcome {
    if cars.iter().any(|car| car.y < limits.crash_y) {
        return Outcome::Fail(FailReason::Crash);
    }
    if cars.last().is_some_and(|rear| rear.x > finish_x) {
        return Outcome::Win;
    }
    if t > limits.timeout {
        return Outcome::Fail(FailReason::Timeout);
    }
    Outcome::Pending
}
