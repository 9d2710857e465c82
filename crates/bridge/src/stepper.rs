//! # Simulation Stepper
//!
//! Feeds real frame time into the world in fixed steps. Time is banked in
//! an accumulator; each call runs as many whole steps as it holds, capped
//! per call, and carries the remainder forward. After every step members
//! are checked against their break thresholds and the outcome is judged.

use design::BeamId;
use tracing::{debug, error, info};

use crate::outcome::{evaluate_outcome, Outcome};
use crate::simulation::WorldSimulation;

/// What one call to [`WorldSimulation::step`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub substeps: u32,
    /// Members that broke during this call, in break order.
    pub broken: Vec<BeamId>,
    /// Set when the outcome was decided during this call.
    pub decided: Option<Outcome>,
}

impl WorldSimulation {
    /// Advance by `real_dt` seconds of wall time. Non-positive and
    /// non-finite inputs add nothing.
    pub fn step(&mut self, real_dt: f64) -> StepReport {
        if real_dt.is_finite() && real_dt > 0.0 {
            self.accumulator += real_dt;
        }

        let fixed_dt = self.config.timing.fixed_dt;
        let mut report = StepReport::default();
        while self.accumulator >= fixed_dt && report.substeps < self.config.timing.max_substeps {
            self.accumulator -= fixed_dt;
            self.substep(&mut report);
            report.substeps += 1;
        }
        report
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn substep(&mut self, report: &mut StepReport) {
        let dt = self.config.timing.fixed_dt as f32;
        self.physics.step(dt);
        self.tick += 1;

        let inv_dt = 1.0 / dt;
        for member in &mut self.members {
            if let Some(force) = member.check_break(&mut self.physics, inv_dt) {
                debug!(
                    beam = %member.id,
                    material = %member.material,
                    force,
                    threshold = member.break_force,
                    t = self.tick as f64 * f64::from(dt),
                    "member broke"
                );
                report.broken.push(member.id);
            }
        }

        if self.outcome.is_terminal() {
            return;
        }
        let cars = self.train.car_positions(&self.physics);
        let outcome = evaluate_outcome(
            &cars,
            self.time(),
            self.config.finish_x(),
            &self.config.limits,
        );
        if outcome.is_terminal() {
            self.outcome = outcome;
            self.outcome_tick = Some(self.tick);
            report.decided = Some(outcome);
            info!(%outcome, t = self.time(), broken = self.broken_count(), "run decided");
            if let Err(err) = self.train.stop_motors(&mut self.physics) {
                error!("failed to stop train motors: {err}");
            }
        }
    }
}

/// Free-function form of [`WorldSimulation::step`].
pub fn step_simulation(sim: &mut WorldSimulation, real_dt: f64) -> StepReport {
    sim.step(real_dt)
}
