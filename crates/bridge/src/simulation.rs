//! # World Simulation
//!
//! The aggregate a run revolves around: the physics world, the structure
//! built from the design, the train, the fixed-step clock and the latched
//! outcome. Stepping lives in [`crate::stepper`].

use std::collections::BTreeMap;

use design::{BeamId, Design, NodeId};
use physics::{PhysicsSim, Vec2};
use tracing::debug;

use crate::config::SimConfig;
use crate::error::BridgeError;
use crate::member::SimBeam;
use crate::outcome::Outcome;
use crate::structure::{build_environment, build_structure, NodeBody};
use crate::train::Train;

pub struct WorldSimulation {
    pub(crate) physics: PhysicsSim,
    pub(crate) config: SimConfig,
    pub(crate) nodes: BTreeMap<NodeId, NodeBody>,
    pub(crate) members: Vec<SimBeam>,
    pub(crate) train: Train,
    /// Fixed steps taken so far.
    pub(crate) tick: u64,
    /// Real time received but not yet simulated, always below one step
    /// unless the substep cap was hit.
    pub(crate) accumulator: f64,
    pub(crate) outcome: Outcome,
    pub(crate) outcome_tick: Option<u64>,
}

impl WorldSimulation {
    /// Build the world for `design` at `t = 0`.
    ///
    /// Cost and road checks are the editor's job
    /// ([`Design::validate_for_play`]); any design is accepted here.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Config`] for unusable settings,
    /// [`BridgeError::Physics`] if the physics world rejects the model.
    pub fn new(design: &Design, config: SimConfig) -> Result<Self, BridgeError> {
        config.validate()?;

        let mut physics = PhysicsSim::new(Vec2::new(0.0, config.gravity));
        build_environment(&mut physics, &config.layout);
        let structure = build_structure(&mut physics, design)?;
        let train = Train::build(&mut physics, &config.layout, &config.train)?;

        debug!(
            bodies = physics.body_count(),
            joints = physics.joint_count(),
            "world ready"
        );
        Ok(Self {
            physics,
            config,
            nodes: structure.nodes,
            members: structure.members,
            train,
            tick: 0,
            accumulator: 0.0,
            outcome: Outcome::Pending,
            outcome_tick: None,
        })
    }

    /// Simulated seconds, always a whole number of fixed steps.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time(&self) -> f64 {
        self.tick as f64 * self.config.timing.fixed_dt
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Simulated time at which the outcome was decided.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn outcome_time(&self) -> Option<f64> {
        self.outcome_tick
            .map(|tick| tick as f64 * self.config.timing.fixed_dt)
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn physics(&self) -> &PhysicsSim {
        &self.physics
    }

    #[must_use]
    pub fn train(&self) -> &Train {
        &self.train
    }

    #[must_use]
    pub fn members(&self) -> &[SimBeam] {
        &self.members
    }

    #[must_use]
    pub fn member(&self, id: BeamId) -> Option<&SimBeam> {
        self.members.iter().find(|member| member.id == id)
    }

    #[must_use]
    pub fn nodes(&self) -> &BTreeMap<NodeId, NodeBody> {
        &self.nodes
    }

    #[must_use]
    pub fn node_position(&self, id: NodeId) -> Option<Vec2> {
        let node = self.nodes.get(&id)?;
        self.physics.body_pose(node.body).map(|pose| pose.position)
    }

    #[must_use]
    pub fn broken_count(&self) -> usize {
        self.members.iter().filter(|member| member.is_broken()).count()
    }

    /// Where a camera should centre: the locomotive, clamped to the world.
    #[must_use]
    pub fn camera_target_x(&self) -> f32 {
        let layout = &self.config.layout;
        self.physics
            .body_pose(self.train.locomotive())
            .map_or(layout.gap_start, |pose| pose.position.x)
            .clamp(layout.world_min, layout.world_max)
    }
}
