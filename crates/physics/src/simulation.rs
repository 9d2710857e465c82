//! # Physics Simulation Core
//!
//! This module owns the rapier2d pipeline and every set it mutates. The
//! rest of the workspace sees it through [`PhysicsSim`]: step by an exact
//! `dt`, read poses back, query per-joint reaction forces, and destroy
//! joints or retune motors between steps.

use std::num::NonZeroUsize;

use rapier2d::math::{Real, Vector};
use rapier2d::prelude::{
    CCDSolver, DefaultBroadPhase, GenericJoint, ImpulseJointSet, IntegrationParameters,
    IslandManager, JointAxis, MultibodyJointSet, NarrowPhase, PhysicsPipeline, QueryPipeline,
    RigidBodyHandle, RigidBodySet, ColliderSet,
};

use crate::error::PhysicsError;
use crate::types::{BodyHandle, JointHandle, Motor, Pose, Vec2};

/// Velocity iterations per step. Truss graphs are long chains of stiff
/// constraints and need more than rapier's default of four.
const SOLVER_ITERATIONS: usize = 8;

/// Main physics simulation container
pub struct PhysicsSim {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    pub(crate) impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    /// Shared static body carrying every environment edge.
    pub(crate) ground: Option<RigidBodyHandle>,
}

impl PhysicsSim {
    /// Create an empty world with the given gravity (y up).
    #[must_use]
    pub fn new(gravity: Vec2) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        if let Some(iterations) = NonZeroUsize::new(SOLVER_ITERATIONS) {
            integration_parameters.num_solver_iterations = iterations;
        }

        Self {
            gravity: Vector::new(gravity.x, gravity.y),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            ground: None,
        }
    }

    /// Advance the world by exactly `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    #[must_use]
    pub fn body_pose(&self, body: BodyHandle) -> Option<Pose> {
        self.bodies.get(body.0).map(|rb| {
            let t = rb.translation();
            Pose {
                position: Vec2::new(t.x, t.y),
                angle: rb.rotation().angle(),
            }
        })
    }

    /// Linear velocity and angular velocity (rad/s) of a body.
    #[must_use]
    pub fn body_velocity(&self, body: BodyHandle) -> Option<(Vec2, f32)> {
        self.bodies.get(body.0).map(|rb| {
            let v = rb.linvel();
            (Vec2::new(v.x, v.y), rb.angvel())
        })
    }

    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    #[must_use]
    pub fn contains_joint(&self, joint: JointHandle) -> bool {
        self.impulse_joints.get(joint.0).is_some()
    }

    /// Magnitude of the linear reaction force the joint applied during the
    /// last step of length `1 / inv_dt`. `None` once the joint has been
    /// removed.
    ///
    /// Rapier splits the impulse of each axis between the locked-DOF slot,
    /// the limit and the motor; springs live entirely in the motor slot.
    /// The stored impulse covers only the last of the solver's substeps,
    /// each `dt / num_solver_iterations` long.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reaction_force(&self, joint: JointHandle, inv_dt: f32) -> Option<f32> {
        let substeps = self.integration_parameters.num_solver_iterations.get() as f32;
        let joint = self.impulse_joints.get(joint.0)?;
        let axis_impulse = |index: usize, axis: JointAxis| {
            let motor = joint.data.motor(axis).map_or(0.0, |m| m.impulse);
            let limit = joint.data.limits(axis).map_or(0.0, |l| l.impulse);
            joint.impulses[index] + motor + limit
        };
        let x = axis_impulse(0, JointAxis::LinX);
        let y = axis_impulse(1, JointAxis::LinY);
        Some((x * x + y * y).sqrt() * inv_dt * substeps)
    }

    /// Destroy a joint. Returns `false` if it was already gone.
    pub fn remove_joint(&mut self, joint: JointHandle) -> bool {
        self.impulse_joints.remove(joint.0, true).is_some()
    }

    /// Drive a wheel joint at `motor.speed`, bounded by `motor.max_torque`.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownJoint`] if the joint does not exist.
    pub fn set_motor(&mut self, joint: JointHandle, motor: Motor) -> Result<(), PhysicsError> {
        self.with_joint_mut(joint, |data| {
            data.set_motor_velocity(JointAxis::AngX, motor.speed, crate::builder::DRIVE_GAIN);
            data.set_motor_max_force(JointAxis::AngX, motor.max_torque);
        })
    }

    /// Zero a wheel joint's drive so the wheel spins freely.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownJoint`] if the joint does not exist.
    pub fn disable_motor(&mut self, joint: JointHandle) -> Result<(), PhysicsError> {
        self.with_joint_mut(joint, |data| {
            data.set_motor_velocity(JointAxis::AngX, 0.0, 0.0);
            data.set_motor_max_force(JointAxis::AngX, 0.0);
        })
    }

    /// Current drive of a wheel joint as `(target speed, max torque)`.
    #[must_use]
    pub fn motor(&self, joint: JointHandle) -> Option<Motor> {
        let joint = self.impulse_joints.get(joint.0)?;
        let motor = joint.data.motor(JointAxis::AngX)?;
        Some(Motor {
            speed: motor.target_vel,
            max_torque: motor.max_force,
        })
    }

    fn with_joint_mut(
        &mut self,
        joint: JointHandle,
        edit: impl FnOnce(&mut GenericJoint),
    ) -> Result<(), PhysicsError> {
        let (body1, body2) = {
            let (_, entry) = self
                .impulse_joints
                .iter_mut()
                .find(|(handle, _)| *handle == joint.0)
                .ok_or(PhysicsError::UnknownJoint(joint))?;
            edit(&mut entry.data);
            (entry.body1, entry.body2)
        };

        for handle in [body1, body2] {
            if let Some(body) = self.bodies.get_mut(handle) {
                body.wake_up(true);
            }
        }
        Ok(())
    }
}
