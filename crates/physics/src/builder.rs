//! # Physics Simulation Builder
//!
//! Builder methods for adding bodies, static edges and joints to a
//! [`PhysicsSim`]. Joint flavours mirror the classic Box2D set the bridge
//! game is tuned against:
//!
//! - distance: a spring along the line between two anchors,
//! - weld: rigid translation with a spring-held relative angle,
//! - wheel: suspension along the chassis y axis plus an optional drive.

use rapier2d::math::{Isometry, Point, Real, Vector};
use rapier2d::prelude::{
    ColliderBuilder, GenericJoint, GenericJointBuilder, JointAxesMask, JointAxis, MotorModel,
    RigidBodyBuilder,
};

use crate::error::PhysicsError;
use crate::types::{
    BodyDesc, BodyHandle, BodyKind, CollisionLayer, DistanceJointDesc, JointHandle, Shape, Vec2,
    WeldJointDesc, WheelJointDesc,
};
use crate::PhysicsSim;

/// Viscous gain of wheel drives, N·m per rad/s of speed error. The drive
/// saturates at the motor's max torque long before this matters.
pub(crate) const DRIVE_GAIN: f32 = 4.0;

fn point(v: Vec2) -> Point<Real> {
    Point::new(v.x, v.y)
}

fn vector(v: Vec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

/// Builder methods for adding rigid bodies to the simulation
impl PhysicsSim {
    /// Add a rigid body carrying one fixture.
    pub fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let builder = match desc.kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let body = builder
            .translation(vector(desc.position))
            .rotation(desc.angle)
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .build();
        let handle = self.bodies.insert(body);

        let collider = match desc.shape {
            Shape::Circle { radius } => ColliderBuilder::ball(radius),
            Shape::Box { half_extents } => ColliderBuilder::cuboid(half_extents.x, half_extents.y),
        }
        .density(desc.fixture.density)
        .friction(desc.fixture.friction)
        .restitution(desc.fixture.restitution)
        .collision_groups(desc.fixture.layer.interaction_groups())
        .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        BodyHandle(handle)
    }

    /// Add a static segment from `a` to `b` to the shared ground body.
    pub fn add_static_edge(&mut self, a: Vec2, b: Vec2, friction: f32) {
        let ground = match self.ground {
            Some(handle) => handle,
            None => {
                let handle = self.bodies.insert(RigidBodyBuilder::fixed().build());
                self.ground = Some(handle);
                handle
            }
        };

        let edge = ColliderBuilder::segment(point(a), point(b))
            .friction(friction)
            .collision_groups(CollisionLayer::Environment.interaction_groups())
            .build();
        self.colliders
            .insert_with_parent(edge, ground, &mut self.bodies);
    }
}

/// Builder methods for adding constraints/joints
impl PhysicsSim {
    /// Add a spring-damped distance joint. The spring is mass-scaled: its
    /// stiffness is `m_eff * ω²` for the pair's effective mass.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if either body does not exist.
    pub fn add_distance_joint(
        &mut self,
        desc: &DistanceJointDesc,
    ) -> Result<JointHandle, PhysicsError> {
        let (stiffness, damping) = desc.spring.unit_coefficients();
        let joint = GenericJointBuilder::new(JointAxesMask::empty())
            .coupled_axes(JointAxesMask::LIN_AXES)
            .local_anchor1(point(desc.local_anchor_a))
            .local_anchor2(point(desc.local_anchor_b))
            .motor_position(JointAxis::LinX, desc.rest_length, stiffness, damping)
            .motor_model(JointAxis::LinX, MotorModel::AccelerationBased)
            .contacts_enabled(false)
            .build();
        self.insert_joint(desc.body_a, desc.body_b, joint)
    }

    /// Add a weld joint.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if either body does not exist.
    pub fn add_weld_joint(&mut self, desc: &WeldJointDesc) -> Result<JointHandle, PhysicsError> {
        let (stiffness, damping) = desc.spring.unit_coefficients();
        let joint = GenericJointBuilder::new(JointAxesMask::LIN_AXES)
            .local_frame1(Isometry::new(
                vector(desc.local_anchor_a),
                desc.reference_angle,
            ))
            .local_frame2(Isometry::new(vector(desc.local_anchor_b), 0.0))
            .motor_position(
                JointAxis::AngX,
                0.0,
                stiffness * desc.reference_inertia,
                damping * desc.reference_inertia,
            )
            .motor_model(JointAxis::AngX, MotorModel::ForceBased)
            .contacts_enabled(false)
            .build();
        self.insert_joint(desc.body_a, desc.body_b, joint)
    }

    /// Add a wheel joint between a chassis and a wheel body.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] if either body does not exist.
    pub fn add_wheel_joint(&mut self, desc: &WheelJointDesc) -> Result<JointHandle, PhysicsError> {
        let (stiffness, damping) = desc.suspension.unit_coefficients();
        let mut builder = GenericJointBuilder::new(JointAxesMask::LIN_X)
            .local_anchor1(point(desc.local_anchor))
            .local_anchor2(Point::origin())
            .limits(JointAxis::LinY, [-desc.travel, desc.travel])
            .motor_position(JointAxis::LinY, 0.0, stiffness, damping)
            .motor_model(JointAxis::LinY, MotorModel::AccelerationBased)
            .contacts_enabled(false);

        if let Some(motor) = desc.motor {
            builder = builder
                .motor_model(JointAxis::AngX, MotorModel::ForceBased)
                .motor_velocity(JointAxis::AngX, motor.speed, DRIVE_GAIN)
                .motor_max_force(JointAxis::AngX, motor.max_torque);
        }

        self.insert_joint(desc.chassis, desc.wheel, builder.build())
    }

    fn insert_joint(
        &mut self,
        body_a: BodyHandle,
        body_b: BodyHandle,
        joint: GenericJoint,
    ) -> Result<JointHandle, PhysicsError> {
        for body in [body_a, body_b] {
            if !self.bodies.contains(body.0) {
                return Err(PhysicsError::UnknownBody(body));
            }
        }
        let handle = self.impulse_joints.insert(body_a.0, body_b.0, joint, true);
        Ok(JointHandle(handle))
    }
}
