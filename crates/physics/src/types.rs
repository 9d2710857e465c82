//! # Physics Types
//!
//! Plain descriptions of bodies, fixtures and joints handed to the
//! simulation builder, plus the opaque handles it returns. Everything at
//! this boundary speaks `glam`; the rapier/nalgebra types stay inside the
//! crate.

use rapier2d::prelude::{Group, ImpulseJointHandle, InteractionGroups, RigidBodyHandle};
use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Handle to a rigid body owned by a [`crate::PhysicsSim`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) RigidBodyHandle);

/// Handle to a joint owned by a [`crate::PhysicsSim`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct JointHandle(pub(crate) ImpulseJointHandle);

/// World-space position and rotation of a body.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise.
    pub angle: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable, infinite mass.
    Static,
    Dynamic,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Box { half_extents: Vec2 },
}

/// Which family of colliders a fixture belongs to.
///
/// Filtering is fixed:
/// - `Environment` touches everything,
/// - `Node` touches only the environment,
/// - `Plank` touches the environment and the train,
/// - `Train` touches the environment and planks, never itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionLayer {
    Environment,
    Node,
    Plank,
    Train,
}

impl CollisionLayer {
    const fn group(self) -> Group {
        match self {
            CollisionLayer::Environment => Group::GROUP_1,
            CollisionLayer::Node => Group::GROUP_2,
            CollisionLayer::Plank => Group::GROUP_3,
            CollisionLayer::Train => Group::GROUP_4,
        }
    }

    pub(crate) fn interaction_groups(self) -> InteractionGroups {
        let filter = match self {
            CollisionLayer::Environment => Group::ALL,
            CollisionLayer::Node => Group::GROUP_1,
            CollisionLayer::Plank => Group::GROUP_1.union(Group::GROUP_4),
            CollisionLayer::Train => Group::GROUP_1.union(Group::GROUP_3),
        };
        InteractionGroups::new(self.group(), filter)
    }
}

/// Contact material of a collider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fixture {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub layer: CollisionLayer,
}

impl Fixture {
    #[must_use]
    pub const fn new(density: f32, friction: f32, restitution: f32, layer: CollisionLayer) -> Self {
        Self {
            density,
            friction,
            restitution,
            layer,
        }
    }
}

/// Description of a single-fixture rigid body.
#[derive(Clone, Debug)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec2,
    pub angle: f32,
    pub shape: Shape,
    pub fixture: Fixture,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDesc {
    #[must_use]
    pub fn dynamic(shape: Shape, fixture: Fixture) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position: Vec2::ZERO,
            angle: 0.0,
            shape,
            fixture,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    #[must_use]
    pub fn fixed(shape: Shape, fixture: Fixture) -> Self {
        Self {
            kind: BodyKind::Static,
            ..Self::dynamic(shape, fixture)
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    #[must_use]
    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }
}

/// Soft-constraint parameters in Box2D terms: oscillation frequency in Hz
/// and the damping ratio (1.0 = critical).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub frequency: f32,
    pub damping_ratio: f32,
}

impl Spring {
    #[must_use]
    pub const fn new(frequency: f32, damping_ratio: f32) -> Self {
        Self {
            frequency,
            damping_ratio,
        }
    }

    /// Angular frequency `2πf`.
    #[must_use]
    pub fn omega(&self) -> f32 {
        std::f32::consts::TAU * self.frequency
    }

    /// Stiffness and damping for a unit effective mass.
    #[must_use]
    pub fn unit_coefficients(&self) -> (f32, f32) {
        let omega = self.omega();
        (omega * omega, 2.0 * self.damping_ratio * omega)
    }
}

/// Spring-damped distance constraint between two body-local anchors.
#[derive(Copy, Clone, Debug)]
pub struct DistanceJointDesc {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub local_anchor_a: Vec2,
    pub local_anchor_b: Vec2,
    pub rest_length: f32,
    pub spring: Spring,
}

/// Welds `body_b` to `body_a` at a shared world point. Translation is rigid;
/// the relative angle is held at its build-time value by a spring whose
/// stiffness is `reference_inertia * ω²`.
#[derive(Copy, Clone, Debug)]
pub struct WeldJointDesc {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub local_anchor_a: Vec2,
    pub local_anchor_b: Vec2,
    /// `angle(b) - angle(a)` at build time.
    pub reference_angle: f32,
    pub spring: Spring,
    pub reference_inertia: f32,
}

/// Rotational drive on a wheel joint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Motor {
    /// Target angular speed of the wheel relative to the chassis, rad/s.
    pub speed: f32,
    pub max_torque: f32,
}

/// Wheel on a chassis: suspension travel along the chassis y axis, free spin.
#[derive(Copy, Clone, Debug)]
pub struct WheelJointDesc {
    pub chassis: BodyHandle,
    pub wheel: BodyHandle,
    /// Wheel centre in chassis space.
    pub local_anchor: Vec2,
    pub suspension: Spring,
    /// Suspension travel either side of the rest point.
    pub travel: f32,
    pub motor: Option<Motor>,
}
