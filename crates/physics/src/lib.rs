#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Truss Physics Layer
//!
//! The rigid-body capability the bridge simulation runs on. This crate is a
//! thin, typed wrapper over [`rapier2d`]: it does not implement a solver of
//! its own, it pins down the handful of primitives the bridge game needs and
//! gives them Box2D-style parameters.
//!
//! ## Key Components
//!
//! -   **Bodies:** static or dynamic, each with a single circle or box
//!     fixture ([`BodyDesc`], [`Fixture`]). Static environment edges hang off
//!     one shared ground body.
//! -   **Joints:** spring-damped distance joints, welds and wheel joints,
//!     described by [`DistanceJointDesc`], [`WeldJointDesc`] and
//!     [`WheelJointDesc`] and created through the builder methods on
//!     [`PhysicsSim`].
//! -   **Queries:** body poses and per-joint reaction forces after each
//!     step, which is what member-failure checks are built on.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use physics::{BodyDesc, CollisionLayer, Fixture, PhysicsSim, Shape, Vec2};
//!
//! let mut sim = PhysicsSim::new(Vec2::new(0.0, -9.8));
//! sim.add_static_edge(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0), 0.9);
//! let ball = sim.add_body(
//!     &BodyDesc::dynamic(
//!         Shape::Circle { radius: 0.2 },
//!         Fixture::new(1.0, 0.5, 0.0, CollisionLayer::Train),
//!     )
//!     .with_position(Vec2::new(0.0, 2.0)),
//! );
//! sim.step(1.0 / 60.0);
//! let pose = sim.body_pose(ball);
//! ```

pub mod builder;
pub mod error;
pub mod simulation;
pub mod types;

pub use error::PhysicsError;
pub use simulation::PhysicsSim;
pub use types::{
    BodyDesc, BodyHandle, BodyKind, CollisionLayer, DistanceJointDesc, Fixture, JointHandle, Motor,
    Pose, Shape, Spring, Vec2, WeldJointDesc, WheelJointDesc,
};
