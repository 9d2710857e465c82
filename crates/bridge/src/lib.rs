#![deny(clippy::all, clippy::pedantic)]
//! # Bridge Simulation
//!
//! Plays a [`design::Design`] against the train: builds the structure and
//! the train in a physics world, advances it in fixed steps from real frame
//! time, breaks overloaded members and decides whether the train made it
//! across.

pub mod config;
pub mod error;
pub mod member;
pub mod outcome;
pub mod simulation;
pub mod snapshot;
pub mod stepper;
pub mod structure;
pub mod train;

pub use config::{OutcomeLimits, SimConfig, TimingConfig, TrainConfig};
pub use error::BridgeError;
pub use member::{MemberKind, RoadJoints, SimBeam};
pub use outcome::{evaluate_outcome, FailReason, Outcome};
pub use simulation::WorldSimulation;
pub use snapshot::{BeamView, NodeView, SimSnapshot};
pub use stepper::{step_simulation, StepReport};
pub use structure::{build_environment, build_structure, NodeBody, StructuralModel};
pub use train::{Train, CAR_COUNT, WHEEL_COUNT};
