#![deny(clippy::all, clippy::pedantic)]
//! # Bridge Designs
//!
//! The data the player edits: nodes, beams and their materials, plus the
//! rules the editor enforces before a design may be played (graph
//! invariants, budget, at least one road beam) and the level the design is
//! played on.

pub mod error;
pub mod level;
pub mod material;
pub mod model;

pub use error::DesignError;
pub use level::{default_design, wood_span_design, Layout, DEFAULT_BUDGET, PLANK_HALF_HEIGHT};
pub use material::{Material, MaterialProps};
pub use model::{Beam, BeamId, Design, Node, NodeId};
