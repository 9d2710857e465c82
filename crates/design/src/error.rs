use thiserror::Error;

use crate::model::{BeamId, NodeId};

/// Rejections raised by the editor. None of these ever reach the
/// simulation: a design that fails here is never played.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error("a beam cannot connect node {0} to itself")]
    SelfLoop(NodeId),
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("unknown beam {0}")]
    UnknownBeam(BeamId),
    #[error("nodes {0} and {1} are already connected")]
    DuplicateBeam(NodeId, NodeId),
    #[error("design costs {cost:.0}, over the budget of {budget:.0}")]
    OverBudget { cost: f32, budget: f32 },
    #[error("design needs at least one road beam")]
    NoRoad,
}
