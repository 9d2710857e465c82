//! # Snapshots
//!
//! A serializable, read-only picture of a run for whatever draws or logs
//! it: node and plank poses, member state, cars, wheels and the outcome.

use design::{BeamId, Material, NodeId};
use physics::{BodyHandle, Pose, Vec2};
use serde::Serialize;

use crate::outcome::FailReason;
use crate::simulation::WorldSimulation;

#[derive(Clone, Debug, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub position: Vec2,
    pub anchor: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct BeamView {
    pub id: BeamId,
    pub a: NodeId,
    pub b: NodeId,
    pub material: Material,
    pub broken: bool,
    /// Road members only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plank: Option<Pose>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimSnapshot {
    pub t: f64,
    /// `""`, `"win"` or `"fail"`.
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_reason: Option<FailReason>,
    pub nodes: Vec<NodeView>,
    pub beams: Vec<BeamView>,
    pub cars: Vec<Pose>,
    pub wheels: Vec<Pose>,
}

impl WorldSimulation {
    #[must_use]
    pub fn snapshot(&self) -> SimSnapshot {
        let physics = &self.physics;
        let nodes = self
            .nodes
            .iter()
            .filter_map(|(id, node)| {
                physics.body_pose(node.body).map(|pose| NodeView {
                    id: *id,
                    position: pose.position,
                    anchor: node.anchor,
                })
            })
            .collect();
        let beams = self
            .members
            .iter()
            .map(|member| BeamView {
                id: member.id,
                a: member.a,
                b: member.b,
                material: member.material,
                broken: member.is_broken(),
                plank: member.plank().and_then(|plank| physics.body_pose(plank)),
            })
            .collect();
        let poses = |bodies: &[BodyHandle]| -> Vec<Pose> {
            bodies
                .iter()
                .filter_map(|&body| physics.body_pose(body))
                .collect()
        };

        SimSnapshot {
            t: self.time(),
            outcome: self.outcome.as_str(),
            fail_reason: self.outcome.fail_reason(),
            nodes,
            beams,
            cars: poses(&self.train.cars),
            wheels: poses(&self.train.wheels),
        }
    }
}
