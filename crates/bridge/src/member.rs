//! # Structural Members
//!
//! A [`SimBeam`] is the live counterpart of one design beam: the joints
//! that realize it in the physics world, its break threshold and, for road
//! beams, the plank the train drives on.

use design::{BeamId, Material, NodeId};
use physics::{BodyHandle, JointHandle, PhysicsSim};

/// Joints of a road member: a weld at each end of the plank and a distance
/// spring directly between the two nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoadJoints {
    pub welds: [JointHandle; 2],
    pub stabilizer: JointHandle,
}

/// How a member is realized. Joint handles become `None` when the member
/// breaks; a plank outlives its joints and falls freely.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Distance { joint: Option<JointHandle> },
    Road { joints: Option<RoadJoints>, plank: BodyHandle },
}

#[derive(Clone, Debug)]
pub struct SimBeam {
    pub id: BeamId,
    pub a: NodeId,
    pub b: NodeId,
    pub material: Material,
    /// Node distance at build time.
    pub length: f32,
    /// `break_force_per_meter * length`.
    pub break_force: f32,
    pub kind: MemberKind,
    broken: bool,
}

impl SimBeam {
    pub(crate) fn new(
        id: BeamId,
        (a, b): (NodeId, NodeId),
        material: Material,
        length: f32,
        kind: MemberKind,
    ) -> Self {
        Self {
            id,
            a,
            b,
            material,
            length,
            break_force: material.break_force(length),
            kind,
            broken: false,
        }
    }

    /// Once set, never cleared.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    #[must_use]
    pub fn plank(&self) -> Option<BodyHandle> {
        match self.kind {
            MemberKind::Road { plank, .. } => Some(plank),
            MemberKind::Distance { .. } => None,
        }
    }

    fn joint_slots(&self) -> [Option<JointHandle>; 3] {
        match self.kind {
            MemberKind::Distance { joint } => [joint, None, None],
            MemberKind::Road {
                joints: Some(road), ..
            } => [
                Some(road.welds[0]),
                Some(road.welds[1]),
                Some(road.stabilizer),
            ],
            MemberKind::Road { joints: None, .. } => [None; 3],
        }
    }

    /// Live joint handles; empty once broken.
    pub fn joints(&self) -> impl Iterator<Item = JointHandle> {
        self.joint_slots().into_iter().flatten()
    }

    /// Largest reaction force among this member's joints in the last step.
    #[must_use]
    pub fn peak_force(&self, physics: &PhysicsSim, inv_dt: f32) -> f32 {
        self.joints()
            .filter_map(|joint| physics.reaction_force(joint, inv_dt))
            .fold(0.0, f32::max)
    }

    /// Break the member if any of its joints carried more than the
    /// threshold. Returns the offending force when this call broke it.
    pub fn check_break(&mut self, physics: &mut PhysicsSim, inv_dt: f32) -> Option<f32> {
        if self.broken {
            return None;
        }
        let peak = self.peak_force(physics, inv_dt);
        if peak > self.break_force {
            self.break_apart(physics);
            Some(peak)
        } else {
            None
        }
    }

    fn break_apart(&mut self, physics: &mut PhysicsSim) {
        for joint in self.joints() {
            let removed = physics.remove_joint(joint);
            debug_assert!(removed, "member {} lost track of joint {joint:?}", self.id);
        }
        match &mut self.kind {
            MemberKind::Distance { joint } => *joint = None,
            MemberKind::Road { joints, .. } => *joints = None,
        }
        self.broken = true;
    }
}
