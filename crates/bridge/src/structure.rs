//! # Structural Model Builder
//!
//! Turns a [`Design`] into physics: the static terrain, one body per node,
//! and the joints (plus a plank for road beams) for every beam.

use std::collections::BTreeMap;

use design::{Beam, Design, Layout, NodeId, PLANK_HALF_HEIGHT};
use physics::{
    BodyDesc, BodyHandle, CollisionLayer, DistanceJointDesc, Fixture, PhysicsSim, Shape, Spring,
    Vec2, WeldJointDesc,
};
use tracing::{debug, warn};

use crate::error::BridgeError;
use crate::member::{MemberKind, RoadJoints, SimBeam};

const PLATFORM_FRICTION: f32 = 0.9;
const FLOOR_FRICTION: f32 = 0.2;
const CLIFF_FRICTION: f32 = 0.6;
/// Cliff faces start this far below the platform edge so deck ends welded
/// at the edge never rub against them.
const CLIFF_LIP: f32 = 0.3;

const NODE_RADIUS: f32 = 0.1;
const NODE_DENSITY: f32 = 2.2;
const NODE_FRICTION: f32 = 0.5;
const NODE_RESTITUTION: f32 = 0.1;
const NODE_DAMPING: f32 = 0.05;

const PLANK_DENSITY: f32 = 1.2;
const PLANK_FRICTION: f32 = 0.95;
/// The node-to-node spring under a plank runs softer than the welds.
const STABILIZER_FREQUENCY_SCALE: f32 = 0.7;

/// Members shorter than this have no usable direction and are skipped.
const MIN_MEMBER_LENGTH: f32 = 1e-3;

/// Physics body of a design node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeBody {
    pub body: BodyHandle,
    pub anchor: bool,
}

/// Everything the builder created for a design.
#[derive(Clone, Debug, Default)]
pub struct StructuralModel {
    pub nodes: BTreeMap<NodeId, NodeBody>,
    pub members: Vec<SimBeam>,
}

/// Add the level's static terrain: both platform tops, the cliff faces
/// under their inner edges and the void floor spanning the gap.
pub fn build_environment(physics: &mut PhysicsSim, layout: &Layout) {
    let top = layout.platform_y;
    let lip = top - CLIFF_LIP;

    physics.add_static_edge(
        Vec2::new(layout.world_min, top),
        Vec2::new(layout.gap_start, top),
        PLATFORM_FRICTION,
    );
    physics.add_static_edge(
        Vec2::new(layout.gap_end, top),
        Vec2::new(layout.world_max, top),
        PLATFORM_FRICTION,
    );
    physics.add_static_edge(
        Vec2::new(layout.gap_start, lip),
        Vec2::new(layout.gap_start, layout.floor_y),
        CLIFF_FRICTION,
    );
    physics.add_static_edge(
        Vec2::new(layout.gap_end, lip),
        Vec2::new(layout.gap_end, layout.floor_y),
        CLIFF_FRICTION,
    );
    physics.add_static_edge(
        Vec2::new(layout.gap_start, layout.floor_y),
        Vec2::new(layout.gap_end, layout.floor_y),
        FLOOR_FRICTION,
    );
}

fn node_desc(position: Vec2, anchor: bool) -> BodyDesc {
    let shape = Shape::Circle {
        radius: NODE_RADIUS,
    };
    if anchor {
        let fixture = Fixture::new(0.0, NODE_FRICTION, NODE_RESTITUTION, CollisionLayer::Node);
        BodyDesc::fixed(shape, fixture).with_position(position)
    } else {
        let fixture =
            Fixture::new(NODE_DENSITY, NODE_FRICTION, NODE_RESTITUTION, CollisionLayer::Node);
        BodyDesc::dynamic(shape, fixture)
            .with_position(position)
            .with_damping(NODE_DAMPING, NODE_DAMPING)
    }
}

/// Create node bodies and member joints for `design`.
///
/// Beams naming a node the design does not contain are skipped with a
/// warning, as are zero-length beams; neither fails the build.
///
/// # Errors
///
/// [`BridgeError::Physics`] if the physics world rejects a joint.
pub fn build_structure(
    physics: &mut PhysicsSim,
    design: &Design,
) -> Result<StructuralModel, BridgeError> {
    let mut model = StructuralModel::default();

    for node in design.nodes() {
        let position = Vec2::new(node.x, node.y);
        let body = physics.add_body(&node_desc(position, node.anchor));
        model.nodes.insert(
            node.id,
            NodeBody {
                body,
                anchor: node.anchor,
            },
        );
    }

    let mut skipped = 0usize;
    for beam in design.beams() {
        let endpoints = design.node(beam.a).zip(design.node(beam.b));
        let bodies = model.nodes.get(&beam.a).zip(model.nodes.get(&beam.b));
        let (Some((node_a, node_b)), Some((body_a, body_b))) = (endpoints, bodies) else {
            warn!(beam = %beam.id, a = %beam.a, b = %beam.b, "beam references a missing node, skipped");
            skipped += 1;
            continue;
        };

        let from = Vec2::new(node_a.x, node_a.y);
        let to = Vec2::new(node_b.x, node_b.y);
        let length = from.distance(to);
        if length < MIN_MEMBER_LENGTH {
            warn!(beam = %beam.id, "beam has no length, skipped");
            skipped += 1;
            continue;
        }

        let ends = Endpoints {
            from,
            to,
            body_a: body_a.body,
            body_b: body_b.body,
            length,
        };
        let kind = if beam.material.is_road() {
            build_road(physics, beam, &ends)?
        } else {
            build_distance(physics, beam, &ends)?
        };
        model.members.push(SimBeam::new(
            beam.id,
            (beam.a, beam.b),
            beam.material,
            length,
            kind,
        ));
    }

    debug!(
        nodes = model.nodes.len(),
        members = model.members.len(),
        skipped,
        "structure built"
    );
    Ok(model)
}

struct Endpoints {
    from: Vec2,
    to: Vec2,
    body_a: BodyHandle,
    body_b: BodyHandle,
    length: f32,
}

fn material_spring(beam: &Beam) -> Spring {
    let props = beam.material.props();
    Spring::new(props.frequency, props.damping_ratio)
}

fn build_distance(
    physics: &mut PhysicsSim,
    beam: &Beam,
    ends: &Endpoints,
) -> Result<MemberKind, BridgeError> {
    let joint = physics.add_distance_joint(&DistanceJointDesc {
        body_a: ends.body_a,
        body_b: ends.body_b,
        local_anchor_a: Vec2::ZERO,
        local_anchor_b: Vec2::ZERO,
        rest_length: ends.length,
        spring: material_spring(beam),
    })?;
    Ok(MemberKind::Distance { joint: Some(joint) })
}

fn build_road(
    physics: &mut PhysicsSim,
    beam: &Beam,
    ends: &Endpoints,
) -> Result<MemberKind, BridgeError> {
    let spring = material_spring(beam);
    let delta = ends.to - ends.from;
    let angle = delta.y.atan2(delta.x);
    let half_length = ends.length * 0.5;

    let fixture = Fixture::new(PLANK_DENSITY, PLANK_FRICTION, 0.0, CollisionLayer::Plank);
    let shape = Shape::Box {
        half_extents: Vec2::new(half_length, PLANK_HALF_HEIGHT),
    };
    let plank = physics.add_body(
        &BodyDesc::dynamic(shape, fixture)
            .with_position(ends.from + delta * 0.5)
            .with_angle(angle),
    );

    let thickness = 2.0 * PLANK_HALF_HEIGHT;
    let mass = PLANK_DENSITY * ends.length * thickness;
    let inertia = mass * (ends.length * ends.length + thickness * thickness) / 12.0;

    let weld = |node: BodyHandle, end: f32| WeldJointDesc {
        body_a: node,
        body_b: plank,
        local_anchor_a: Vec2::ZERO,
        local_anchor_b: Vec2::new(end * half_length, 0.0),
        reference_angle: angle,
        spring,
        reference_inertia: inertia,
    };
    let weld_a = physics.add_weld_joint(&weld(ends.body_a, -1.0))?;
    let weld_b = physics.add_weld_joint(&weld(ends.body_b, 1.0))?;

    let stabilizer = physics.add_distance_joint(&DistanceJointDesc {
        body_a: ends.body_a,
        body_b: ends.body_b,
        local_anchor_a: Vec2::ZERO,
        local_anchor_b: Vec2::ZERO,
        rest_length: ends.length,
        spring: Spring::new(
            spring.frequency * STABILIZER_FREQUENCY_SCALE,
            spring.damping_ratio,
        ),
    })?;

    Ok(MemberKind::Road {
        joints: Some(RoadJoints {
            welds: [weld_a, weld_b],
            stabilizer,
        }),
        plank,
    })
}
