//! Structure and train construction.

use bridge::{build_environment, build_structure, MemberKind, SimConfig, Train, WorldSimulation};
use design::{
    default_design, wood_span_design, Beam, BeamId, Design, Layout, Material, Node, NodeId,
};
use physics::{PhysicsSim, Vec2};

const DT: f32 = 1.0 / 60.0;

#[test]
fn default_design_builds_planked_road_members() {
    let layout = Layout::default();
    let mut physics = PhysicsSim::new(Vec2::new(0.0, -9.8));
    build_environment(&mut physics, &layout);
    let model = build_structure(&mut physics, &default_design(&layout)).unwrap();

    assert_eq!(model.nodes.len(), 4);
    assert_eq!(model.members.len(), 3);
    for member in &model.members {
        assert!(!member.is_broken());
        assert!(member.plank().is_some());
        assert_eq!(member.joints().count(), 3);
        assert!((member.length - 4.0).abs() < 1e-4);
        assert!((member.break_force - Material::Road.break_force(4.0)).abs() < 1e-2);
    }
    // ground + 4 nodes + 3 planks
    assert_eq!(physics.body_count(), 8);
    assert_eq!(physics.joint_count(), 9);
}

#[test]
fn plank_spans_its_member() {
    let layout = Layout::default();
    let mut physics = PhysicsSim::new(Vec2::ZERO);
    let mut design = Design::new();
    let a = design.add_node(0.0, 0.0, true);
    let b = design.add_node(3.0, 4.0, true);
    design.add_beam(a, b, Material::Road).unwrap();
    build_environment(&mut physics, &layout);
    let model = build_structure(&mut physics, &design).unwrap();

    let plank = model.members[0].plank().unwrap();
    let pose = physics.body_pose(plank).unwrap();
    assert!((pose.position - Vec2::new(1.5, 2.0)).length() < 1e-5);
    assert!((pose.angle - 4.0f32.atan2(3.0)).abs() < 1e-5);
}

#[test]
fn non_road_beam_is_a_single_distance_joint() {
    let layout = Layout::default();
    let mut physics = PhysicsSim::new(Vec2::new(0.0, -9.8));
    let model = build_structure(&mut physics, &wood_span_design(&layout)).unwrap();

    let member = &model.members[0];
    assert!(matches!(member.kind, MemberKind::Distance { joint: Some(_) }));
    assert_eq!(member.plank(), None);
    assert!((member.break_force - Material::Wood.break_force(layout.gap_width())).abs() < 1e-2);
}

#[test]
fn anchors_stay_put() {
    let layout = Layout::default();
    let mut physics = PhysicsSim::new(Vec2::new(0.0, -9.8));
    build_environment(&mut physics, &layout);
    let model = build_structure(&mut physics, &default_design(&layout)).unwrap();
    let before: Vec<_> = model
        .nodes
        .values()
        .filter(|n| n.anchor)
        .map(|n| physics.body_pose(n.body).unwrap())
        .collect();

    for _ in 0..120 {
        physics.step(DT);
    }

    let after: Vec<_> = model
        .nodes
        .values()
        .filter(|n| n.anchor)
        .map(|n| physics.body_pose(n.body).unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn dangling_beam_is_skipped() {
    let nodes = vec![
        Node {
            id: NodeId(0),
            x: 0.0,
            y: -0.06,
            anchor: true,
        },
        Node {
            id: NodeId(1),
            x: 4.0,
            y: -0.06,
            anchor: false,
        },
    ];
    let beams = vec![
        Beam {
            id: BeamId(2),
            a: NodeId(0),
            b: NodeId(1),
            material: Material::Road,
        },
        Beam {
            id: BeamId(3),
            a: NodeId(1),
            b: NodeId(9),
            material: Material::Steel,
        },
    ];
    let design = Design::from_raw_parts(nodes, beams);
    let mut physics = PhysicsSim::new(Vec2::new(0.0, -9.8));
    let model = build_structure(&mut physics, &design).unwrap();

    assert_eq!(model.members.len(), 1);
    assert_eq!(model.members[0].id, BeamId(2));
}

#[test]
fn deleted_node_leaves_no_member_behind() {
    let layout = Layout::default();
    let mut design = default_design(&layout);
    let doomed = design.nodes()[1].id;
    let cascaded = design.remove_node(doomed).unwrap();
    assert_eq!(cascaded.len(), 2);

    let sim = WorldSimulation::new(&design, SimConfig::default()).unwrap();
    assert_eq!(sim.members().len(), 1);
    assert!(sim.members().iter().all(|m| m.a != doomed && m.b != doomed));
    assert!(sim.node_position(doomed).is_none());
}

#[test]
fn train_waits_on_the_left_platform() {
    let config = SimConfig::default();
    let layout = config.layout;
    let mut physics = PhysicsSim::new(Vec2::new(0.0, config.gravity));
    let train = Train::build(&mut physics, &layout, &config.train).unwrap();

    let cars = train.car_positions(&physics);
    assert!(cars[0].x > cars[1].x && cars[1].x > cars[2].x);
    for pair in cars.windows(2) {
        assert!((pair[0].x - pair[1].x - config.train.car_spacing).abs() < 1e-5);
    }

    let half_width = config.train.chassis_half_width;
    for car in cars {
        assert!(car.x + half_width < layout.gap_start);
        assert!(car.x - half_width > layout.world_min);
        assert!(car.y > layout.platform_y);
    }
    for wheel in train.wheels {
        let pose = physics.body_pose(wheel).unwrap();
        assert!(pose.position.y - config.train.wheel_radius > layout.platform_y);
        assert!(pose.position.x < layout.gap_start);
    }
}

#[test]
fn only_the_locomotive_is_driven() {
    let config = SimConfig::default();
    let mut physics = PhysicsSim::new(Vec2::new(0.0, config.gravity));
    let train = Train::build(&mut physics, &config.layout, &config.train).unwrap();

    for axle in train.driven_axles() {
        let motor = physics.motor(*axle).unwrap();
        assert!((motor.speed - config.train.motor_speed).abs() < 1e-6);
        assert!((motor.max_torque - config.train.motor_max_torque).abs() < 1e-6);
    }
    for axle in &train.axles[2..] {
        assert_eq!(physics.motor(*axle), None);
    }
    assert!(train.motors_on());
    assert_eq!(physics.joint_count(), 8);
}
