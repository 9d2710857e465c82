use design::{Beam, BeamId, Design, DesignError, Material, Node, NodeId, DEFAULT_BUDGET};

fn assert_graph_invariants(design: &Design) {
    let beams = design.beams();
    for (i, beam) in beams.iter().enumerate() {
        assert_ne!(beam.a, beam.b, "self-loop {beam:?}");
        assert!(design.node(beam.a).is_some(), "dangling {beam:?}");
        assert!(design.node(beam.b).is_some(), "dangling {beam:?}");
        for other in &beams[i + 1..] {
            assert!(!other.joins(beam.a, beam.b), "duplicate pair {beam:?} / {other:?}");
        }
    }
}

#[test]
fn beam_cannot_join_node_to_itself() {
    let mut design = Design::new();
    let n = design.add_node(0.0, 0.0, true);
    assert_eq!(design.add_beam(n, n, Material::Wood), Err(DesignError::SelfLoop(n)));
    assert!(design.beams().is_empty());
}

#[test]
fn duplicate_pair_rejected_in_either_order() {
    let mut design = Design::new();
    let a = design.add_node(0.0, 0.0, true);
    let b = design.add_node(2.0, 0.0, false);
    design.add_beam(a, b, Material::Wood).unwrap();

    assert_eq!(design.add_beam(a, b, Material::Steel), Err(DesignError::DuplicateBeam(a, b)));
    assert_eq!(design.add_beam(b, a, Material::Road), Err(DesignError::DuplicateBeam(b, a)));
    assert_eq!(design.beams().len(), 1);
}

#[test]
fn beam_to_unknown_node_rejected() {
    let mut design = Design::new();
    let a = design.add_node(0.0, 0.0, true);
    let ghost = NodeId(99);
    assert_eq!(design.add_beam(a, ghost, Material::Wood), Err(DesignError::UnknownNode(ghost)));
}

#[test]
fn removing_node_cascades_to_its_beams() {
    let mut design = Design::new();
    let left = design.add_node(0.0, 0.0, true);
    let mid = design.add_node(4.0, 0.0, false);
    let right = design.add_node(8.0, 0.0, true);
    let top = design.add_node(4.0, 3.0, false);
    let b1 = design.add_beam(left, mid, Material::Road).unwrap();
    let b2 = design.add_beam(mid, right, Material::Road).unwrap();
    let b3 = design.add_beam(mid, top, Material::Steel).unwrap();
    let keep = design.add_beam(left, top, Material::Wood).unwrap();

    let mut removed = design.remove_node(mid).unwrap();
    removed.sort();
    assert_eq!(removed, vec![b1, b2, b3]);
    assert_eq!(design.beams().len(), 1);
    assert_eq!(design.beams()[0].id, keep);
    assert!(design.beams().iter().all(|b| !b.touches(mid)));
    assert_graph_invariants(&design);

    assert_eq!(design.remove_node(mid), Err(DesignError::UnknownNode(mid)));
}

#[test]
fn remove_beam_leaves_nodes() {
    let mut design = Design::new();
    let a = design.add_node(0.0, 0.0, true);
    let b = design.add_node(3.0, 4.0, false);
    let beam = design.add_beam(a, b, Material::Steel).unwrap();

    let removed = design.remove_beam(beam).unwrap();
    assert_eq!(removed.material, Material::Steel);
    assert_eq!(design.nodes().len(), 2);
    assert_eq!(design.remove_beam(beam), Err(DesignError::UnknownBeam(beam)));

    // pair is free again
    design.add_beam(b, a, Material::Wood).unwrap();
}

#[test]
fn ids_are_never_reused() {
    let mut design = Design::new();
    let a = design.add_node(0.0, 0.0, true);
    design.remove_node(a).unwrap();
    let b = design.add_node(0.0, 0.0, true);
    assert_ne!(a, b);
}

#[test]
fn invariants_survive_edit_sequence() {
    let mut design = Design::new();
    let ids: Vec<NodeId> = (0..6)
        .map(|i| design.add_node(i as f32 * 2.0, (i % 2) as f32, i == 0 || i == 5))
        .collect();

    for (step, (i, j)) in [(0, 1), (1, 2), (1, 0), (2, 2), (2, 3), (3, 4), (4, 5), (3, 2), (0, 5)]
        .into_iter()
        .enumerate()
    {
        let material = Material::ALL[step % 3];
        let _ = design.add_beam(ids[i], ids[j], material);
        assert_graph_invariants(&design);
    }
    assert_eq!(design.beams().len(), 6);

    design.remove_node(ids[2]).unwrap();
    assert_graph_invariants(&design);
    let c = design.add_node(4.0, -1.0, false);
    design.add_beam(ids[1], c, Material::Road).unwrap();
    design.add_beam(c, ids[3], Material::Road).unwrap();
    assert_graph_invariants(&design);
}

#[test]
fn cost_is_material_rate_times_length() {
    let mut design = Design::new();
    let a = design.add_node(0.0, 0.0, true);
    let b = design.add_node(3.0, 4.0, false);
    let id = design.add_beam(a, b, Material::Steel).unwrap();
    let beam = *design.beam(id).unwrap();

    assert!((design.beam_length(&beam).unwrap() - 5.0).abs() < 1e-5);
    let expected = 5.0 * Material::Steel.props().cost_per_meter;
    assert!((design.total_cost() - expected).abs() < 1e-2);
}

#[test]
fn over_budget_design_is_rejected_before_play() {
    let mut design = Design::new();
    let a = design.add_node(0.0, 0.0, true);
    let b = design.add_node(30.0, 0.0, true);
    design.add_beam(a, b, Material::Road).unwrap();

    let cost = design.total_cost();
    assert!(cost > DEFAULT_BUDGET);
    assert_eq!(
        design.validate_for_play(DEFAULT_BUDGET),
        Err(DesignError::OverBudget { cost, budget: DEFAULT_BUDGET })
    );
    assert_eq!(design.validate_for_play(cost), Ok(()));
}

#[test]
fn design_without_road_is_rejected_before_play() {
    let mut design = Design::new();
    let a = design.add_node(0.0, 0.0, true);
    let b = design.add_node(4.0, 0.0, true);
    design.add_beam(a, b, Material::Steel).unwrap();
    assert_eq!(design.validate_for_play(DEFAULT_BUDGET), Err(DesignError::NoRoad));
    assert_eq!(Design::new().validate_for_play(DEFAULT_BUDGET), Err(DesignError::NoRoad));
}

#[test]
fn raw_parts_keep_dangling_beams_and_continue_ids() {
    let nodes = vec![Node { id: NodeId(3), x: 0.0, y: 0.0, anchor: true }];
    let beams = vec![Beam { id: BeamId(7), a: NodeId(3), b: NodeId(42), material: Material::Road }];
    let mut design = Design::from_raw_parts(nodes, beams);

    assert_eq!(design.beams().len(), 1);
    assert_eq!(design.beam_length(&design.beams()[0]), None);
    assert_eq!(design.total_cost(), 0.0);
    assert_eq!(design.add_node(1.0, 1.0, false), NodeId(8));
}
