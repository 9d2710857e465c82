//! Whole runs of the shipped designs.

use bridge::{FailReason, Outcome, SimConfig, WorldSimulation};
use design::{default_design, wood_span_design, BeamId, Design, DesignError, Layout, Material};

const FRAME: f64 = 1.0 / 60.0;

fn run_to_end(sim: &mut WorldSimulation, limit: f64) {
    while !sim.outcome().is_terminal() && sim.time() < limit {
        sim.step(FRAME);
    }
}

#[test]
fn starter_bridge_carries_the_train_across() {
    let config = SimConfig::default();
    let design = default_design(&config.layout);
    let mut sim = WorldSimulation::new(&design, config).unwrap();

    run_to_end(&mut sim, 20.0);

    assert_eq!(sim.outcome(), Outcome::Win);
    assert!(sim.outcome_time().unwrap() < 18.0);
    assert_eq!(sim.broken_count(), 0);
    let cars = sim.train().car_positions(sim.physics());
    assert!(cars[2].x > sim.config().finish_x());
}

#[test]
fn bare_wood_span_drops_the_train() {
    let config = SimConfig::default();
    let design = wood_span_design(&config.layout);
    let mut sim = WorldSimulation::new(&design, config).unwrap();

    run_to_end(&mut sim, 20.0);

    assert_eq!(sim.outcome(), Outcome::Fail(FailReason::Crash));
    assert!(sim.outcome_time().unwrap() < 18.0);
}

/// A road deck whose left end hangs off a short link. The long spans pull
/// on it with the same tension they pull on each other, but its threshold
/// scales with its length.
fn weak_link_deck(layout: &Layout) -> (Design, BeamId) {
    let mut design = Design::new();
    let y = layout.deck_y();
    let left = design.add_node(layout.gap_start, y, true);
    let stub = design.add_node(layout.gap_start + 0.2, y, false);
    let mid = design.add_node(layout.gap_start + layout.gap_width() / 2.0, y, false);
    let right = design.add_node(layout.gap_end, y, true);

    let link = design.add_beam(left, stub, Material::Road).unwrap();
    design.add_beam(stub, mid, Material::Road).unwrap();
    design.add_beam(mid, right, Material::Road).unwrap();
    (design, link)
}

#[test]
fn short_link_snaps_under_normal_gravity() {
    let config = SimConfig::default();
    let (design, link) = weak_link_deck(&config.layout);
    design.validate_for_play(config.budget).unwrap();
    let mut sim = WorldSimulation::new(&design, config).unwrap();

    let mut first_break = None;
    while !sim.outcome().is_terminal() && sim.time() < 20.0 {
        let report = sim.step(FRAME);
        if first_break.is_none() {
            first_break = report.broken.first().map(|beam| (*beam, sim.time()));
        }
    }

    let (beam, at) = first_break.expect("no member broke");
    println!("first break: beam {beam} at t={at:.2}");
    assert_eq!(beam, link);
    let member = sim.members().iter().find(|m| m.id == link).unwrap();
    assert!(member.is_broken());
    assert_eq!(member.joints().count(), 0);

    assert_eq!(sim.outcome(), Outcome::Fail(FailReason::Crash));
    assert!(sim.outcome_time().unwrap() < 18.0);
}

#[test]
fn idle_train_times_out() {
    let mut config = SimConfig::default();
    config.train.motor_speed = 0.0;
    config.limits.timeout = 2.0;
    let design = default_design(&config.layout);
    let mut sim = WorldSimulation::new(&design, config).unwrap();

    run_to_end(&mut sim, 5.0);

    assert_eq!(sim.outcome(), Outcome::Fail(FailReason::Timeout));
    let decided = sim.outcome_time().unwrap();
    assert!(decided > 2.0 && decided < 2.0 + 2.0 * FRAME);
}

#[test]
fn budget_is_checked_before_the_simulation() {
    let config = SimConfig::default();
    let design = default_design(&config.layout);
    let cost = design.total_cost();

    assert!(matches!(
        design.validate_for_play(cost - 1.0),
        Err(DesignError::OverBudget { .. })
    ));
    // The world itself never looks at cost.
    let sim = WorldSimulation::new(&design, SimConfig { budget: cost - 1.0, ..config });
    assert!(sim.is_ok());
}

#[test]
fn empty_design_still_builds() {
    let config = SimConfig::default();
    let sim = WorldSimulation::new(&design::Design::new(), config).unwrap();
    assert!(sim.members().is_empty());
    assert!(sim.nodes().is_empty());
    assert_eq!(sim.outcome(), Outcome::Pending);
}
