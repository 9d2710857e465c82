use bridge::{SimConfig, WorldSimulation};
use criterion::{criterion_group, criterion_main, Criterion};
use design::default_design;

fn bench_starter_bridge_second(c: &mut Criterion) {
    let config = SimConfig::default();
    let design = default_design(&config.layout);
    c.bench_function("starter_bridge_one_second", |b| {
        b.iter(|| {
            let mut sim = WorldSimulation::new(&design, config.clone()).unwrap();
            for _ in 0..60 {
                sim.step(1.0 / 60.0);
            }
            sim.tick()
        })
    });
}

fn bench_world_build(c: &mut Criterion) {
    let config = SimConfig::default();
    let design = default_design(&config.layout);
    c.bench_function("world_build", |b| {
        b.iter(|| WorldSimulation::new(&design, config.clone()).unwrap())
    });
}

criterion_group!(benches, bench_starter_bridge_second, bench_world_build);
criterion_main!(benches);
