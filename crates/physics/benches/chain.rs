use criterion::{criterion_group, criterion_main, Criterion};
use physics::{
    BodyDesc, CollisionLayer, DistanceJointDesc, Fixture, PhysicsSim, Shape, Spring, Vec2,
};

fn hanging_chain(links: u32) -> PhysicsSim {
    let mut sim = PhysicsSim::new(Vec2::new(0.0, -9.8));
    let shape = Shape::Circle { radius: 0.1 };
    let fixture = Fixture::new(2.2, 0.5, 0.1, CollisionLayer::Node);
    let mut previous = sim.add_body(&BodyDesc::fixed(shape, fixture));
    for i in 1..=links {
        let at = Vec2::new(i as f32, 0.0);
        let body = sim.add_body(&BodyDesc::dynamic(shape, fixture).with_position(at));
        sim.add_distance_joint(&DistanceJointDesc {
            body_a: previous,
            body_b: body,
            local_anchor_a: Vec2::ZERO,
            local_anchor_b: Vec2::ZERO,
            rest_length: 1.0,
            spring: Spring::new(20.0, 0.7),
        })
        .unwrap();
        previous = body;
    }
    sim
}

fn bench_chain_step(c: &mut Criterion) {
    c.bench_function("chain_32_links_60_steps", |b| {
        b.iter(|| {
            let mut sim = hanging_chain(32);
            for _ in 0..60 {
                sim.step(1.0 / 60.0);
            }
        })
    });
}

criterion_group!(benches, bench_chain_step);
criterion_main!(benches);
