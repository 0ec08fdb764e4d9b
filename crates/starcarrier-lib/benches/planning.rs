use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

use starcarrier_lib::{
    build_graph, AllPairsEngine, BlockedPairs, Carrier, HealthTier, MaxRoutePlanner, Position,
    ShortestPathEngine, Star, StarLink, StarMap, VisitProfile, DEFAULT_MAX_HOPS,
};

/// Ring-with-chords starmap split across four galaxies, hypergiant every
/// 16th star.
fn fixture_starmap(stars: i64) -> StarMap {
    let mut all = Vec::with_capacity(stars as usize);
    for id in 0..stars {
        let angle = (id as f64) / (stars as f64) * std::f64::consts::TAU;
        let mut links = vec![StarLink {
            target: (id + 1) % stars,
            weight: None,
            capacity: None,
        }];
        if id % 7 == 0 {
            links.push(StarLink {
                target: (id + stars / 2) % stars,
                weight: None,
                capacity: None,
            });
        }
        all.push(Star {
            id,
            label: format!("Star {id}"),
            position: Position {
                x: 100.0 * angle.cos(),
                y: 100.0 * angle.sin(),
            },
            galaxy_id: Some(id / 32),
            hypergiant: id % 16 == 0,
            links,
            visit: VisitProfile::default(),
        });
    }
    StarMap::from_stars(all)
}

static STARMAP: Lazy<StarMap> = Lazy::new(|| fixture_starmap(128));

fn benchmark_engines(c: &mut Criterion) {
    let starmap = &*STARMAP;
    let blocked = BlockedPairs::new();

    c.bench_function("bellman_ford_128", |b| {
        let engine = ShortestPathEngine::new(build_graph(starmap, &blocked));
        b.iter(|| {
            let paths = engine.run(0).expect("no negative cycles");
            black_box(paths.distances.len())
        });
    });

    c.bench_function("floyd_warshall_128", |b| {
        b.iter(|| {
            let mut engine = AllPairsEngine::new(build_graph(starmap, &blocked));
            engine.run().expect("no negative cycles");
            black_box(engine.distance(0, 64))
        });
    });

    c.bench_function("max_route_plan_128", |b| {
        let planner = MaxRoutePlanner::new(starmap);
        let carrier = Carrier::new(80.0, HealthTier::Good, 50.0, 0.0, 5_000.0);
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(17);
            let report = planner
                .plan(0, &carrier, &blocked, &mut rng, DEFAULT_MAX_HOPS)
                .expect("start exists");
            black_box(report.visited_stars.len())
        });
    });
}

criterion_group!(benches, benchmark_engines);
criterion_main!(benches);
