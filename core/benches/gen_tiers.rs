//! Board generation cost across board sizes and densities.

use std::hint::black_box;

use badgesweep_core::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

const TIERS: [(&str, Coord2, CellCount); 4] = [
    ("badge", (12, 10), 12),
    ("beginner", (9, 9), 10),
    ("intermediate", (16, 16), 40),
    ("dense", (30, 16), 240),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size, bombs) in TIERS {
        let config = GameConfig::new(size, bombs).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            let mut rng = SmallRng::seed_from_u64(42);
            b.iter(|| black_box(TruthMap::generate(black_box(config), &mut rng).unwrap()));
        });
    }
    group.finish();
}

fn bench_restart(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut session = GameSession::new(config, RandomBoardGenerator::new(7)).unwrap();

    c.bench_function("restart_badge", |b| {
        b.iter(|| {
            session.restart().unwrap();
            black_box(session.truth().bomb_count())
        });
    });
}

criterion_group!(benches, bench_generate, bench_restart);
criterion_main!(benches);
