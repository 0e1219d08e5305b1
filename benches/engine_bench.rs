use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use prospector::board::CollectionRates;
use prospector::cluster::ClusterBuilder;
use prospector::config::ScoringConfig;
use prospector::eval::{NoDiagnostics, TargetScorer};
use prospector::path::DistanceTable;
use prospector::planner::{plan_turn, score_units};
use prospector::protocol::{random_snapshot, TurnSnapshot};

const SEED: u64 = 42;
const SIZE: usize = 32;

fn snapshot() -> TurnSnapshot {
    random_snapshot(SEED, SIZE, SIZE)
}

fn bench_registry_build(c: &mut Criterion) {
    let snap = snapshot();
    c.bench_function("cluster_registry_build_32x32", |b| {
        b.iter(|| {
            let mut builder = ClusterBuilder::new(SIZE, SIZE);
            for tile in &snap.resources {
                builder
                    .add_tile(tile.cell(), tile.kind, tile.amount, tile.point)
                    .unwrap();
            }
            black_box(builder.build())
        })
    });
}

fn bench_distance_table(c: &mut Criterion) {
    let snap = snapshot();
    c.bench_function("distance_table_build_32x32", |b| {
        b.iter(|| {
            black_box(
                DistanceTable::build(
                    SIZE,
                    SIZE,
                    &snap.opponent_city_tiles.iter().copied().collect(),
                )
                .unwrap(),
            )
        })
    });
}

fn bench_best_target(c: &mut Criterion) {
    let snap = snapshot();
    let ctx = snap.build_context(&CollectionRates::default()).unwrap();
    let pathing = snap.distance_table().unwrap();
    let config = ScoringConfig::default();
    let unit = snap.units[0].clone();
    c.bench_function("best_target_single_unit", |b| {
        b.iter(|| {
            let scorer = TargetScorer::new(&ctx, &pathing, &config);
            black_box(scorer.best_target(black_box(&unit), &mut NoDiagnostics).unwrap())
        })
    });
}

fn bench_plan_turn(c: &mut Criterion) {
    let snap = snapshot();
    let ctx = snap.build_context(&CollectionRates::default()).unwrap();
    let pathing = snap.distance_table().unwrap();
    let config = ScoringConfig::default();
    let units = snap.validated_units().unwrap();

    let mut group = c.benchmark_group("turn");
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("plan_turn_sequential", |b| {
        b.iter(|| {
            let mut ctx = ctx.clone();
            black_box(plan_turn(&mut ctx, &units, &pathing, &config, &mut NoDiagnostics).unwrap())
        })
    });
    group.bench_function("score_units_parallel", |b| {
        b.iter(|| black_box(score_units(&ctx, &units, &pathing, &config).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_registry_build,
    bench_distance_table,
    bench_best_target,
    bench_plan_turn
);
criterion_main!(benches);
