//! Criterion benchmarks for encoding construction and annealing.
//!
//! Uses uniformly random points in the unit square.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_gridtsp::anneal::{drive, AnnealConfig, Annealer, ScheduleConfig};
use u_gridtsp::encoding::CostFunctionBuilder;
use u_gridtsp::random::create_rng;
use u_gridtsp::{EncodingWeights, PointSet, TspConfig, TspSolver};

fn random_points(n: usize, seed: u64) -> PointSet {
    let mut rng = create_rng(seed);
    (0..n)
        .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_plain_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("plain_encoding");
    for &n in &[8, 16, 32] {
        let points = random_points(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, p| {
            b.iter(|| {
                let encoding = CostFunctionBuilder::new(black_box(p), EncodingWeights::default())
                    .plain();
                black_box(encoding)
            })
        });
    }
    group.finish();
}

fn bench_anneal_plain(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal_plain");
    group.sample_size(10);
    for &n in &[6, 10] {
        let points = random_points(n, 7);
        let encoding = CostFunctionBuilder::new(&points, EncodingWeights::default()).plain();
        let schedule = ScheduleConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &encoding, |b, e| {
            b.iter(|| {
                let config = AnnealConfig::default().with_seed(42);
                let mut annealer = Annealer::new(e.cost.clone(), config);
                let resolved = schedule.resolve(e.size());
                black_box(drive(&mut annealer, &resolved, schedule.settle_steps))
            })
        });
    }
    group.finish();
}

fn bench_grid_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_solve");
    group.sample_size(10);
    for (n, grid_size) in [(16usize, 2usize), (32, 4)] {
        let points = random_points(n, 3);
        let config = TspConfig::default().with_grid_size(grid_size).with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_g{}", n, grid_size), n),
            &(points, config),
            |b, (p, c)| {
                b.iter(|| {
                    let mut solver = TspSolver::new(*c).unwrap();
                    black_box(solver.solve(black_box(p)).unwrap())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_plain_encoding, bench_anneal_plain, bench_grid_solve);
criterion_main!(benches);
