//! Criterion benchmarks for the route optimizer.
//!
//! Uses the closed-form heuristic oracle so timings reflect the swarm,
//! annealing and fuzzy inference rather than any forecasting model.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qpso_route::fuzzy::compute_satisfaction;
use qpso_route::oracle::{Destination, HeuristicOracle, TripContext};
use qpso_route::qpso::{decode, QpsoConfig, QpsoRunner, RoutingProblem};

const AREAS: [&str; 8] = [
    "Kompally",
    "Gachibowli",
    "Uppal",
    "Mehdipatnam",
    "NH44 Medchal",
    "L B Nagar",
    "HITEC City",
    "ORR Expressway",
];

fn problem(n: usize) -> RoutingProblem<HeuristicOracle> {
    let destinations = (0..n)
        .map(|i| {
            Destination::new(format!("{} {}", AREAS[i % AREAS.len()], i))
                .with_distance(4.0 + (i % 7) as f64 * 3.0)
        })
        .collect();
    RoutingProblem::new(destinations, HeuristicOracle::new()).with_context(TripContext::default())
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_fuzzy(c: &mut Criterion) {
    c.bench_function("fuzzy_compute_satisfaction", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for dev in -60..=60 {
                acc += compute_satisfaction(black_box(dev as f64), black_box(85.0));
            }
            black_box(acc)
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("spv_decode");
    for &n in &[10usize, 100, 1000] {
        let position: Vec<f64> = (0..n).map(|i| ((i * 7919) % n) as f64 * 0.37 - 5.0).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &position, |b, p| {
            b.iter(|| black_box(decode(black_box(p))))
        });
    }
    group.finish();
}

fn bench_qpso_sa(c: &mut Criterion) {
    let mut group = c.benchmark_group("qpso_sa");
    group.sample_size(10);

    for (n, particles, generations) in [(6usize, 30usize, 100usize), (20, 30, 50), (50, 40, 30)] {
        let config = QpsoConfig::default()
            .with_particles(particles)
            .with_generations(generations)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", n, particles, generations), n),
            &(problem(n), config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = QpsoRunner::run(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fuzzy, bench_decode, bench_qpso_sa);
criterion_main!(benches);
