//! Benchmarks for minimization, K-map grouping and circuit tabulation.
//!
//! Run with:
//! ```bash
//! cargo bench --bench minimize
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use logic_lab::groups::detect_groups;
use logic_lab::kmap::KMap;
use logic_lab::qm::Minimizer;
use logic_lab::synth::synthesize;
use logic_lab::types::{default_variables, OptimizationType};

/// Deterministic random minterm sets over `width` variables.
fn random_functions(seed: u64, width: usize, count: usize) -> Vec<Vec<u32>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..1u32 << width).filter(|_| rng.random_bool(0.5)).collect())
        .collect()
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("qm/simplify");

    for width in [4, 6, 8] {
        let functions = random_functions(42, width, 16);
        let minimizer = Minimizer::with_width(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &functions, |b, functions| {
            b.iter(|| {
                for minterms in functions.iter() {
                    std::hint::black_box(minimizer.simplify(minterms, &[]));
                }
            })
        });
    }

    group.finish();
}

fn bench_groups(c: &mut Criterion) {
    let functions = random_functions(7, 4, 64);
    let kmaps: Vec<KMap> = functions.iter().map(|m| KMap::build(4, m, &[])).collect();

    c.bench_function("kmap/detect_groups", |b| {
        b.iter(|| {
            for kmap in kmaps.iter() {
                std::hint::black_box(detect_groups(kmap, OptimizationType::Sop));
            }
        })
    });
}

fn bench_truth_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit/truth_table");

    for width in [4, 8] {
        let variables = default_variables(width);
        let minimizer = Minimizer::new(variables.clone());
        let minterms = &random_functions(3, width, 1)[0];
        let expression = minimizer.simplify(minterms, &[]);
        let Ok(circuit) = synthesize(&expression, &variables) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(width), &circuit, |b, circuit| {
            b.iter(|| std::hint::black_box(circuit.truth_table()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_minimize, bench_groups, bench_truth_table);
criterion_main!(benches);
