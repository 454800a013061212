//! # Benchmarks da síntese de política
//!
//! Mede a montagem do LP para um valor de eta e a varredura completa com
//! extração da política.
//!
//! Run: `cargo bench --bench lp_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ods_chain::{MarkovChain, StateActionIndex, TransitionTable};
use ods_core::prelude::*;
use ods_lp::{LpModelBuilder, LpSolver, MinilpSolver, RangedPolicyFinder};

fn sample_config() -> DeviceConfig {
    DeviceConfig::single_queue(5, 2, 3, 0.3, 0.6)
}

/// Montagem do problema para um eta fixo
fn bench_model_build(c: &mut Criterion) {
    let config = sample_config();
    let chain = MarkovChain::build(&config).unwrap();
    let index = StateActionIndex::new(&chain);
    let table = TransitionTable::new(&chain, &index);

    c.bench_function("model_precompute", |b| {
        b.iter(|| black_box(LpModelBuilder::new(&index, &table, &config)))
    });

    let builder = LpModelBuilder::new(&index, &table, &config);
    c.bench_function("model_build_eta", |b| {
        b.iter(|| black_box(builder.build(0.5)))
    });

    let problem = builder.build(0.5);
    let solver = MinilpSolver::new();
    c.bench_function("solve_single_eta", |b| {
        b.iter(|| black_box(solver.solve(&problem).unwrap()))
    });
}

/// Varredura completa de eta com extração da melhor política
fn bench_ranged_search(c: &mut Criterion) {
    let config = sample_config();
    let solver = MinilpSolver::new();
    let finder = RangedPolicyFinder::new(&config, &solver).unwrap();

    c.bench_function("ranged_search_11_samples", |b| {
        b.iter(|| black_box(finder.find(11).unwrap()))
    });
}

criterion_group!(benches, bench_model_build, bench_ranged_search);
criterion_main!(benches);
