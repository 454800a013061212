//! # Benchmarks da cadeia de Markov
//!
//! Mede a enumeração do espaço de estados, a rotulagem simbólica das arestas
//! e a resolução das frações de transição.
//!
//! Run: `cargo bench --bench chain_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ods_chain::{MarkovChain, StateActionIndex, TransitionTable};
use ods_core::prelude::*;

fn sample_config(queue_capacity: usize) -> DeviceConfig {
    DeviceConfig::single_queue(queue_capacity, 4, 3, 0.3, 0.6)
}

/// Construção da cadeia para capacidades crescentes
fn bench_chain_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_build");

    for capacity in [3usize, 5, 8] {
        let config = sample_config(capacity);
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &config,
            |b, config| b.iter(|| black_box(MarkovChain::build(config).unwrap())),
        );
    }

    group.finish();
}

/// Resolução numérica da tabela de frações
fn bench_fraction_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("fraction_resolution");

    let config = sample_config(5);
    let chain = MarkovChain::build(&config).unwrap();
    let index = StateActionIndex::new(&chain);
    let table = TransitionTable::new(&chain, &index);
    let assignment = SymbolAssignment::from_config(&config);

    group.bench_function("table_build", |b| {
        b.iter(|| black_box(TransitionTable::new(&chain, &index)))
    });

    group.bench_function("resolve_all_rows", |b| {
        b.iter(|| {
            for state_index in 0..index.num_states() {
                let state = index.state_at(state_index);
                for action in state.possible_actions() {
                    black_box(table.resolved_outgoing(state_index, &action, &assignment));
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_chain_build, bench_fraction_resolution);
criterion_main!(benches);
