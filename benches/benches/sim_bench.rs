//! # Benchmarks do simulador
//!
//! Mede o custo por slot do laço de simulação e o fan-out paralelo de lote.
//!
//! Run: `cargo bench --bench sim_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ods_core::prelude::*;
use ods_sim::{run_batch, GreedyLocalFirst, LocalOnly, PolicyKind, SimulationJob, Simulator};

fn sample_config() -> DeviceConfig {
    DeviceConfig::single_queue(5, 2, 3, 0.3, 0.6)
}

/// Execução de um horizonte fixo sob políticas de referência
fn bench_simulation_run(c: &mut Criterion) {
    let config = sample_config();
    let simulator = Simulator::new(config, 10_000, 7).unwrap();

    c.bench_function("run_local_only_10k", |b| {
        b.iter(|| black_box(simulator.run(&mut LocalOnly).unwrap()))
    });

    c.bench_function("run_greedy_10k", |b| {
        b.iter(|| black_box(simulator.run(&mut GreedyLocalFirst).unwrap()))
    });
}

/// Lote de referência com quatro trabalhadores
fn bench_batch(c: &mut Criterion) {
    let jobs: Vec<SimulationJob> = [
        PolicyKind::LocalOnly,
        PolicyKind::OffloadOnly,
        PolicyKind::GreedyLocalFirst,
        PolicyKind::GreedyOffloadFirst,
    ]
    .into_iter()
    .map(|policy| SimulationJob {
        config: sample_config(),
        policy,
        slots: 5_000,
        seed: 7,
    })
    .collect();

    c.bench_function("batch_four_baselines", |b| {
        b.iter(|| black_box(run_batch(&jobs, 4).unwrap()))
    });
}

criterion_group!(benches, bench_simulation_run, bench_batch);
criterion_main!(benches);
