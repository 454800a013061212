//! Fan-out paralelo de execuções independentes
//!
//! Partição contígua dos trabalhos, uma thread com escopo por fatia. Cada
//! trabalhador possui seu próprio simulador e política e escreve apenas nos
//! seus slots de resultado pré-dimensionados.

use serde::{Deserialize, Serialize};

use ods_core::DeviceConfig;
use ods_lp::{MinilpSolver, RangedPolicyFinder};

use crate::baseline::{GreedyLocalFirst, GreedyOffloadFirst, LocalOnly, OffloadOnly};
use crate::error::{SimError, SimResult};
use crate::events::SimulationReport;
use crate::policy::{OffloadPolicy, StochasticOffloadPolicy};
use crate::simulator::Simulator;

/// Política a instanciar por trabalho
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    /// Só CPU
    LocalOnly,
    /// Só transmissão
    OffloadOnly,
    /// Os dois recursos, CPU primeiro
    GreedyLocalFirst,
    /// Os dois recursos, transmissão primeiro
    GreedyOffloadFirst,
    /// Política sintetizada pela varredura de eta
    Synthesized {
        /// Número de amostras da varredura
        eta_samples: usize,
    },
}

impl PolicyKind {
    /// Nome curto para relatórios
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::LocalOnly => "local-only",
            PolicyKind::OffloadOnly => "offload-only",
            PolicyKind::GreedyLocalFirst => "greedy-local-first",
            PolicyKind::GreedyOffloadFirst => "greedy-offload-first",
            PolicyKind::Synthesized { .. } => "lp-stochastic",
        }
    }
}

/// Execução independente de simulação
#[derive(Debug, Clone)]
pub struct SimulationJob {
    /// Configuração do dispositivo
    pub config: DeviceConfig,
    /// Política a simular
    pub policy: PolicyKind,
    /// Horizonte em slots
    pub slots: u64,
    /// Semente do gerador
    pub seed: u64,
}

fn run_job(job: &SimulationJob) -> SimResult<SimulationReport> {
    let simulator = Simulator::new(job.config.clone(), job.slots, job.seed)?;
    let mut policy: Box<dyn OffloadPolicy> = match job.policy {
        PolicyKind::LocalOnly => Box::new(LocalOnly),
        PolicyKind::OffloadOnly => Box::new(OffloadOnly),
        PolicyKind::GreedyLocalFirst => Box::new(GreedyLocalFirst),
        PolicyKind::GreedyOffloadFirst => Box::new(GreedyOffloadFirst),
        PolicyKind::Synthesized { eta_samples } => {
            let solver = MinilpSolver::new();
            let finder = RangedPolicyFinder::new(&job.config, &solver)?;
            let outcome = finder.find(eta_samples)?;
            Box::new(StochasticOffloadPolicy::new(outcome.policy, job.seed))
        }
    };
    simulator.run(policy.as_mut())
}

/// Executa os trabalhos em até `workers` threads com escopo
///
/// Os resultados voltam na ordem dos trabalhos; o primeiro erro de qualquer
/// trabalhador encerra o lote.
pub fn run_batch(
    jobs: &[SimulationJob],
    workers: usize,
) -> SimResult<Vec<SimulationReport>> {
    assert!(workers >= 1, "batch needs at least one worker");
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = jobs.len().div_ceil(workers);
    let mut results: Vec<Option<SimResult<SimulationReport>>> =
        (0..jobs.len()).map(|_| None).collect();

    crossbeam_utils::thread::scope(|scope| {
        for (job_chunk, result_chunk) in
            jobs.chunks(chunk_size).zip(results.chunks_mut(chunk_size))
        {
            scope.spawn(move |_| {
                for (job, slot) in job_chunk.iter().zip(result_chunk.iter_mut()) {
                    assert!(slot.is_none(), "batch result slot written twice");
                    *slot = Some(run_job(job));
                }
            });
        }
    })
    .map_err(|_| SimError::WorkerPanicked)?;

    results
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| panic!("batch result slot left unwritten"))
        })
        .collect()
}
