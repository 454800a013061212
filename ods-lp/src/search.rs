//! Varredura externa sobre eta
//!
//! Reconstrói só o que depende de eta: a cadeia, o índice e a tabela de
//! frações são construídos uma vez e compartilhados por todas as resoluções
//! da varredura.

use ods_chain::{MarkovChain, StateActionIndex, TransitionTable};
use ods_core::prelude::*;

use crate::error::{LpError, LpResult};
use crate::model::LpModelBuilder;
use crate::policy::StochasticPolicy;
use crate::solver::LpSolver;

/// Melhor amostra efetiva da varredura
#[derive(Debug, Clone)]
pub struct RangedSearchOutcome {
    /// Política condicional extraída
    pub policy: StochasticPolicy,
    /// Valor de eta da amostra vencedora
    pub eta: f64,
    /// Atraso médio previsto pelo LP
    pub predicted_delay: f64,
}

/// Busca da melhor política sobre eta em [0, 1]
#[derive(Debug)]
pub struct RangedPolicyFinder<'a, S: LpSolver> {
    config: &'a DeviceConfig,
    solver: &'a S,
    chain: MarkovChain,
    index: StateActionIndex,
    table: TransitionTable,
}

impl<'a, S: LpSolver> RangedPolicyFinder<'a, S> {
    /// Constrói cadeia, índice e tabela uma única vez
    pub fn new(config: &'a DeviceConfig, solver: &'a S) -> LpResult<Self> {
        let chain = MarkovChain::build(config)?;
        let index = StateActionIndex::new(&chain);
        let table = TransitionTable::new(&chain, &index);
        Ok(Self {
            config,
            solver,
            chain,
            index,
            table,
        })
    }

    /// Cadeia compartilhada pela varredura
    pub fn chain(&self) -> &MarkovChain {
        &self.chain
    }

    /// Bijeção de colunas compartilhada
    pub fn index(&self) -> &StateActionIndex {
        &self.index
    }

    /// Tabela de frações compartilhada
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Limite de efetividade: pior caso de espera mais o pior serviço
    fn effectiveness_bound(&self) -> f64 {
        let worst_wait = (self.config.queue_capacity * self.config.num_queues()) as f64
            / self.config.total_arrival_rate();
        let worst_service = self
            .config
            .local_service_estimate()
            .max(self.config.cloud_service_estimate());
        worst_wait + worst_service + 1.0
    }

    /// Varre eta e devolve a melhor amostra efetiva
    ///
    /// Amostras inviáveis ou ilimitadas são puladas; a varredura esgotada sem
    /// amostra efetiva devolve [`LpError::NoEffectivePolicy`].
    pub fn find(&self, samples: usize) -> LpResult<RangedSearchOutcome> {
        assert!(samples >= 1, "eta sweep needs at least one sample");
        let builder = LpModelBuilder::new(&self.index, &self.table, self.config);
        let bound = self.effectiveness_bound();

        let mut best: Option<RangedSearchOutcome> = None;
        for sample in 0..samples {
            let eta = if samples == 1 {
                self.config.eta
            } else {
                sample as f64 / (samples - 1) as f64
            };
            let solution = match self.solver.solve(&builder.build(eta)) {
                Ok(solution) => solution,
                Err(LpError::Infeasible | LpError::Unbounded) => continue,
                Err(error) => return Err(error),
            };

            let predicted_delay = solution.objective_value;
            let effective =
                predicted_delay.is_finite() && predicted_delay >= 0.0 && predicted_delay <= bound;
            if !effective {
                continue;
            }
            if best
                .as_ref()
                .is_none_or(|current| predicted_delay < current.predicted_delay)
            {
                best = Some(RangedSearchOutcome {
                    policy: StochasticPolicy::extract(&solution, &self.index),
                    eta,
                    predicted_delay,
                });
            }
        }
        best.ok_or(LpError::NoEffectivePolicy { samples })
    }
}
