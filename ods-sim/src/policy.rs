//! Interface de política de descarga
//!
//! A política só enxerga o estado observável da execução; quem aplica a
//! decisão e mantém o relógio é o simulador.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use ods_core::prelude::*;
use ods_lp::StochasticPolicy;

/// Estado observável pela política a cada slot
#[derive(Debug, Clone)]
pub struct ExecutionState {
    /// Estado do dispositivo no início do slot
    pub state: DeviceState,
    /// Slot corrente (conta a partir de zero)
    pub slot: u64,
    /// Potência acumulada nos slots anteriores
    pub cumulative_power: f64,
}

impl ExecutionState {
    /// Potência média por slot até aqui
    pub fn average_power(&self) -> f64 {
        if self.slot == 0 {
            0.0
        } else {
            self.cumulative_power / self.slot as f64
        }
    }
}

/// Política de descarga consultada uma vez por slot
pub trait OffloadPolicy {
    /// Nome curto para relatórios
    fn name(&self) -> &'static str;

    /// Escolhe uma ação legal para o estado corrente
    fn decide(&mut self, execution: &ExecutionState) -> Action;
}

/// Política estocástica sintetizada pelo LP, com gerador semeado
#[derive(Debug, Clone)]
pub struct StochasticOffloadPolicy {
    policy: StochasticPolicy,
    rng: SmallRng,
}

impl StochasticOffloadPolicy {
    /// Envolve uma política condicional com um gerador reprodutível
    pub fn new(policy: StochasticPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl OffloadPolicy for StochasticOffloadPolicy {
    fn name(&self) -> &'static str {
        "lp-stochastic"
    }

    fn decide(&mut self, execution: &ExecutionState) -> Action {
        self.policy.sample(&execution.state, self.rng.gen_range(0.0..1.0))
    }
}
