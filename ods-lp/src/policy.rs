//! Política estocástica extraída da solução do LP
//!
//! A ocupação resolvida por (estado, ação) é agrupada por estado e
//! normalizada: P(ação | estado) = ocupação(estado, ação) / total do estado.

use std::collections::HashMap;

use ods_chain::StateActionIndex;
use ods_core::prelude::*;

use crate::solver::LpSolution;

/// Tolerância da verificação de soma unitária por estado
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Abaixo disto o estado é tratado como sem ocupação na solução
const OCCUPANCY_FLOOR: f64 = 1e-9;

/// Massa máxima tolerada em uma coluna ilegal (ruído do solver)
const ILLEGAL_MASS_TOLERANCE: f64 = 1e-7;

/// Distribuição condicional de ações por estado
#[derive(Debug, Clone)]
pub struct StochasticPolicy {
    distributions: HashMap<DeviceState, Vec<(Action, f64)>>,
}

impl StochasticPolicy {
    /// Extrai a política condicional de uma solução ótima
    ///
    /// # Panics
    ///
    /// Aborta quando a solução viola invariantes de programação: contagem de
    /// colunas errada, massa em ação ilegal ou distribuição que não soma 1.
    pub fn extract(solution: &LpSolution, index: &StateActionIndex) -> StochasticPolicy {
        assert_eq!(
            solution.variable_values.len(),
            index.num_columns(),
            "LP solution carries {} values for {} columns",
            solution.variable_values.len(),
            index.num_columns()
        );

        let mut distributions = HashMap::with_capacity(index.num_states());
        for (state_index, state) in index.states().iter().enumerate() {
            let mut occupancies: Vec<(Action, f64)> = Vec::new();
            let mut total = 0.0;
            for order in 0..index.action_count() {
                let action = Action::from_order_index(order, index.num_queues());
                let value =
                    solution.variable_values[index.column_of(state_index, order)].max(0.0);
                if !state.is_action_possible(&action) {
                    assert!(
                        value <= ILLEGAL_MASS_TOLERANCE,
                        "illegal action {action:?} carries occupancy {value} in state {state:?}"
                    );
                    continue;
                }
                occupancies.push((action, value));
                total += value;
            }

            let distribution: Vec<(Action, f64)> = if total <= OCCUPANCY_FLOOR {
                // Estado sem ocupação na solução: NoOp determinístico
                occupancies
                    .into_iter()
                    .map(|(action, _)| (action, if action == Action::NoOp { 1.0 } else { 0.0 }))
                    .collect()
            } else {
                occupancies
                    .into_iter()
                    .map(|(action, value)| (action, value / total))
                    .collect()
            };

            let sum: f64 = distribution.iter().map(|(_, p)| p).sum();
            assert!(
                (sum - 1.0).abs() <= PROBABILITY_TOLERANCE,
                "distribution of {state:?} sums to {sum}"
            );
            distributions.insert(state.clone(), distribution);
        }
        StochasticPolicy { distributions }
    }

    /// Número de estados cobertos
    pub fn num_states(&self) -> usize {
        self.distributions.len()
    }

    /// Distribuição ordenada de um estado, se coberto
    pub fn distribution(&self, state: &DeviceState) -> Option<&[(Action, f64)]> {
        self.distributions.get(state).map(Vec::as_slice)
    }

    /// P(ação | estado); 0 para pares não cobertos
    pub fn probability(&self, state: &DeviceState, action: &Action) -> f64 {
        self.distributions
            .get(state)
            .and_then(|distribution| {
                distribution
                    .iter()
                    .find(|(a, _)| a == action)
                    .map(|&(_, p)| p)
            })
            .unwrap_or(0.0)
    }

    /// Sorteia uma ação com um único uniforme em [0, 1)
    ///
    /// Vetor cumulativo + varredura linear; empate exato em uma fronteira
    /// cai no braço superior.
    ///
    /// # Panics
    ///
    /// Aborta para um estado fora da cobertura da política.
    pub fn sample(&self, state: &DeviceState, uniform: f64) -> Action {
        let distribution = self
            .distributions
            .get(state)
            .unwrap_or_else(|| panic!("state {state:?} is not covered by the policy"));
        let mut cumulative = 0.0;
        for &(action, probability) in distribution {
            cumulative += probability;
            if uniform < cumulative {
                return action;
            }
        }
        // Resíduo numérico no topo do vetor cumulativo
        distribution
            .iter()
            .rev()
            .find(|(_, p)| *p > 0.0)
            .map(|&(action, _)| action)
            .unwrap_or(Action::NoOp)
    }
}
