//! Montagem do LP em forma padrão
//!
//! Uma coluna por par (estado, ação); linhas em ordem fixa: objetivo,
//! restrição de potência, uma restrição de justiça por fila, uma equação de
//! balanço por estado e a normalização. As partes independentes de eta são
//! pré-computadas uma vez e reutilizadas ao longo da varredura.

use ods_chain::{StateActionIndex, TransitionTable};
use ods_core::prelude::*;

use crate::solver::{LpProblem, LpRow, RowType};

/// Construtor do problema, com cache das linhas independentes de eta
#[derive(Debug, Clone)]
pub struct LpModelBuilder<'a> {
    config: &'a DeviceConfig,
    index: &'a StateActionIndex,
    objective_coefficients: Vec<f64>,
    power_row: LpRow,
    local_dispatch: Vec<Vec<f64>>,
    tu_dispatch: Vec<Vec<f64>>,
    balance_rows: Vec<LpRow>,
    normalization_row: LpRow,
    fixed_zero_columns: Vec<usize>,
}

impl<'a> LpModelBuilder<'a> {
    /// Pré-computa objetivo, potência, indicadores de despacho e balanço
    pub fn new(
        index: &'a StateActionIndex,
        table: &'a TransitionTable,
        config: &'a DeviceConfig,
    ) -> Self {
        let columns = index.num_columns();
        let num_queues = config.num_queues();
        let lambda = config.total_arrival_rate();
        let assignment = SymbolAssignment::from_config(config);

        let mut objective_coefficients = vec![0.0; columns];
        let mut power = vec![0.0; columns];
        let mut local_dispatch = vec![vec![0.0; columns]; num_queues];
        let mut tu_dispatch = vec![vec![0.0; columns]; num_queues];
        let mut balance = vec![vec![0.0; columns]; index.num_states()];
        let mut fixed_zero_columns = Vec::new();

        for (state_index, state) in index.states().iter().enumerate() {
            let tasks = state.total_tasks() as f64 / lambda;
            for order in 0..index.action_count() {
                let action = Action::from_order_index(order, num_queues);
                let column = index.column_of(state_index, order);
                objective_coefficients[column] = tasks;

                if !state.is_action_possible(&action) {
                    fixed_zero_columns.push(column);
                    continue;
                }

                // Potência esperada por slot do par (estado, ação)
                let cpu_draws = !state.is_cpu_idle() || action.cpu_queue().is_some();
                let tu_draws = !state.is_tu_idle()
                    || (action.tu_queue().is_some() && config.tu_packets > 0);
                if cpu_draws {
                    power[column] += config.local_power;
                }
                if tu_draws {
                    power[column] += config.departure_rate * config.tx_power;
                }

                // Indicadores de despacho para as linhas de justiça
                if let Some(queue) = action.cpu_queue() {
                    local_dispatch[queue][column] = 1.0;
                }
                if let Some(queue) = action.tu_queue() {
                    tu_dispatch[queue][column] = 1.0;
                }

                // Fluxo de entrada das equações de balanço
                for (dest, probability) in
                    table.resolved_outgoing(state_index, &action, &assignment)
                {
                    balance[dest][column] += probability;
                }
            }
        }

        // Fluxo de saída: -1 nas colunas do próprio estado
        for state_index in 0..index.num_states() {
            for order in 0..index.action_count() {
                balance[state_index][index.column_of(state_index, order)] -= 1.0;
            }
        }

        Self {
            config,
            index,
            objective_coefficients,
            power_row: LpRow {
                coefficients: power,
                rhs: config.power_cap,
                row_type: RowType::LessThan,
            },
            local_dispatch,
            tu_dispatch,
            balance_rows: balance
                .into_iter()
                .map(|coefficients| LpRow {
                    coefficients,
                    rhs: 0.0,
                    row_type: RowType::Equality,
                })
                .collect(),
            normalization_row: LpRow {
                coefficients: vec![1.0; columns],
                rhs: 1.0,
                row_type: RowType::Equality,
            },
            fixed_zero_columns,
        }
    }

    /// Número de linhas do problema gerado: 2 + filas + estados + 1
    pub fn num_rows(&self) -> usize {
        2 + self.config.num_queues() + self.index.num_states() + 1
    }

    /// Colunas de pares (estado, ação) ilegais
    pub fn fixed_zero_columns(&self) -> &[usize] {
        &self.fixed_zero_columns
    }

    /// Monta o problema completo para um valor de eta
    pub fn build(&self, eta: f64) -> LpProblem {
        let mut rows = Vec::with_capacity(self.num_rows());

        rows.push(LpRow {
            coefficients: self.objective_coefficients.clone(),
            rhs: -self.config.expected_task_time(eta),
            row_type: RowType::Objective,
        });
        rows.push(self.power_row.clone());

        // Justiça por fila: (1 - eta) local - eta rádio = 0
        for queue in 0..self.config.num_queues() {
            let coefficients = self.local_dispatch[queue]
                .iter()
                .zip(&self.tu_dispatch[queue])
                .map(|(&local, &tu)| (1.0 - eta) * local - eta * tu)
                .collect();
            rows.push(LpRow {
                coefficients,
                rhs: 0.0,
                row_type: RowType::Equality,
            });
        }

        rows.extend(self.balance_rows.iter().cloned());
        rows.push(self.normalization_row.clone());

        LpProblem {
            num_columns: self.index.num_columns(),
            rows,
            fixed_zero_columns: self.fixed_zero_columns.clone(),
        }
    }
}
