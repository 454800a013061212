//! Fronteira do solver de LP
//!
//! Contrato estreito matriz-entra/solução-sai: o núcleo valida a entrada
//! localmente, nunca inspeciona o interior do solver e trata qualquer
//! resultado não ótimo como falha dura da tentativa.

use serde::{Deserialize, Serialize};

use crate::error::{LpError, LpResult};

/// Tipo de uma linha do problema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowType {
    /// Linha objetivo (exatamente uma por problema)
    Objective,
    /// Restrição de igualdade
    Equality,
    /// Restrição de menor-ou-igual
    LessThan,
}

/// Linha do problema: vetor denso alinhado ao índice de colunas compartilhado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpRow {
    /// Coeficientes, um por coluna
    pub coefficients: Vec<f64>,
    /// Lado direito
    pub rhs: f64,
    /// Tipo da linha
    pub row_type: RowType,
}

/// Problema em forma padrão
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpProblem {
    /// Número de colunas (pares estado-ação, ilegais incluídos)
    pub num_columns: usize,
    /// Linhas em ordem fixa
    pub rows: Vec<LpRow>,
    /// Colunas de ações ilegais: mantidas na contagem, forçadas a zero
    pub fixed_zero_columns: Vec<usize>,
}

impl LpProblem {
    /// Rejeita entrada malformada antes de chamar o adaptador
    pub fn validate(&self) -> LpResult<()> {
        for (row, data) in self.rows.iter().enumerate() {
            if data.coefficients.len() != self.num_columns {
                return Err(LpError::RowLengthMismatch {
                    row,
                    got: data.coefficients.len(),
                    expected: self.num_columns,
                });
            }
        }
        let objectives = self
            .rows
            .iter()
            .filter(|r| r.row_type == RowType::Objective)
            .count();
        if objectives != 1 {
            return Err(LpError::ObjectiveRowCount(objectives));
        }
        if self.rows.len() - objectives == 0 {
            return Err(LpError::NoConstraintRows);
        }
        for &column in &self.fixed_zero_columns {
            if column >= self.num_columns {
                return Err(LpError::FixedColumnOutOfRange { column });
            }
        }
        Ok(())
    }

    /// A única linha objetivo do problema validado
    ///
    /// # Panics
    ///
    /// Aborta se o problema não tiver linha objetivo; chame após `validate`.
    pub fn objective_row(&self) -> &LpRow {
        self.rows
            .iter()
            .find(|r| r.row_type == RowType::Objective)
            .unwrap_or_else(|| panic!("problem has no objective row"))
    }
}

/// Solução ótima do problema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpSolution {
    /// Valor do objetivo já deslocado pelo rhs da linha objetivo
    pub objective_value: f64,
    /// Valor de cada variável, alinhado às colunas
    pub variable_values: Vec<f64>,
}

/// Colaborador externo: resolve um problema em forma padrão
pub trait LpSolver {
    /// Resolve até a otimalidade ou devolve uma falha explícita
    fn solve(&self, problem: &LpProblem) -> LpResult<LpSolution>;
}

/// Adaptador sobre o simplex do minilp
#[derive(Debug, Clone, Copy, Default)]
pub struct MinilpSolver;

impl MinilpSolver {
    /// Cria o adaptador
    pub fn new() -> Self {
        Self
    }
}

impl LpSolver for MinilpSolver {
    fn solve(&self, problem: &LpProblem) -> LpResult<LpSolution> {
        problem.validate()?;
        let objective = problem.objective_row();

        let mut model = minilp::Problem::new(minilp::OptimizationDirection::Minimize);
        let fixed: std::collections::HashSet<usize> =
            problem.fixed_zero_columns.iter().copied().collect();
        let variables: Vec<minilp::Variable> = (0..problem.num_columns)
            .map(|column| {
                let bounds = if fixed.contains(&column) {
                    (0.0, 0.0)
                } else {
                    (0.0, f64::INFINITY)
                };
                model.add_var(objective.coefficients[column], bounds)
            })
            .collect();

        for row in &problem.rows {
            let operator = match row.row_type {
                RowType::Objective => continue,
                RowType::Equality => minilp::ComparisonOp::Eq,
                RowType::LessThan => minilp::ComparisonOp::Le,
            };
            let expression: Vec<(minilp::Variable, f64)> = row
                .coefficients
                .iter()
                .enumerate()
                .filter(|&(_, &coefficient)| coefficient != 0.0)
                .map(|(column, &coefficient)| (variables[column], coefficient))
                .collect();
            model.add_constraint(expression.as_slice(), operator, row.rhs);
        }

        let solution = model.solve().map_err(|error| match error {
            minilp::Error::Infeasible => LpError::Infeasible,
            minilp::Error::Unbounded => LpError::Unbounded,
        })?;

        let variable_values: Vec<f64> = variables.iter().map(|&v| solution[v]).collect();
        // O minilp devolve Ok com objetivo -inf e variáveis infinitas para
        // problemas ilimitados; qualquer valor não finito é falha da tentativa
        if !solution.objective().is_finite()
            || variable_values.iter().any(|v| !v.is_finite())
        {
            return Err(LpError::Unbounded);
        }
        Ok(LpSolution {
            // O rhs da linha objetivo é um deslocamento aditivo
            objective_value: solution.objective() - objective.rhs,
            variable_values,
        })
    }
}
