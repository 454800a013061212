//! # ODS-LP — Síntese de Política via Programação Linear
//!
//! Transforma a cadeia e as frações resolvidas em um LP em forma padrão,
//! resolve-o atrás de uma fronteira estreita e extrai a política estocástica
//! ótima, com varredura externa sobre o parâmetro de justiça eta.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          RangedPolicyFinder                     │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  LpModelBuilder (linhas em ordem fixa)    │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  LpSolver (trait) <- MinilpSolver         │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  StochasticPolicy (ocupação normalizada)  │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```ignore
//! use ods_core::prelude::*;
//! use ods_lp::{MinilpSolver, RangedPolicyFinder};
//!
//! let config = DeviceConfig::single_queue(4, 1, 2, 0.3, 0.6);
//! let solver = MinilpSolver::new();
//! let finder = RangedPolicyFinder::new(&config, &solver)?;
//! let outcome = finder.find(11)?;
//! println!("eta = {}, delay = {}", outcome.eta, outcome.predicted_delay);
//! ```

pub mod error;
pub mod model;
pub mod policy;
pub mod search;
pub mod solver;

pub use error::{LpError, LpResult};
pub use model::LpModelBuilder;
pub use policy::{StochasticPolicy, PROBABILITY_TOLERANCE};
pub use search::{RangedPolicyFinder, RangedSearchOutcome};
pub use solver::{LpProblem, LpRow, LpSolution, LpSolver, MinilpSolver, RowType};
