//! # ODS-Sim — Simulador de Eventos Discretos
//!
//! Validação independente das políticas de descarga: executa o dispositivo
//! slot a slot sob uma política qualquer e agrega um relatório de atraso,
//! potência e perdas comparável ao atraso previsto pelo LP.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 run_batch (threads)              │
//! │  ┌────────────────────────────────────────────┐  │
//! │  │  Simulator (laço de 5 passos por slot)     │  │
//! │  │    OffloadPolicy (trait)                   │  │
//! │  │      <- baselines | StochasticOffloadPolicy│  │
//! │  └────────────────────────────────────────────┘  │
//! │  ┌────────────────────────────────────────────┐  │
//! │  │  EventLog -> SimulationReport              │  │
//! │  └────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```ignore
//! use ods_core::prelude::*;
//! use ods_sim::{LocalOnly, Simulator};
//!
//! let config = DeviceConfig::single_queue(4, 1, 2, 0.3, 0.6);
//! let simulator = Simulator::new(config, 100_000, 7)?;
//! let report = simulator.run(&mut LocalOnly)?;
//! println!("delay = {}", report.average_delay);
//! ```

pub mod baseline;
pub mod batch;
pub mod error;
pub mod events;
pub mod policy;
pub mod simulator;

pub use baseline::{GreedyLocalFirst, GreedyOffloadFirst, LocalOnly, OffloadOnly};
pub use batch::{run_batch, PolicyKind, SimulationJob};
pub use error::{SimError, SimResult};
pub use events::{EventKind, EventLog, SimulationReport, TaskEvent, TaskId};
pub use policy::{ExecutionState, OffloadPolicy, StochasticOffloadPolicy};
pub use simulator::Simulator;
