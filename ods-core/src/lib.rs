//! # ODS-Core — Modelo do Dispositivo
//!
//! Tipos de valor para o dispositivo de descarga de tarefas: configuração
//! validada, estado imutável, ações de agendamento e símbolos de
//! probabilidade.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          DeviceConfig (validada)                │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  DeviceState (imutável, Eq/Hash)          │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Action (conjunto fechado + order index)  │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Symbol / SymbolAssignment                │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! O dispositivo tem N filas limitadas e dois recursos de slot único: a CPU
//! (serviço determinístico em seções) e a unidade de transmissão (serviço de
//! Bernoulli por pacote). Todas as transições são funções puras; cada uma
//! devolve um estado novo.

pub mod action;
pub mod config;
pub mod error;
pub mod prelude;
pub mod state;
pub mod symbol;

pub use action::Action;
pub use config::DeviceConfig;
pub use error::{CoreError, CoreResult};
pub use state::{DeviceState, CPU_PHASE_ADMITTED};
pub use symbol::{Symbol, SymbolAssignment, SymbolProduct};

#[cfg(test)]
mod tests;
