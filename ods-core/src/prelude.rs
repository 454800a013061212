//! # Prelude — Re-exportações Convenientes
//!
//! Importação única para usar o ODS-Core:
//!
//! ```
//! use ods_core::prelude::*;
//! ```

pub use crate::action::Action;
pub use crate::config::DeviceConfig;
pub use crate::error::{CoreError, CoreResult};
pub use crate::state::{DeviceState, CPU_PHASE_ADMITTED};
pub use crate::symbol::{Symbol, SymbolAssignment, SymbolProduct};
