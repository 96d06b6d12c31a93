//! `MachineBuilder` for creating machines with non-default configuration.

use rpal_ir::DeltaTable;

use super::Machine;
use crate::config::{LookupMode, MachineConfig};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for `Machine`.
///
/// Defaults: lenient lookup, no per-step trace, a step limit of
/// `DEFAULT_STEP_LIMIT` and `Print` output on stdout.
pub struct MachineBuilder {
    deltas: DeltaTable,
    config: MachineConfig,
    print_handler: Option<SharedPrintHandler>,
}

impl MachineBuilder {
    pub fn new(deltas: DeltaTable) -> Self {
        MachineBuilder {
            deltas,
            config: MachineConfig::default(),
            print_handler: None,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn step_limit(mut self, limit: u64) -> Self {
        self.config.step_limit = limit;
        self
    }

    #[must_use]
    pub fn lookup(mut self, mode: LookupMode) -> Self {
        self.config.lookup = mode;
        self
    }

    #[must_use]
    pub fn trace(mut self, trace: bool) -> Self {
        self.config.trace = trace;
        self
    }

    /// Where `Print` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Machine {
        Machine::with_parts(
            self.deltas,
            self.config,
            self.print_handler.unwrap_or_else(stdout_handler),
        )
    }
}
