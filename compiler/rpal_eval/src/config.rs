//! Machine configuration.

/// Step ceiling used when none is configured.
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// What an identifier bound nowhere evaluates to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LookupMode {
    /// The identifier's own name, as a string.
    #[default]
    Lenient,
    /// A fatal `UnboundIdentifier` error.
    Strict,
}

impl LookupMode {
    #[inline]
    pub fn falls_back_to_literal(self) -> bool {
        matches!(self, Self::Lenient)
    }
}

/// Knobs for one machine run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// Maximum number of steps before `run` gives up with `NonTermination`.
    pub step_limit: u64,
    pub lookup: LookupMode,
    /// Emit a TRACE event for every step.
    pub trace: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            step_limit: DEFAULT_STEP_LIMIT,
            lookup: LookupMode::default(),
            trace: false,
        }
    }
}
