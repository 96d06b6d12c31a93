//! Fatal machine errors.
//!
//! Recoverable failures (bad operands, division by zero, out-of-range
//! indexing) are ordinary values and never show up here.

use rpal_ir::{DeltaId, EnvId, Name};

/// A condition that stops the machine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MachineError {
    #[error("step limit of {limit} exceeded; the program may not terminate")]
    NonTermination { limit: u64 },
    #[error("control exhausted with an empty stack")]
    NoResult,
    #[error("unbound identifier `{name}`")]
    UnboundIdentifier { name: Name },
    #[error("malformed machine state: {0}")]
    Malformed(#[from] Malformed),
}

/// Machine states that well-formed control structures never produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("stack underflow executing `{token}`")]
    StackUnderflow { token: &'static str },
    #[error("scope marker {0} is not on the stack")]
    MissingScope(EnvId),
    #[error("`beta` is not preceded by two delta references")]
    DanglingConditional,
    #[error("{0} is not in the delta table")]
    UnknownDelta(DeltaId),
}
