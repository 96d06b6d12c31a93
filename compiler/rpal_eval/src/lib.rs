//! RPAL Eval - the CSE machine that executes generated control structures.
//!
//! # Architecture
//!
//! - `Machine`: control sequence, value stack and environment store for one
//!   program; `MachineBuilder` configures it
//! - `Value`: the runtime value union, scope markers included
//! - `Environments`: snapshot environments reclaimed by reference counting
//! - `evaluate_binary` / `evaluate_unary`: direct enum dispatch over the
//!   primitive operators
//! - `Builtin`: the named primitives (`Print`, `Order`, `Stem`, `Stern`,
//!   `Conc`)
//! - `PrintHandler`: where `Print` output goes
//!
//! Several machines can run side by side; none of them share state.

mod builtins;
mod config;
mod environment;
mod errors;
mod machine;
mod operators;
mod print_handler;
mod unary_operators;
mod value;

pub use builtins::{Builtin, Primitive};
pub use config::{LookupMode, MachineConfig, DEFAULT_STEP_LIMIT};
pub use environment::{Env, Environments};
pub use errors::{MachineError, Malformed};
pub use machine::{bind_parameters, Bindings, Machine, MachineBuilder};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandler,
    SharedPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{Closure, Elements, Number, Value};

#[cfg(test)]
mod tests;
