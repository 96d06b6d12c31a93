//! RPAL IR - data structures shared by every stage of the interpreter.
//!
//! This crate contains:
//! - `Node`: the tag + ordered-children tree exchanged with the front end,
//!   and its dot-indented text form
//! - `Name`: cheap-to-clone identifier names
//! - `ControlToken` and the operator enums the generator emits
//! - `DeltaTable`: the numbered control structures the machine executes
//! - `ensure_sufficient_stack` for the recursive tree walks
//!
//! # Pipeline Position
//!
//! ```text
//! tree text → Node → standardize → generate → DeltaTable → CSE machine
//! ```

mod delta;
mod name;
mod stack;
mod token;
mod tree;

pub use delta::{DeltaError, DeltaTable, DeltaTableBuilder};
pub use name::Name;
pub use stack::ensure_sufficient_stack;
pub use token::{BinaryOp, ControlToken, DeltaId, EnvId, Literal, Operator, Params, UnaryOp};
pub use tree::{parse_tree, Node, TreeError};
