//! Canonical lowering for RPAL trees.
//!
//! Two passes sit between the front end and the CSE machine:
//!
//! ```text
//! tree → **standardize** → **generate** → DeltaTable → rpal_eval
//! ```
//!
//! 1. **Standardizing** (`standardize`) rewrites the sugared constructs
//!    (`let`, `where`, `within`, `rec`, `function_form`, `and`, `@` and
//!    multi-variable `lambda`) into `gamma`/`lambda`/`tau`/`->` form.
//!
//! 2. **Generation** (`generate`) flattens the standardized tree into the
//!    numbered control structures the machine executes. Lambda bodies and
//!    conditional branches each get their own delta; numbering is a single
//!    depth-first, left-to-right counter, so the same tree always yields the
//!    same table.

mod generate;
mod standardize;

pub use generate::{generate, GenerationError};
pub use standardize::{standardize, StandardizeError};
