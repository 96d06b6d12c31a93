//! RPAL driver: read a tree, standardize it, generate control structures
//! and run them on the CSE machine.
//!
//! ```text
//! tree text → parse_tree → standardize → generate → Machine::run
//! ```

use std::sync::Once;

use rpal_canon::{GenerationError, StandardizeError};
use rpal_eval::{LookupMode, Machine, MachineConfig, MachineError, SharedPrintHandler};
use rpal_ir::{parse_tree, DeltaTable, Node, TreeError};

pub use rpal_eval::{buffer_handler, silent_handler, stdout_handler, Value, DEFAULT_STEP_LIMIT};

/// Any failure between tree text and final value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid tree: {0}")]
    Tree(#[from] TreeError),
    #[error("cannot standardize: {0}")]
    Standardize(#[from] StandardizeError),
    #[error("cannot generate control structures: {0}")]
    Generate(#[from] GenerationError),
    #[error(transparent)]
    Machine(#[from] MachineError),
}

/// Command-line facing knobs for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Unbound identifiers are errors instead of evaluating to their name.
    pub strict: bool,
    pub step_limit: u64,
    /// Log every machine step at TRACE level.
    pub trace: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            strict: false,
            step_limit: DEFAULT_STEP_LIMIT,
            trace: false,
        }
    }
}

impl Options {
    pub fn machine_config(&self) -> MachineConfig {
        MachineConfig {
            step_limit: self.step_limit,
            lookup: if self.strict {
                LookupMode::Strict
            } else {
                LookupMode::Lenient
            },
            trace: self.trace,
        }
    }
}

/// Result of a successful run.
#[derive(Debug)]
pub struct Outcome {
    pub value: Value,
    /// The control structures that were executed.
    pub deltas: DeltaTable,
}

/// Read and standardize a tree.
pub fn standardize_text(text: &str) -> Result<Node, Error> {
    let tree = parse_tree(text)?;
    Ok(rpal_canon::standardize(tree)?)
}

/// Read, standardize and flatten a tree.
pub fn compile(text: &str) -> Result<DeltaTable, Error> {
    let tree = standardize_text(text)?;
    Ok(rpal_canon::generate(&tree)?)
}

/// Run a program given as tree text. `Print` output goes to `print`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run_tree_text(
    text: &str,
    options: &Options,
    print: SharedPrintHandler,
) -> Result<Outcome, Error> {
    let deltas = compile(text)?;
    let mut machine = Machine::builder(deltas.clone())
        .config(options.machine_config())
        .print_handler(print)
        .build();
    let value = machine.run()?;
    if value.is_error() {
        tracing::debug!(steps = machine.steps(), %value, "program finished with an error value");
    } else {
        tracing::debug!(steps = machine.steps(), "program finished");
    }
    Ok(Outcome { value, deltas })
}

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, once.
///
/// `RPAL_LOG` takes an `EnvFilter` directive (`debug`, `rpal_eval=trace`,
/// ...). Without it nothing is installed unless `trace` asks for the
/// per-step machine trace.
pub fn init_tracing(trace: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter = match std::env::var("RPAL_LOG") {
            Ok(_) => EnvFilter::from_env("RPAL_LOG"),
            Err(_) if trace => EnvFilter::new("rpal_eval=trace"),
            Err(_) => return,
        };
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_indent_lines(true),
            )
            .with(filter)
            .init();
    });
}
