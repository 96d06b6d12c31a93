//! The CSE machine.
//!
//! Three pieces of state: the control sequence (consumed from its tail), the
//! value stack, and the environment store. Every `step` pops one control
//! token and performs exactly one transition:
//!
//! | Token | Transition |
//! |---|---|
//! | literal | push its value |
//! | identifier | push its binding in the current environment |
//! | `lambda<k>:x` | push a closure over the current environment |
//! | `delta<k>` | append delta `k` to the control tail |
//! | `beta` | pop a truth value, keep one of the two preceding delta refs |
//! | `tau<n>` | pop `n` values into a tuple |
//! | `gamma` | apply the value on top of the stack (see `apply`) |
//! | `e<k>` | leave scope `k`: drop its marker from the stack |
//! | operator | pop operands, push the result |
//! | `Y*` | push the fixed-point operator |
//!
//! The current environment is the one named by the topmost scope marker on
//! the stack.

mod apply;
mod builder;

use std::fmt;
use std::rc::Rc;

use rpal_ir::{ControlToken, DeltaId, DeltaTable, EnvId, Name, Operator};

use crate::builtins::Builtin;
use crate::config::MachineConfig;
use crate::environment::{Env, Environments};
use crate::errors::{Malformed, MachineError};
use crate::operators::evaluate_binary;
use crate::print_handler::SharedPrintHandler;
use crate::unary_operators::evaluate_unary;
use crate::{Closure, Value};

pub use apply::{bind_parameters, Bindings};
pub use builder::MachineBuilder;

/// A CSE machine loaded with one program.
pub struct Machine {
    deltas: DeltaTable,
    control: Vec<ControlToken>,
    stack: Vec<Value>,
    environments: Environments,
    print: SharedPrintHandler,
    config: MachineConfig,
    steps: u64,
}

impl Machine {
    /// A machine with the default configuration, printing to stdout.
    pub fn new(deltas: DeltaTable) -> Self {
        MachineBuilder::new(deltas).build()
    }

    pub fn builder(deltas: DeltaTable) -> MachineBuilder {
        MachineBuilder::new(deltas)
    }

    fn with_parts(deltas: DeltaTable, config: MachineConfig, print: SharedPrintHandler) -> Self {
        let environments = Environments::new();
        let root = environments.root().clone();
        Machine {
            deltas,
            control: vec![
                ControlToken::Environment(EnvId::ROOT),
                ControlToken::DeltaRef(DeltaId::ROOT),
            ],
            stack: vec![Value::Env(root)],
            environments,
            print,
            config,
            steps: 0,
        }
    }

    /// Execute one control token.
    ///
    /// Returns `false` without doing anything once control is empty.
    pub fn step(&mut self) -> Result<bool, MachineError> {
        let Some(token) = self.control.pop() else {
            return Ok(false);
        };
        self.steps += 1;
        if self.config.trace {
            tracing::trace!(
                step = self.steps,
                %token,
                stack = %Listing(&self.stack),
                control = %Listing(&self.control),
                "step"
            );
        }
        self.execute(token)?;
        Ok(true)
    }

    /// Run until control is empty and return the value left on top of the
    /// stack.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> Result<Value, MachineError> {
        while !self.control.is_empty() {
            if self.steps >= self.config.step_limit {
                tracing::debug!(limit = self.config.step_limit, "step limit reached");
                return Err(MachineError::NonTermination {
                    limit: self.config.step_limit,
                });
            }
            self.step()?;
        }
        tracing::debug!(
            steps = self.steps,
            environments = self.environments.created(),
            "machine halted"
        );
        self.stack.last().cloned().ok_or(MachineError::NoResult)
    }

    fn execute(&mut self, token: ControlToken) -> Result<(), MachineError> {
        match token {
            ControlToken::Literal(literal) => self.stack.push(Value::from(&literal)),
            ControlToken::Identifier(name) => {
                let value = self.resolve(name)?;
                self.stack.push(value);
            }
            ControlToken::Operator(Operator::Unary(op)) => {
                let operand = self.pop(op.as_symbol())?;
                self.stack.push(evaluate_unary(operand, op));
            }
            ControlToken::Operator(Operator::Binary(op)) => {
                let left = self.pop(op.as_symbol())?;
                let right = self.pop(op.as_symbol())?;
                self.stack.push(evaluate_binary(left, right, op));
            }
            ControlToken::Lambda { delta, params } => {
                let env = self.current_environment().clone();
                self.stack
                    .push(Value::Closure(Rc::new(Closure { env, delta, params })));
            }
            ControlToken::DeltaRef(delta) => self.expand(delta)?,
            ControlToken::Conditional => self.branch()?,
            ControlToken::Tau(arity) => self.collect_tuple(arity)?,
            ControlToken::Environment(id) => self.exit_scope(id)?,
            ControlToken::Gamma => self.apply()?,
            ControlToken::FixedPoint => self.stack.push(Value::FixedPointOperator),
        }
        Ok(())
    }

    /// Environment binding, then builtin, then the lookup-mode fallback.
    fn resolve(&self, name: Name) -> Result<Value, MachineError> {
        if let Some(value) = self.current_environment().lookup(&name) {
            return Ok(value.clone());
        }
        if let Some(builtin) = Builtin::named(&name) {
            return Ok(Value::Builtin(builtin));
        }
        if self.config.lookup.falls_back_to_literal() {
            Ok(Value::str(name.as_str()))
        } else {
            Err(MachineError::UnboundIdentifier { name })
        }
    }

    fn expand(&mut self, delta: DeltaId) -> Result<(), MachineError> {
        let tokens = self
            .deltas
            .get(delta)
            .ok_or(Malformed::UnknownDelta(delta))?;
        self.control.extend_from_slice(tokens);
        Ok(())
    }

    /// `delta<t> delta<f> beta`: the ref nearest the tail is the false
    /// branch.
    fn branch(&mut self) -> Result<(), MachineError> {
        let condition = self.pop("beta")?;
        let (Some(ControlToken::DeltaRef(else_delta)), Some(ControlToken::DeltaRef(then_delta))) =
            (self.control.pop(), self.control.pop())
        else {
            return Err(Malformed::DanglingConditional.into());
        };
        self.expand(if condition.is_truthy() {
            then_delta
        } else {
            else_delta
        })
    }

    /// Pop `arity` values (setting scope markers aside) into one tuple.
    fn collect_tuple(&mut self, arity: usize) -> Result<(), MachineError> {
        let mut elements = Vec::with_capacity(arity);
        let mut markers = Vec::new();
        while elements.len() < arity {
            match self.stack.pop() {
                Some(Value::Env(env)) => markers.push(env),
                Some(value) => elements.push(value),
                None => return Err(Malformed::StackUnderflow { token: "tau" }.into()),
            }
        }
        self.stack.extend(markers.into_iter().rev().map(Value::Env));
        self.stack.push(Value::tuple_indexed(elements));
        Ok(())
    }

    /// Drop the scope marker for `id`, keeping everything above it.
    fn exit_scope(&mut self, id: EnvId) -> Result<(), MachineError> {
        let position = self
            .stack
            .iter()
            .rposition(|value| matches!(value, Value::Env(env) if env.id() == id))
            .ok_or(Malformed::MissingScope(id))?;
        self.stack.remove(position);
        Ok(())
    }

    fn pop(&mut self, token: &'static str) -> Result<Value, MachineError> {
        self.stack
            .pop()
            .ok_or_else(|| Malformed::StackUnderflow { token }.into())
    }

    /// The environment of the topmost scope marker on the stack.
    pub fn current_environment(&self) -> &Env {
        self.stack
            .iter()
            .rev()
            .find_map(|value| match value {
                Value::Env(env) => Some(env),
                _ => None,
            })
            .unwrap_or(self.environments.root())
    }

    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Pending control tokens; the last one runs next.
    pub fn control(&self) -> &[ControlToken] {
        &self.control
    }

    pub fn environments(&self) -> &Environments {
        &self.environments
    }

    pub fn deltas(&self) -> &DeltaTable {
        &self.deltas
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Steps executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

/// Space-separated rendering of a stack or control sequence.
struct Listing<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for Listing<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}
