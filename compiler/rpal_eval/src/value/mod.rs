//! Runtime values of the CSE machine.
//!
//! Everything the machine can hold on its stack or bind in an environment,
//! including the environment markers themselves.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rpal_ir::{ensure_sufficient_stack, DeltaId, Literal, Params};

use crate::builtins::Builtin;
use crate::environment::Env;

/// A function value: the environment it closes over, the control structure
/// holding its body and the names it binds.
#[derive(Clone, Debug)]
pub struct Closure {
    pub env: Env,
    pub delta: DeltaId,
    pub params: Params,
}

impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        self.env.id() == other.env.id() && self.delta == other.delta && self.params == other.params
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.params.join(","))?;
        write!(f, ": {}", self.delta.raw())
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Bool(bool),
    Nil,
    Dummy,
    /// Elements in construction order. Indexing and display run over the
    /// reverse of this order.
    Tuple(Rc<Elements>),
    Closure(Rc<Closure>),
    /// A closure that went through `Y*`. Applying it re-applies the inner
    /// closure to the wrapper itself.
    FixedPoint(Rc<Closure>),
    /// The `Y*` combinator, before it has been applied.
    FixedPointOperator,
    Builtin(Builtin),
    /// Scope marker left on the stack while a closure body runs.
    Env(Env),
    /// Non-fatal failure (bad operands, division by zero, ...).
    Error(Rc<str>),
}

/// Tuple storage, in construction order.
///
/// Tuples nest without bound (a list built by recursion is one tuple per
/// element), so dropping, comparing and formatting them grow the stack as
/// they descend.
pub struct Elements(Box<[Value]>);

impl Elements {
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl Deref for Elements {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for Elements {
    fn from(elements: Vec<Value>) -> Self {
        Elements(elements.into_boxed_slice())
    }
}

impl FromIterator<Value> for Elements {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Elements(iter.into_iter().collect())
    }
}

impl PartialEq for Elements {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.0 == other.0)
    }
}

impl fmt::Debug for Elements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| f.debug_list().entries(self.0.iter()).finish())
    }
}

impl Drop for Elements {
    fn drop(&mut self) {
        let elements = std::mem::take(&mut self.0);
        ensure_sufficient_stack(move || drop(elements));
    }
}

/// A value read as a number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn str(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    pub fn error(message: impl Into<Rc<str>>) -> Self {
        Value::Error(message.into())
    }

    /// Build a tuple from elements in construction order.
    pub fn tuple(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(Rc::new(elements.into_iter().collect()))
    }

    /// Build a tuple whose index 1 is the first element yielded.
    pub fn tuple_indexed(elements: impl IntoIterator<Item = Value>) -> Self {
        let mut elements: Vec<Value> = elements.into_iter().collect();
        elements.reverse();
        Value::Tuple(Rc::new(elements.into()))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Short name of the value's kind, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "truthvalue",
            Value::Nil => "nil",
            Value::Dummy => "dummy",
            Value::Tuple(_) => "tuple",
            Value::Closure(_) => "function",
            Value::FixedPoint(_) => "recursive function",
            Value::FixedPointOperator => "Y*",
            Value::Builtin(_) => "builtin",
            Value::Env(_) => "environment",
            Value::Error(_) => "error",
        }
    }

    /// Numeric reading of a value.
    ///
    /// Strings made of digits (optionally after one `-`) read as integers;
    /// other strings that parse as decimals read as floats. Everything else
    /// is not a number.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(x) => Some(Number::Float(*x)),
            Value::Str(s) => parse_number(s),
            _ => None,
        }
    }

    /// Truth value used by conditionals and the logical operators.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => {
                ["true", "1", "yes"]
                    .iter()
                    .any(|word| s.eq_ignore_ascii_case(word))
                    || matches!(parse_number(s), Some(n) if !n.is_zero())
            }
            _ => false,
        }
    }

    /// Tuple elements in index order (index 1 first).
    pub fn indexed_elements(elements: &[Value]) -> impl Iterator<Item = &Value> {
        elements.iter().rev()
    }
}

impl Number {
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(x) => x == 0.0,
        }
    }
}

fn parse_number(text: &str) -> Option<Number> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::Int(n));
        }
    }
    // `f64::from_str` also accepts `inf` and `NaN`; only decimal text counts.
    if digits.bytes().any(|b| b.is_ascii_digit()) {
        return text.parse::<f64>().ok().map(Number::Float);
    }
    None
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(x) => Value::Float(*x),
            Literal::Str(s) => Value::Str(Rc::clone(s)),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Nil => Value::Nil,
            Literal::Dummy => Value::Dummy,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) | (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil)
            | (Value::Dummy, Value::Dummy)
            | (Value::FixedPointOperator, Value::FixedPointOperator) => true,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) | (Value::FixedPoint(a), Value::FixedPoint(b)) => {
                a == b
            }
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Env(a), Value::Env(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Nil => f.write_str("nil"),
            Value::Dummy => f.write_str("dummy"),
            Value::Tuple(elements) => ensure_sufficient_stack(|| {
                f.write_str("(")?;
                for (i, element) in Value::indexed_elements(elements).enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }),
            Value::Closure(closure) => write!(f, "[lambda closure: {closure}]"),
            Value::FixedPoint(closure) => write!(f, "[eta closure: {closure}]"),
            Value::FixedPointOperator => f.write_str("Y*"),
            Value::Builtin(builtin) => write!(f, "{builtin}"),
            Value::Env(env) => write!(f, "{}", env.id()),
            Value::Error(message) => write!(f, "<error: {message}>"),
        }
    }
}

#[cfg(test)]
mod tests;
