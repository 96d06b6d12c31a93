//! Primitive functions reachable by name.
//!
//! A primitive is applied to one argument per `gamma`. `Conc` takes two, so
//! its first application returns a partially applied builtin holding the
//! first argument. Every primitive is total: bad arguments produce a value
//! (usually an empty string or an error value), never a machine error.

use std::fmt;
use std::rc::Rc;

use crate::print_handler::PrintHandler;
use crate::Value;

/// The named primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Write the argument as one line, then return it.
    Print,
    /// Tuple length; `nil` has order 0 and any other value order 1.
    Order,
    /// First character of a string.
    Stem,
    /// A string without its first character.
    Stern,
    /// String concatenation of two (rendered) values.
    Conc,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "Print" => Self::Print,
            "Order" => Self::Order,
            "Stem" => Self::Stem,
            "Stern" => Self::Stern,
            "Conc" => Self::Conc,
            _ => return None,
        };
        Some(primitive)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Print => "Print",
            Self::Order => "Order",
            Self::Stem => "Stem",
            Self::Stern => "Stern",
            Self::Conc => "Conc",
        }
    }
}

/// A primitive together with the arguments it has received so far.
#[derive(Clone, Debug, PartialEq)]
pub struct Builtin {
    primitive: Primitive,
    applied: Option<Rc<Value>>,
}

impl Builtin {
    pub fn new(primitive: Primitive) -> Self {
        Builtin {
            primitive,
            applied: None,
        }
    }

    /// The builtin a name refers to, if any.
    pub fn named(name: &str) -> Option<Self> {
        Primitive::from_name(name).map(Self::new)
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    /// Apply to one more argument.
    pub fn apply(&self, argument: Value, print: &PrintHandler) -> Value {
        match (self.primitive, &self.applied) {
            (Primitive::Print, _) => {
                print.println(&argument.to_string());
                argument
            }
            (Primitive::Order, _) => order(&argument),
            (Primitive::Stem, _) => stem(&argument),
            (Primitive::Stern, _) => stern(&argument),
            (Primitive::Conc, None) => Value::Builtin(Builtin {
                primitive: Primitive::Conc,
                applied: Some(Rc::new(argument)),
            }),
            (Primitive::Conc, Some(first)) => Value::str(format!("{first}{argument}")),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.applied {
            None => f.write_str(self.primitive.name()),
            Some(first) => write!(f, "{} {first}", self.primitive.name()),
        }
    }
}

fn order(value: &Value) -> Value {
    match value {
        Value::Tuple(elements) => Value::Int(i64::try_from(elements.len()).unwrap_or(i64::MAX)),
        Value::Nil => Value::Int(0),
        _ => Value::Int(1),
    }
}

fn stem(value: &Value) -> Value {
    match value {
        Value::Str(s) => Value::str(s.chars().next().map(String::from).unwrap_or_default()),
        _ => Value::str(""),
    }
}

fn stern(value: &Value) -> Value {
    match value {
        Value::Str(s) => {
            let mut chars = s.chars();
            chars.next();
            Value::str(chars.as_str())
        }
        _ => Value::str(""),
    }
}

#[cfg(test)]
mod tests;
