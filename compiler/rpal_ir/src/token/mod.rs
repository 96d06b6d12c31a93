//! Control tokens: the instruction set of the CSE machine.
//!
//! The generator flattens a standardized tree into sequences of these
//! tokens; the machine consumes them from the tail of its control sequence.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::Name;

/// Index of a control structure in the delta table.
///
/// `delta0` is always the program root.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct DeltaId(u32);

impl DeltaId {
    /// The program root.
    pub const ROOT: DeltaId = DeltaId(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        DeltaId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeltaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "delta{}", self.0)
    }
}

/// Identifier of an environment created by the machine.
///
/// Ids are handed out by a monotonic counter; `e0` is the permanent root.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct EnvId(u64);

impl EnvId {
    /// The root environment.
    pub const ROOT: EnvId = EnvId(0);

    #[inline]
    pub const fn new(raw: u64) -> Self {
        EnvId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Literal constants that appear as tree leaves.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Bool(bool),
    Nil,
    Dummy,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) => write!(f, "{x}"),
            Literal::Str(s) => write!(f, "'{s}'"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Nil => f.write_str("nil"),
            Literal::Dummy => f.write_str("dummy"),
        }
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Pow,

    // Comparison
    Gr,
    Ge,
    Ls,
    Le,
    Eq,
    Ne,

    // Logical
    Or,
    And,

    // Tuples
    Aug,
}

impl BinaryOp {
    /// Recognize an operator tag. Front ends spell comparisons either as
    /// keywords (`gr`) or symbols (`>`); both map to the same operator.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let op = match tag {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "**" => Self::Pow,
            "gr" | ">" => Self::Gr,
            "ge" | ">=" => Self::Ge,
            "ls" | "<" => Self::Ls,
            "le" | "<=" => Self::Le,
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "or" => Self::Or,
            "&" => Self::And,
            "aug" => Self::Aug,
            _ => return None,
        };
        Some(op)
    }

    /// The canonical spelling, as it appears in standardized trees.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
            Self::Gr => "gr",
            Self::Ge => "ge",
            Self::Ls => "ls",
            Self::Le => "le",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Or => "or",
            Self::And => "&",
            Self::Aug => "aug",
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "neg" => Some(Self::Neg),
            "not" => Some(Self::Not),
            _ => None,
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Not => "not",
        }
    }
}

/// An operator token, unary or binary.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Operator {
    /// Unary spellings win: `not` is only ever unary.
    pub fn from_tag(tag: &str) -> Option<Self> {
        UnaryOp::from_tag(tag)
            .map(Operator::Unary)
            .or_else(|| BinaryOp::from_tag(tag).map(Operator::Binary))
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Operator::Unary(op) => op.as_symbol(),
            Operator::Binary(op) => op.as_symbol(),
        }
    }
}

/// Lambda parameter names. Almost every lambda binds one or two names.
pub type Params = SmallVec<[Name; 2]>;

/// One instruction of a control structure.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlToken {
    /// Push a constant.
    Literal(Literal),
    /// Resolve a name in the current environment.
    Identifier(Name),
    /// Apply a primitive operator to the top of the stack.
    Operator(Operator),
    /// Build a closure over the current environment.
    Lambda { delta: DeltaId, params: Params },
    /// Splice another control structure into the control sequence.
    DeltaRef(DeltaId),
    /// Select one of the two preceding delta references (`beta`).
    Conditional,
    /// Collect the given number of stack values into a tuple.
    Tau(usize),
    /// Scope exit for the environment with this id.
    Environment(EnvId),
    /// Application.
    Gamma,
    /// The fixed-point combinator `Y*`.
    FixedPoint,
}

impl fmt::Display for ControlToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlToken::Literal(lit) => write!(f, "{lit}"),
            ControlToken::Identifier(name) => write!(f, "{name}"),
            ControlToken::Operator(op) => f.write_str(op.as_symbol()),
            ControlToken::Lambda { delta, params } => {
                write!(f, "lambda{}:", delta.raw())?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{param}")?;
                }
                Ok(())
            }
            ControlToken::DeltaRef(delta) => write!(f, "{delta}"),
            ControlToken::Conditional => f.write_str("beta"),
            ControlToken::Tau(arity) => write!(f, "tau{arity}"),
            ControlToken::Environment(env) => write!(f, "{env}"),
            ControlToken::Gamma => f.write_str("gamma"),
            ControlToken::FixedPoint => f.write_str("Y*"),
        }
    }
}

#[cfg(test)]
mod tests;
