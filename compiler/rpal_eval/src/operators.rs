//! Binary operator implementations.
//!
//! Direct enum dispatch over the fixed operator set. Operands that are
//! numeric strings are read as numbers first. Every combination yields a
//! value: type mismatches, overflow and division by zero become
//! `Value::Error` and the machine keeps running.

use std::cmp::Ordering;

use rpal_ir::BinaryOp;

use crate::value::Number;
use crate::Value;

/// Evaluate `left op right`. `left` is the operand that was on top of the
/// stack.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> Value {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Pow => {
            match (left.as_number(), right.as_number()) {
                (Some(a), Some(b)) => arithmetic(a, b, op),
                _ => mismatch(&left, &right, op),
            }
        }
        BinaryOp::Gr | BinaryOp::Ge | BinaryOp::Ls | BinaryOp::Le => match compare(&left, &right) {
            Some(ordering) => Value::Bool(match op {
                BinaryOp::Gr => ordering == Ordering::Greater,
                BinaryOp::Ge => ordering != Ordering::Less,
                BinaryOp::Ls => ordering == Ordering::Less,
                _ => ordering != Ordering::Greater,
            }),
            None => mismatch(&left, &right, op),
        },
        BinaryOp::Eq => Value::Bool(equal(&left, &right)),
        BinaryOp::Ne => Value::Bool(!equal(&left, &right)),
        BinaryOp::Or => Value::Bool(left.is_truthy() || right.is_truthy()),
        BinaryOp::And => Value::Bool(left.is_truthy() && right.is_truthy()),
        BinaryOp::Aug => augment(left, right),
    }
}

fn arithmetic(a: Number, b: Number, op: BinaryOp) -> Value {
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => int_arithmetic(a, b, op),
        (a, b) => float_arithmetic(as_float(a), as_float(b), op),
    }
}

fn int_arithmetic(a: i64, b: i64, op: BinaryOp) -> Value {
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div if b == 0 => return division_by_zero(),
        BinaryOp::Div => a.checked_div(b),
        BinaryOp::Pow => match u32::try_from(b) {
            Ok(exponent) => a.checked_pow(exponent),
            // Negative exponents leave the integers.
            Err(_) if b < 0 => {
                return float_arithmetic(as_float(Number::Int(a)), as_float(Number::Int(b)), op)
            }
            Err(_) => None,
        },
        _ => return Value::error(format!("`{}` is not arithmetic", op.as_symbol())),
    };
    result.map_or_else(
        || Value::error(format!("integer overflow in `{}`", op.as_symbol())),
        Value::Int,
    )
}

fn float_arithmetic(a: f64, b: f64, op: BinaryOp) -> Value {
    match op {
        BinaryOp::Add => Value::Float(a + b),
        BinaryOp::Sub => Value::Float(a - b),
        BinaryOp::Mul => Value::Float(a * b),
        BinaryOp::Div if b == 0.0 => division_by_zero(),
        BinaryOp::Div => Value::Float(a / b),
        BinaryOp::Pow => Value::Float(a.powf(b)),
        _ => Value::error(format!("`{}` is not arithmetic", op.as_symbol())),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "mixed int/float arithmetic widens to f64"
)]
fn as_float(n: Number) -> f64 {
    match n {
        Number::Int(n) => n as f64,
        Number::Float(x) => x,
    }
}

/// Order two operands: numerically when both read as numbers, otherwise
/// lexically when both are strings.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => compare_numbers(a, b),
        _ => match (left, right) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => None,
        },
    }
}

fn equal(left: &Value, right: &Value) -> bool {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        _ => left == right,
    }
}

fn compare_numbers(a: Number, b: Number) -> Option<Ordering> {
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
        (a, b) => as_float(a).partial_cmp(&as_float(b)),
    }
}

/// `T aug x`: a new tuple with `x` after the last index of `T`.
fn augment(left: Value, right: Value) -> Value {
    match left {
        Value::Nil => Value::tuple([right]),
        Value::Tuple(elements) => {
            // Elements are stored in reverse index order, so the new last
            // index goes in front.
            let mut extended = Vec::with_capacity(elements.len() + 1);
            extended.push(right);
            extended.extend(elements.iter().cloned());
            Value::tuple(extended)
        }
        other => mismatch(&other, &right, BinaryOp::Aug),
    }
}

#[cold]
fn division_by_zero() -> Value {
    Value::error("division by zero")
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> Value {
    Value::error(format!(
        "cannot apply `{}` to {} and {}",
        op.as_symbol(),
        left.type_name(),
        right.type_name()
    ))
}
