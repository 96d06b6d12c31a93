//! Unary operator implementations.

use rpal_ir::UnaryOp;

use crate::value::Number;
use crate::Value;

/// Evaluate a unary operation. Like the binary operators this never fails;
/// a bad operand yields an error value.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> Value {
    match op {
        UnaryOp::Neg => match value.as_number() {
            Some(Number::Int(n)) => n
                .checked_neg()
                .map_or_else(|| Value::error("integer overflow in `neg`"), Value::Int),
            Some(Number::Float(x)) => Value::Float(-x),
            None => Value::error(format!("cannot negate {}", value.type_name())),
        },
        UnaryOp::Not => Value::Bool(!value.is_truthy()),
    }
}
