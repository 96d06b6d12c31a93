//! Tests for the unary operators.

use rpal_ir::UnaryOp;

use crate::{evaluate_unary, Value};

#[test]
fn negation() {
    assert_eq!(evaluate_unary(Value::Int(5), UnaryOp::Neg), Value::Int(-5));
    assert_eq!(evaluate_unary(Value::Float(1.5), UnaryOp::Neg), Value::Float(-1.5));
    assert_eq!(evaluate_unary(Value::from("-3"), UnaryOp::Neg), Value::Int(3));
}

#[test]
fn negation_errors_are_values() {
    assert!(evaluate_unary(Value::Int(i64::MIN), UnaryOp::Neg).is_error());
    assert_eq!(
        evaluate_unary(Value::Nil, UnaryOp::Neg),
        Value::error("cannot negate nil")
    );
}

#[test]
fn not_inverts_truthiness() {
    assert_eq!(evaluate_unary(Value::Bool(true), UnaryOp::Not), Value::Bool(false));
    assert_eq!(evaluate_unary(Value::Int(0), UnaryOp::Not), Value::Bool(true));
    assert_eq!(evaluate_unary(Value::from("yes"), UnaryOp::Not), Value::Bool(false));
    assert_eq!(evaluate_unary(Value::Nil, UnaryOp::Not), Value::Bool(true));
}
