use super::*;

#[test]
fn digit_strings_read_as_integers() {
    assert_eq!(Value::from("42").as_number(), Some(Number::Int(42)));
    assert_eq!(Value::from("-7").as_number(), Some(Number::Int(-7)));
    assert_eq!(Value::from("2.5").as_number(), Some(Number::Float(2.5)));
}

#[test]
fn non_numeric_strings_are_not_numbers() {
    assert_eq!(Value::from("abc").as_number(), None);
    assert_eq!(Value::from("-").as_number(), None);
    assert_eq!(Value::from("").as_number(), None);
    assert_eq!(Value::from("inf").as_number(), None);
    assert_eq!(Value::from("NaN").as_number(), None);
    assert_eq!(Value::Bool(true).as_number(), None);
}

#[test]
fn truthiness() {
    assert!(Value::Bool(true).is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Int(3).is_truthy());
    assert!(!Value::Int(0).is_truthy());
    assert!(Value::Float(0.5).is_truthy());

    assert!(Value::from("TRUE").is_truthy());
    assert!(Value::from("yes").is_truthy());
    assert!(Value::from("1").is_truthy());
    assert!(Value::from("12").is_truthy());
    assert!(!Value::from("0").is_truthy());
    assert!(!Value::from("no").is_truthy());

    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Dummy.is_truthy());
    assert!(!Value::tuple([Value::Int(1)]).is_truthy());
}

#[test]
fn tuples_display_in_index_order() {
    let t = Value::tuple([Value::Int(3), Value::Int(2), Value::Int(1)]);
    assert_eq!(t.to_string(), "(1, 2, 3)");

    let t = Value::tuple_indexed([Value::from("a"), Value::Nil, Value::Bool(true)]);
    assert_eq!(t.to_string(), "(a, nil, true)");

    assert_eq!(Value::tuple([]).to_string(), "()");
}

#[test]
fn nested_tuples_display() {
    let inner = Value::tuple_indexed([Value::Int(1), Value::Int(2)]);
    let outer = Value::tuple_indexed([inner, Value::Int(3)]);
    assert_eq!(outer.to_string(), "((1, 2), 3)");
}

#[test]
fn scalar_display() {
    assert_eq!(Value::Int(-4).to_string(), "-4");
    assert_eq!(Value::from("hi").to_string(), "hi");
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(Value::Dummy.to_string(), "dummy");
    assert_eq!(Value::FixedPointOperator.to_string(), "Y*");
    assert_eq!(
        Value::error("division by zero").to_string(),
        "<error: division by zero>"
    );
}

#[test]
fn literals_convert() {
    assert_eq!(Value::from(&Literal::Int(5)), Value::Int(5));
    assert_eq!(Value::from(&Literal::Str("s".into())), Value::from("s"));
    assert_eq!(Value::from(&Literal::Nil), Value::Nil);
    assert_eq!(Value::from(&Literal::Dummy), Value::Dummy);
}

#[test]
fn equality_is_structural_for_data() {
    assert_eq!(
        Value::tuple([Value::Int(1), Value::from("x")]),
        Value::tuple([Value::Int(1), Value::from("x")])
    );
    assert_ne!(Value::Int(1), Value::from("1"));
    assert_ne!(Value::Nil, Value::tuple([]));
}

/// `(n, (n - 1, ... (1, nil)))`, built the way a recursive program builds it.
fn nested_pairs(depth: i64) -> Value {
    (1..=depth).fold(Value::Nil, |rest, n| {
        Value::tuple_indexed([Value::Int(n), rest])
    })
}

#[test]
fn deeply_nested_tuples_compare_display_and_drop() {
    let depth = 200_000;
    let a = nested_pairs(depth);
    let b = nested_pairs(depth);
    assert_eq!(a, b);
    assert_ne!(a, nested_pairs(depth - 1));

    let text = a.to_string();
    assert!(text.starts_with("(200000, (199999, (199998, "));
    let tail = format!("(1, nil){}", ")".repeat(199_999));
    assert!(text.ends_with(&tail));
    assert!(!format!("{a:?}").is_empty());

    drop(a);
    drop(b);
}
