use pretty_assertions::assert_eq;

use super::*;
use crate::print_handler::{buffer_handler, silent_handler};

fn call(primitive: Primitive, argument: Value) -> Value {
    Builtin::new(primitive).apply(argument, &silent_handler())
}

#[test]
fn names_resolve() {
    for name in ["Print", "Order", "Stem", "Stern", "Conc"] {
        let builtin = Builtin::named(name);
        assert!(builtin.is_some(), "{name} should be a builtin");
        assert_eq!(builtin.map(|b| b.primitive().name()), Some(name));
    }
    assert_eq!(Builtin::named("print"), None);
    assert_eq!(Builtin::named("x"), None);
}

#[test]
fn print_writes_and_returns_its_argument() {
    let sink = buffer_handler();
    let t = Value::tuple_indexed([Value::Int(1), Value::from("two")]);
    let result = Builtin::new(Primitive::Print).apply(t.clone(), &sink);
    assert_eq!(result, t);
    assert_eq!(sink.lines(), vec!["(1, two)"]);
}

#[test]
fn order_counts_tuple_elements() {
    let t = Value::tuple([Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert_eq!(call(Primitive::Order, t), Value::Int(3));
    assert_eq!(call(Primitive::Order, Value::tuple([])), Value::Int(0));
    assert_eq!(call(Primitive::Order, Value::Nil), Value::Int(0));
    assert_eq!(call(Primitive::Order, Value::Int(9)), Value::Int(1));
}

#[test]
fn stem_and_stern_split_strings() {
    assert_eq!(call(Primitive::Stem, Value::from("hello")), Value::from("h"));
    assert_eq!(call(Primitive::Stern, Value::from("hello")), Value::from("ello"));
    assert_eq!(call(Primitive::Stem, Value::from("")), Value::from(""));
    assert_eq!(call(Primitive::Stern, Value::from("")), Value::from(""));
    assert_eq!(call(Primitive::Stem, Value::Int(4)), Value::from(""));
}

#[test]
fn stem_respects_char_boundaries() {
    assert_eq!(call(Primitive::Stem, Value::from("éa")), Value::from("é"));
    assert_eq!(call(Primitive::Stern, Value::from("éa")), Value::from("a"));
}

#[test]
fn conc_is_curried() {
    let partial = call(Primitive::Conc, Value::from("ab"));
    let Value::Builtin(partial) = partial else {
        panic!("expected a partially applied builtin, got {partial:?}");
    };
    assert_eq!(partial.to_string(), "Conc ab");

    let done = partial.apply(Value::from("cd"), &silent_handler());
    assert_eq!(done, Value::from("abcd"));
}

#[test]
fn conc_renders_non_strings() {
    let Value::Builtin(partial) = call(Primitive::Conc, Value::Int(1)) else {
        panic!("expected a partially applied builtin");
    };
    assert_eq!(partial.apply(Value::Bool(true), &silent_handler()), Value::from("1true"));
}
