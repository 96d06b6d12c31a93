use super::*;
use smallvec::smallvec;

#[test]
fn operator_tags_resolve_both_spellings() {
    assert_eq!(BinaryOp::from_tag("gr"), Some(BinaryOp::Gr));
    assert_eq!(BinaryOp::from_tag(">"), Some(BinaryOp::Gr));
    assert_eq!(BinaryOp::from_tag("<="), Some(BinaryOp::Le));
    assert_eq!(BinaryOp::from_tag("aug"), Some(BinaryOp::Aug));
    assert_eq!(BinaryOp::from_tag("gamma"), None);
}

#[test]
fn not_is_unary() {
    assert_eq!(Operator::from_tag("not"), Some(Operator::Unary(UnaryOp::Not)));
    assert_eq!(Operator::from_tag("neg"), Some(Operator::Unary(UnaryOp::Neg)));
    assert_eq!(Operator::from_tag("-"), Some(Operator::Binary(BinaryOp::Sub)));
    assert_eq!(Operator::from_tag("x"), None);
}

#[test]
fn symbols_round_trip_through_from_tag() {
    for op in [
        BinaryOp::Add,
        BinaryOp::Pow,
        BinaryOp::Ge,
        BinaryOp::Ne,
        BinaryOp::And,
        BinaryOp::Aug,
    ] {
        assert_eq!(BinaryOp::from_tag(op.as_symbol()), Some(op));
    }
}

#[test]
fn token_display() {
    let lambda = ControlToken::Lambda {
        delta: DeltaId::new(3),
        params: smallvec![Name::new("T"), Name::new("N")],
    };
    assert_eq!(lambda.to_string(), "lambda3:T,N");
    assert_eq!(ControlToken::DeltaRef(DeltaId::new(2)).to_string(), "delta2");
    assert_eq!(ControlToken::Tau(3).to_string(), "tau3");
    assert_eq!(ControlToken::Environment(EnvId::ROOT).to_string(), "e0");
    assert_eq!(
        ControlToken::Literal(Literal::Str("hi".into())).to_string(),
        "'hi'"
    );
    assert_eq!(ControlToken::Conditional.to_string(), "beta");
}
