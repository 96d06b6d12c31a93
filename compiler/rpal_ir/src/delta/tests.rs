use super::*;
use crate::{Literal, Name};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

#[test]
fn reserve_hands_out_consecutive_ids() {
    let mut builder = DeltaTableBuilder::new();
    assert_eq!(builder.reserve(), Ok(DeltaId::new(0)));
    assert_eq!(builder.reserve(), Ok(DeltaId::new(1)));
    assert_eq!(builder.reserve(), Ok(DeltaId::new(2)));
}

#[test]
fn finish_builds_table_in_order() {
    let mut builder = DeltaTableBuilder::new();
    let root = builder.reserve().unwrap();
    let body = builder.reserve().unwrap();
    builder.fill(body, vec![ControlToken::Identifier(Name::new("x"))]);
    builder.fill(
        root,
        vec![
            ControlToken::Gamma,
            ControlToken::Lambda {
                delta: body,
                params: smallvec![Name::new("x")],
            },
            ControlToken::Literal(Literal::Int(5)),
        ],
    );

    let table = builder.finish().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.root().len(), 3);
    assert_eq!(
        table.get(body),
        Some(&[ControlToken::Identifier(Name::new("x"))][..])
    );
    assert_eq!(table.to_string(), "delta0 = gamma lambda1:x 5\ndelta1 = x\n");
}

#[test]
fn unfilled_slot_is_rejected() {
    let mut builder = DeltaTableBuilder::new();
    let root = builder.reserve().unwrap();
    let _ = builder.reserve().unwrap();
    builder.fill(root, vec![]);
    assert_eq!(builder.finish(), Err(DeltaError::Unfilled(DeltaId::new(1))));
}

#[test]
fn dangling_reference_is_rejected() {
    let mut builder = DeltaTableBuilder::new();
    let root = builder.reserve().unwrap();
    builder.fill(root, vec![ControlToken::DeltaRef(DeltaId::new(7))]);
    assert_eq!(
        builder.finish(),
        Err(DeltaError::Unresolved {
            from: DeltaId::ROOT,
            target: DeltaId::new(7),
        })
    );
}

#[test]
fn empty_table_has_empty_root() {
    let table = DeltaTable::default();
    assert!(table.is_empty());
    assert!(table.root().is_empty());
}
