use super::*;
use pretty_assertions::assert_eq;
use rpal_ir::parse_tree;

fn std_text(text: &str) -> String {
    standardize(parse_tree(text).unwrap()).unwrap().to_string()
}

#[test]
fn let_becomes_application_of_lambda() {
    let out = std_text("let\n.=\n..x\n..3\n.+\n..x\n..1\n");
    assert_eq!(out, "gamma\n.lambda\n..x\n..+\n...x\n...1\n.3\n");
}

#[test]
fn where_becomes_application_of_lambda() {
    let out = std_text("where\n.Print\n..x\n.=\n..x\n..5\n");
    assert_eq!(out, "gamma\n.lambda\n..x\n..Print\n...x\n.5\n");
}

#[test]
fn function_form_curries_parameters() {
    let out = std_text("let\n.function_form\n..f\n..a\n..b\n..+\n...a\n...b\n.f\n");
    assert_eq!(
        out,
        "gamma\n.lambda\n..f\n..f\n.lambda\n..a\n..lambda\n...b\n...+\n....a\n....b\n"
    );
}

#[test]
fn rec_introduces_fixed_point() {
    let out = std_text("rec\n.=\n..f\n..lambda\n...n\n...n\n");
    assert_eq!(
        out,
        "=\n.f\n.gamma\n..Y*\n..lambda\n...f\n...lambda\n....n\n....n\n"
    );
}

#[test]
fn within_nests_the_inner_definition() {
    let out = std_text("within\n.=\n..a\n..1\n.=\n..b\n..a\n");
    assert_eq!(out, "=\n.b\n.gamma\n..lambda\n...a\n...a\n..1\n");
}

#[test]
fn and_pairs_names_with_a_tuple() {
    let out = std_text("and\n.=\n..a\n..1\n.=\n..b\n..2\n");
    assert_eq!(out, "=\n.,\n..a\n..b\n.tau\n..1\n..2\n");
}

#[test]
fn at_applies_infix_function() {
    let out = std_text("@\n.x\n.f\n.y\n");
    assert_eq!(out, "gamma\n.gamma\n..f\n..x\n.y\n");
}

#[test]
fn multi_variable_lambda_is_curried() {
    let out = std_text("lambda\n.x\n.y\n.z\n.x\n");
    assert_eq!(out, "lambda\n.x\n.lambda\n..y\n..lambda\n...z\n...x\n");
}

#[test]
fn nested_let_rec_program() {
    // let rec f n = n eq 0 -> 1 | n * f (n - 1) in f 5
    let text = "\
let
.rec
..function_form
...f
...n
...->
....eq
.....n
.....0
....1
....*
.....n
.....gamma
......f
......-
.......n
.......1
.gamma
..f
..5
";
    let out = std_text(text);
    let expected = "\
gamma
.lambda
..f
..gamma
...f
...5
.gamma
..Y*
..lambda
...f
...lambda
....n
....->
.....eq
......n
......0
.....1
.....*
......n
......gamma
.......f
.......-
........n
........1
";
    assert_eq!(out, expected);
}

#[test]
fn standard_trees_are_left_alone() {
    let text = "gamma\n.lambda\n..,\n...a\n...b\n..a\n.tau\n..1\n..2\n";
    assert_eq!(std_text(text), text);
    assert_eq!(std_text(&std_text(text)), text);
}

#[test]
fn let_without_definition_is_rejected() {
    let tree = parse_tree("let\n.x\n.x\n").unwrap();
    assert_eq!(
        standardize(tree),
        Err(StandardizeError::NotADefinition {
            construct: "let",
            found: "x".to_string(),
        })
    );
}

#[test]
fn wrong_arity_is_rejected() {
    let tree = parse_tree("@\n.x\n.f\n").unwrap();
    assert_eq!(
        standardize(tree),
        Err(StandardizeError::Arity {
            construct: "@",
            expected: 3,
            found: 2,
        })
    );

    let tree = parse_tree("function_form\n.f\n.x\n").unwrap();
    assert_eq!(
        standardize(tree),
        Err(StandardizeError::TooFew {
            construct: "function_form",
            min: 3,
            found: 2,
        })
    );
}
