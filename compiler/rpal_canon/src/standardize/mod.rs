//! Rewriting sugared trees into standard form.
//!
//! Children are standardized before their parent, so every rule below sees
//! already-standard subtrees (in particular, every definition has become an
//! `=` node by the time `let` or `where` inspects it).
//!
//! | Construct | Standard form |
//! |---|---|
//! | `let (= X E) P` | `gamma (lambda X P) E` |
//! | `where P (= X E)` | `gamma (lambda X P) E` |
//! | `within (= X1 E1) (= X2 E2)` | `= X2 (gamma (lambda X1 E2) E1)` |
//! | `rec (= X E)` | `= X (gamma Y* (lambda X E))` |
//! | `function_form P V1..Vn E` | `= P (lambda V1 (.. (lambda Vn E)))` |
//! | `@ E1 N E2` | `gamma (gamma N E1) E2` |
//! | `and (= X1 E1)..(= Xn En)` | `= (, X1..Xn) (tau E1..En)` |
//! | `lambda V1..Vn E` | `lambda V1 (.. (lambda Vn E))` |

use rpal_ir::{ensure_sufficient_stack, Node};

/// A sugared construct with the wrong shape.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StandardizeError {
    #[error("`{construct}` expects {expected} children, found {found}")]
    Arity {
        construct: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("`{construct}` expects at least {min} children, found {found}")]
    TooFew {
        construct: &'static str,
        min: usize,
        found: usize,
    },
    #[error("`{construct}` expects a definition (`=`), found `{found}`")]
    NotADefinition {
        construct: &'static str,
        found: String,
    },
}

/// Standardize a whole tree.
///
/// Already-standard trees come back unchanged.
#[tracing::instrument(level = "debug", skip_all)]
pub fn standardize(tree: Node) -> Result<Node, StandardizeError> {
    standardize_node(tree)
}

fn standardize_node(node: Node) -> Result<Node, StandardizeError> {
    ensure_sufficient_stack(|| {
        let Node { tag, children } = node;
        let children = children
            .into_iter()
            .map(standardize_node)
            .collect::<Result<Vec<_>, _>>()?;

        match tag.as_str() {
            "let" => {
                let [definition, body] = exact("let", children)?;
                let (name, value) = split_definition("let", definition)?;
                Ok(apply(lambda(name, body), value))
            }
            "where" => {
                let [body, definition] = exact("where", children)?;
                let (name, value) = split_definition("where", definition)?;
                Ok(apply(lambda(name, body), value))
            }
            "within" => {
                let [outer, inner] = exact("within", children)?;
                let (outer_name, outer_value) = split_definition("within", outer)?;
                let (inner_name, inner_value) = split_definition("within", inner)?;
                Ok(define(
                    inner_name,
                    apply(lambda(outer_name, inner_value), outer_value),
                ))
            }
            "rec" => {
                let [definition] = exact("rec", children)?;
                let (name, value) = split_definition("rec", definition)?;
                let recursive = lambda(name.clone(), value);
                Ok(define(name, apply(Node::leaf("Y*"), recursive)))
            }
            "function_form" | "fcn_form" => {
                let mut children = at_least("function_form", children, 3)?;
                let body = pop_last(&mut children);
                let name = children.remove(0);
                Ok(define(name, curry(children, body)))
            }
            "@" => {
                let [left, function, right] = exact("@", children)?;
                Ok(apply(apply(function, left), right))
            }
            "and" => {
                let children = at_least("and", children, 2)?;
                let mut names = Vec::with_capacity(children.len());
                let mut values = Vec::with_capacity(children.len());
                for definition in children {
                    let (name, value) = split_definition("and", definition)?;
                    names.push(name);
                    values.push(value);
                }
                Ok(define(Node::new(",", names), Node::new("tau", values)))
            }
            "lambda" if children.len() > 2 => {
                let mut children = children;
                let body = pop_last(&mut children);
                Ok(curry(children, body))
            }
            _ => Ok(Node { tag, children }),
        }
    })
}

fn apply(function: Node, argument: Node) -> Node {
    Node::new("gamma", vec![function, argument])
}

fn lambda(binder: Node, body: Node) -> Node {
    Node::new("lambda", vec![binder, body])
}

fn define(name: Node, value: Node) -> Node {
    Node::new("=", vec![name, value])
}

/// `lambda V1 (lambda V2 (.. body))`, innermost binder last.
fn curry(binders: Vec<Node>, body: Node) -> Node {
    binders
        .into_iter()
        .rev()
        .fold(body, |inner, binder| lambda(binder, inner))
}

fn exact<const N: usize>(
    construct: &'static str,
    children: Vec<Node>,
) -> Result<[Node; N], StandardizeError> {
    let found = children.len();
    <[Node; N]>::try_from(children).map_err(|_| StandardizeError::Arity {
        construct,
        expected: N,
        found,
    })
}

fn at_least(
    construct: &'static str,
    children: Vec<Node>,
    min: usize,
) -> Result<Vec<Node>, StandardizeError> {
    if children.len() < min {
        return Err(StandardizeError::TooFew {
            construct,
            min,
            found: children.len(),
        });
    }
    Ok(children)
}

/// Callers have checked the length, so the vector is never empty here.
fn pop_last(children: &mut Vec<Node>) -> Node {
    children.pop().unwrap_or_else(|| Node::leaf("dummy"))
}

fn split_definition(
    construct: &'static str,
    definition: Node,
) -> Result<(Node, Node), StandardizeError> {
    if !definition.is("=") {
        return Err(StandardizeError::NotADefinition {
            construct,
            found: definition.tag,
        });
    }
    let [name, value] = exact("=", definition.children)?;
    Ok((name, value))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
