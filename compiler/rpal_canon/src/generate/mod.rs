//! Control-structure generation.
//!
//! Flattens a standardized tree into a `DeltaTable`:
//!
//! - `lambda X B`: reserve the next delta, flatten `B` into it, and emit a
//!   single `Lambda` token carrying the delta and the parameter names
//!   (`X` itself, or the children of a `,` node).
//! - `-> C T E`: reserve two consecutive deltas (true branch first), emit
//!   `DeltaRef(true) DeltaRef(false) beta`, then flatten `C` inline.
//! - `tau E1..En`: emit `tau<n>` followed by each element.
//! - anything else: emit the node's own token, then its children in order.
//!
//! Delta numbers come from one counter for the whole tree, handed out in
//! depth-first, left-to-right order; `delta0` is the program root.

use rpal_ir::{
    ensure_sufficient_stack, ControlToken, DeltaError, DeltaTable, DeltaTableBuilder, Literal,
    Name, Node, Operator, Params,
};

/// A tree the generator cannot flatten.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("lambda needs a variable and a body, found {found} children")]
    MalformedLambda { found: usize },
    #[error("lambda has an empty parameter list")]
    EmptyParameterList,
    #[error("conditional needs a condition and two branches, found {found} children")]
    MalformedConditional { found: usize },
    #[error("integer literal `{text}` does not fit in 64 bits")]
    IntegerOutOfRange { text: String },
    #[error(transparent)]
    Delta(#[from] DeltaError),
}

/// Generate the control structures for a standardized tree.
#[tracing::instrument(level = "debug", skip_all)]
pub fn generate(tree: &Node) -> Result<DeltaTable, GenerationError> {
    let table = ControlStructureGenerator::default().run(tree)?;
    tracing::debug!(deltas = table.len(), "generated control structures");
    Ok(table)
}

#[derive(Default)]
struct ControlStructureGenerator {
    builder: DeltaTableBuilder,
}

impl ControlStructureGenerator {
    fn run(mut self, root: &Node) -> Result<DeltaTable, GenerationError> {
        let root_delta = self.builder.reserve()?;
        let tokens = self.flatten_into_new(root)?;
        self.builder.fill(root_delta, tokens);
        Ok(self.builder.finish()?)
    }

    fn flatten_into_new(&mut self, node: &Node) -> Result<Vec<ControlToken>, GenerationError> {
        let mut tokens = Vec::new();
        self.flatten(node, &mut tokens)?;
        Ok(tokens)
    }

    fn flatten(&mut self, node: &Node, out: &mut Vec<ControlToken>) -> Result<(), GenerationError> {
        ensure_sufficient_stack(|| match node.tag.as_str() {
            "lambda" => self.flatten_lambda(node, out),
            "->" => self.flatten_conditional(node, out),
            "tau" => {
                out.push(ControlToken::Tau(node.children.len()));
                self.flatten_children(node, out)
            }
            tag => {
                out.push(classify(tag)?);
                self.flatten_children(node, out)
            }
        })
    }

    fn flatten_children(
        &mut self,
        node: &Node,
        out: &mut Vec<ControlToken>,
    ) -> Result<(), GenerationError> {
        for child in &node.children {
            self.flatten(child, out)?;
        }
        Ok(())
    }

    fn flatten_lambda(
        &mut self,
        node: &Node,
        out: &mut Vec<ControlToken>,
    ) -> Result<(), GenerationError> {
        let [binder, body] = node.children.as_slice() else {
            return Err(GenerationError::MalformedLambda {
                found: node.children.len(),
            });
        };
        let params = parameters(binder)?;

        let delta = self.builder.reserve()?;
        let tokens = self.flatten_into_new(body)?;
        self.builder.fill(delta, tokens);

        out.push(ControlToken::Lambda { delta, params });
        Ok(())
    }

    fn flatten_conditional(
        &mut self,
        node: &Node,
        out: &mut Vec<ControlToken>,
    ) -> Result<(), GenerationError> {
        let [condition, then_branch, else_branch] = node.children.as_slice() else {
            return Err(GenerationError::MalformedConditional {
                found: node.children.len(),
            });
        };

        let then_delta = self.builder.reserve()?;
        let else_delta = self.builder.reserve()?;
        out.extend([
            ControlToken::DeltaRef(then_delta),
            ControlToken::DeltaRef(else_delta),
            ControlToken::Conditional,
        ]);
        self.flatten(condition, out)?;

        let tokens = self.flatten_into_new(then_branch)?;
        self.builder.fill(then_delta, tokens);
        let tokens = self.flatten_into_new(else_branch)?;
        self.builder.fill(else_delta, tokens);
        Ok(())
    }
}

/// Parameter names bound by a lambda: one identifier, or the children of a
/// `,` node for tuple-destructuring lambdas.
fn parameters(binder: &Node) -> Result<Params, GenerationError> {
    if binder.is(",") {
        if binder.children.is_empty() {
            return Err(GenerationError::EmptyParameterList);
        }
        Ok(binder
            .children
            .iter()
            .map(|child| parameter_name(&child.tag))
            .collect())
    } else {
        Ok(std::iter::once(parameter_name(&binder.tag)).collect())
    }
}

fn parameter_name(tag: &str) -> Name {
    match bracketed(tag) {
        Some(("ID", text)) => Name::new(text),
        _ => Name::new(tag),
    }
}

/// Split a conventional bracketed leaf such as `<ID:x>` into `("ID", "x")`.
fn bracketed(tag: &str) -> Option<(&str, &str)> {
    tag.strip_prefix('<')?.strip_suffix('>')?.split_once(':')
}

/// Map a node tag to the token it flattens to.
fn classify(tag: &str) -> Result<ControlToken, GenerationError> {
    if let Some(op) = Operator::from_tag(tag) {
        return Ok(ControlToken::Operator(op));
    }

    match bracketed(tag) {
        Some(("ID", text)) => return Ok(ControlToken::Identifier(Name::new(text))),
        Some(("INT", text)) => return integer(text),
        Some(("STR", text)) => return Ok(string(text)),
        _ => {}
    }

    // `<true>`, `<nil>`, `<Y*>` and friends.
    let tag = tag
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(tag);

    let token = match tag {
        "gamma" => ControlToken::Gamma,
        "Y" | "Y*" => ControlToken::FixedPoint,
        "true" => ControlToken::Literal(Literal::Bool(true)),
        "false" => ControlToken::Literal(Literal::Bool(false)),
        "nil" => ControlToken::Literal(Literal::Nil),
        "dummy" => ControlToken::Literal(Literal::Dummy),
        _ if tag.len() >= 2 && tag.starts_with('\'') && tag.ends_with('\'') => string(tag),
        _ if !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_digit()) => return integer(tag),
        _ if is_float(tag) => match tag.parse::<f64>() {
            Ok(value) => ControlToken::Literal(Literal::Float(value)),
            Err(_) => ControlToken::Identifier(Name::new(tag)),
        },
        _ => ControlToken::Identifier(Name::new(tag)),
    };
    Ok(token)
}

fn integer(text: &str) -> Result<ControlToken, GenerationError> {
    text.parse::<i64>()
        .map(|n| ControlToken::Literal(Literal::Int(n)))
        .map_err(|_| GenerationError::IntegerOutOfRange {
            text: text.to_string(),
        })
}

/// `digits.digits`
fn is_float(tag: &str) -> bool {
    match tag.split_once('.') {
        Some((whole, fraction)) => {
            !whole.is_empty()
                && !fraction.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Strip the surrounding quotes (if any) and resolve escapes.
fn string(text: &str) -> ControlToken {
    let inner = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    ControlToken::Literal(Literal::Str(out.into()))
}
