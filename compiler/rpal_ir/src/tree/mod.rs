//! Syntax trees and their dot-indented text form.
//!
//! The front end hands trees over as text, one node per line, with the
//! depth given by the number of leading dots:
//!
//! ```text
//! gamma
//! .lambda
//! ..x
//! ..+
//! ...x
//! ...1
//! .5
//! ```
//!
//! The tag is the rest of the line after the dots, so string leaves such as
//! `'hello world'` keep their spaces.

use std::fmt;

use crate::ensure_sufficient_stack;

/// A tree node: a tag and its ordered children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node {
            tag: tag.into(),
            children,
        }
    }

    pub fn leaf(tag: impl Into<String>) -> Self {
        Node::new(tag, Vec::new())
    }

    #[inline]
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    fn write_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str(".")?;
        }
        writeln!(f, "{}", self.tag)?;
        for child in &self.children {
            ensure_sufficient_stack(|| child.write_at(f, depth + 1))?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_at(f, 0)
    }
}

/// Malformed tree text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("no tree in input")]
    Empty,
    #[error("line {line}: a second root node")]
    MultipleRoots { line: usize },
    #[error("line {line}: depth {depth} skips a level (at most {max} allowed here)")]
    DepthJump { line: usize, depth: usize, max: usize },
    #[error("line {line}: node has no tag")]
    MissingTag { line: usize },
}

/// Read a tree from its dot-indented text form.
///
/// Builds the tree with an explicit stack of open nodes, one per depth, so
/// arbitrarily deep input is read without recursion.
pub fn parse_tree(text: &str) -> Result<Node, TreeError> {
    let mut open: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let rest = trimmed.trim_start_matches('.');
        let depth = trimmed.len() - rest.len();
        let tag = rest.trim();
        if tag.is_empty() {
            return Err(TreeError::MissingTag { line });
        }
        if depth > open.len() {
            return Err(TreeError::DepthJump {
                line,
                depth,
                max: open.len(),
            });
        }

        while open.len() > depth {
            close_innermost(&mut open, &mut root);
        }
        if depth == 0 && root.is_some() {
            return Err(TreeError::MultipleRoots { line });
        }
        open.push(Node::leaf(tag));
    }

    while !open.is_empty() {
        close_innermost(&mut open, &mut root);
    }
    root.ok_or(TreeError::Empty)
}

/// Pop the innermost open node and attach it to its parent, or make it the
/// root when nothing encloses it.
fn close_innermost(open: &mut Vec<Node>, root: &mut Option<Node>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => *root = Some(node),
        }
    }
}
