//! The delta table: numbered control structures.
//!
//! Deltas are reserved in allocation order while the generator walks the
//! tree and filled in once their body has been flattened. `finish` verifies
//! that every slot was filled and that every `DeltaRef`/lambda target
//! exists, so the machine never meets a dangling reference at runtime.

use std::fmt;

use crate::{ControlToken, DeltaId};

/// A dangling or missing control structure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeltaError {
    #[error("{0} was reserved but never filled")]
    Unfilled(DeltaId),
    #[error("{from} refers to {target}, which does not exist")]
    Unresolved { from: DeltaId, target: DeltaId },
    #[error("more than {} control structures", u32::MAX)]
    Overflow,
}

/// Immutable table of control structures, indexed by `DeltaId`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeltaTable {
    deltas: Vec<Vec<ControlToken>>,
}

impl DeltaTable {
    /// The program root, `delta0`. Empty for an empty table.
    pub fn root(&self) -> &[ControlToken] {
        self.get(DeltaId::ROOT).unwrap_or(&[])
    }

    #[inline]
    pub fn get(&self, id: DeltaId) -> Option<&[ControlToken]> {
        self.deltas.get(id.index()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Iterate deltas in numeric order.
    pub fn iter(&self) -> impl Iterator<Item = (DeltaId, &[ControlToken])> {
        (0u32..)
            .zip(&self.deltas)
            .map(|(raw, tokens)| (DeltaId::new(raw), tokens.as_slice()))
    }
}

impl fmt::Display for DeltaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, tokens) in self.iter() {
            write!(f, "{id} =")?;
            for token in tokens {
                write!(f, " {token}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Incremental construction of a `DeltaTable`.
#[derive(Debug, Default)]
pub struct DeltaTableBuilder {
    slots: Vec<Option<Vec<ControlToken>>>,
}

impl DeltaTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next delta index.
    pub fn reserve(&mut self) -> Result<DeltaId, DeltaError> {
        let raw = u32::try_from(self.slots.len()).map_err(|_| DeltaError::Overflow)?;
        self.slots.push(None);
        Ok(DeltaId::new(raw))
    }

    /// Store the flattened body of a reserved delta.
    ///
    /// Filling an index that was never reserved is ignored here and reported
    /// by `finish` as an unresolved reference if anything points at it.
    pub fn fill(&mut self, id: DeltaId, tokens: Vec<ControlToken>) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = Some(tokens);
        }
    }

    /// Check every slot and reference, producing the final table.
    pub fn finish(self) -> Result<DeltaTable, DeltaError> {
        let mut deltas = Vec::with_capacity(self.slots.len());
        for (raw, slot) in (0u32..).zip(self.slots) {
            let tokens = slot.ok_or(DeltaError::Unfilled(DeltaId::new(raw)))?;
            deltas.push(tokens);
        }

        let table = DeltaTable { deltas };
        for (from, tokens) in table.iter() {
            for token in tokens {
                let target = match token {
                    ControlToken::DeltaRef(target) => *target,
                    ControlToken::Lambda { delta, .. } => *delta,
                    _ => continue,
                };
                if table.get(target).is_none() {
                    return Err(DeltaError::Unresolved { from, target });
                }
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
