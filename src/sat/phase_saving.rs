#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Phase saving: the polarity a variable last had before it was unassigned.

use crate::sat::literal::{Literal, Variable};
use bit_vec::BitVec;

/// One bit per variable, set when the variable was last assigned true.
///
/// Fresh variables start out `false`, so the first decision on a variable
/// picks its negative literal.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SavedPhases(BitVec);

impl SavedPhases {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(BitVec::from_elem(num_vars, false))
    }

    pub fn push_variable(&mut self) {
        self.0.push(false);
    }

    /// Remembers the polarity of `lit`, which is about to be unassigned.
    #[inline]
    pub fn save(&mut self, lit: Literal) {
        self.0.set(lit.variable() as usize, lit.polarity());
    }

    #[must_use]
    #[inline]
    pub fn phase(&self, var: Variable) -> bool {
        self.0.get(var as usize).unwrap_or(false)
    }

    /// The literal to branch on for `var`.
    #[must_use]
    pub fn decision_literal(&self, var: Variable) -> Literal {
        Literal::new(var, self.phase(var))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
