#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Three-valued truth values and the per-variable assignment table.

use crate::sat::literal::{Literal, Variable};
use core::ops::{BitXor, Index, Not};

/// A lifted boolean: `True`, `False` or `Undef` (unassigned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LBool {
    True,
    False,
    #[default]
    Undef,
}

impl LBool {
    #[must_use]
    #[inline]
    pub const fn from_bool(b: bool) -> Self {
        if b { Self::True } else { Self::False }
    }

    #[must_use]
    #[inline]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    #[must_use]
    #[inline]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }

    #[must_use]
    #[inline]
    pub const fn is_undef(self) -> bool {
        matches!(self, Self::Undef)
    }

    /// `Some(b)` for an assigned value.
    #[must_use]
    #[inline]
    pub const fn to_option(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Undef => None,
        }
    }
}

impl Not for LBool {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Undef => Self::Undef,
        }
    }
}

/// Flips the value when the right-hand side is `true`.
impl BitXor<bool> for LBool {
    type Output = Self;

    #[inline]
    fn bitxor(self, flip: bool) -> Self::Output {
        if flip { !self } else { self }
    }
}

impl From<bool> for LBool {
    fn from(b: bool) -> Self {
        Self::from_bool(b)
    }
}

/// Current value of every variable.
///
/// Only the trail writes to this table; everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<LBool>);

impl Assignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![LBool::Undef; num_vars])
    }

    /// Extends the table with one unassigned variable.
    pub fn push_variable(&mut self) {
        self.0.push(LBool::Undef);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn var_value(&self, var: Variable) -> LBool {
        self.0[var as usize]
    }

    /// Value of `lit` under the current assignment.
    #[must_use]
    #[inline]
    pub fn literal_value(&self, lit: Literal) -> LBool {
        self.0[lit.variable() as usize] ^ lit.is_negated()
    }

    #[must_use]
    #[inline]
    pub fn is_assigned(&self, var: Variable) -> bool {
        !self.0[var as usize].is_undef()
    }

    /// Makes `lit` true.
    #[inline]
    pub fn assign(&mut self, lit: Literal) {
        self.0[lit.variable() as usize] = LBool::from_bool(lit.polarity());
    }

    #[inline]
    pub fn unassign(&mut self, var: Variable) {
        self.0[var as usize] = LBool::Undef;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LBool> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[LBool] {
        &self.0
    }
}

impl Index<Variable> for Assignment {
    type Output = LBool;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index as usize]
    }
}
